//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Grindstone:
//!
//! - `user_config`: the singleton accounting record (balance, goal, streak)
//! - `study_logs`: append-only study sessions with the energy earned
//! - `reward_items`: the redeemable catalog, tagged with an item kind

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserConfig {
    Table,
    Id,
    EnergyBalance,
    DailyGoalHours,
    BaseRewardRate,
    PenaltyAmount,
    LastCheckDate,
    CurrentStreak,
    StreakFreezes,
    MaxStreakBonus,
}

#[derive(Iden)]
enum StudyLogs {
    Table,
    Id,
    Date,
    DurationMinutes,
    Note,
    EarnedEnergy,
}

#[derive(Iden)]
enum RewardItems {
    Table,
    Id,
    Name,
    Cost,
    Description,
    Kind,
    IsSystemItem,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserConfig::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserConfig::EnergyBalance)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(UserConfig::DailyGoalHours)
                            .double()
                            .not_null()
                            .default(4.0),
                    )
                    .col(
                        ColumnDef::new(UserConfig::BaseRewardRate)
                            .double()
                            .not_null()
                            .default(10.0),
                    )
                    .col(
                        ColumnDef::new(UserConfig::PenaltyAmount)
                            .double()
                            .not_null()
                            .default(50.0),
                    )
                    .col(ColumnDef::new(UserConfig::LastCheckDate).string().not_null())
                    .col(
                        ColumnDef::new(UserConfig::CurrentStreak)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserConfig::StreakFreezes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserConfig::MaxStreakBonus)
                            .double()
                            .not_null()
                            .default(1.5),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudyLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudyLogs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudyLogs::Date).string().not_null())
                    .col(
                        ColumnDef::new(StudyLogs::DurationMinutes)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudyLogs::Note).string())
                    .col(
                        ColumnDef::new(StudyLogs::EarnedEnergy)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        // The daily check and the status report both filter by calendar day.
        manager
            .create_index(
                Index::create()
                    .name("idx-study_logs-date")
                    .table(StudyLogs::Table)
                    .col(StudyLogs::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RewardItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RewardItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RewardItems::Name).string().not_null())
                    .col(ColumnDef::new(RewardItems::Cost).double().not_null())
                    .col(ColumnDef::new(RewardItems::Description).string())
                    .col(
                        ColumnDef::new(RewardItems::Kind)
                            .string()
                            .not_null()
                            .default("generic"),
                    )
                    .col(
                        ColumnDef::new(RewardItems::IsSystemItem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-reward_items-kind")
                    .table(RewardItems::Table)
                    .col(RewardItems::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RewardItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudyLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserConfig::Table).to_owned())
            .await?;
        Ok(())
    }
}
