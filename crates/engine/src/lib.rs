//! The accounting engine: turns study minutes into energy and runs the daily
//! streak check.
//!
//! The engine owns the database connection and keeps the singleton
//! [`UserConfig`] in memory as the source of truth for balances. Writes go
//! through the database first; the in-memory state is only mutated after the
//! transaction commits.

use chrono::{Days, NaiveDate};
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

pub use config::{CONFIG_KEY, UserConfig, multiplier};
pub use daily_check::CheckOutcome;
pub use error::EngineError;
pub use rewards::{FREEZE_CARD_NAME, ItemKind, RewardItem};
pub use study_logs::StudyLog;

mod config;
mod daily_check;
mod error;
mod rewards;
mod study_logs;

type ResultEngine<T> = Result<T, EngineError>;

/// Everything the status endpoint reports, unrounded.
#[derive(Clone, Debug)]
pub struct StatusSnapshot {
    pub energy_balance: f64,
    pub today_hours: f64,
    pub daily_goal_hours: f64,
    pub current_streak: i64,
    pub multiplier: f64,
    pub streak_freezes: i64,
    pub logs: Vec<StudyLog>,
}

/// Result of logging a study session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StudyReceipt {
    pub log_id: Uuid,
    pub earned_energy: f64,
    pub multiplier: f64,
}

#[derive(Debug)]
pub struct Engine {
    config: UserConfig,
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The current configuration state.
    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Snapshot for the status report: balance, today's hours and logs, and
    /// the multiplier currently in effect.
    pub async fn status(&self, today: NaiveDate) -> ResultEngine<StatusSnapshot> {
        let logs = self.logs_for(today).await?;
        let total_minutes: i64 = logs.iter().map(|log| log.duration_minutes).sum();

        Ok(StatusSnapshot {
            energy_balance: self.config.energy_balance,
            today_hours: total_minutes as f64 / 60.0,
            daily_goal_hours: self.config.daily_goal_hours,
            current_streak: self.config.current_streak,
            multiplier: self.config.multiplier(),
            streak_freezes: self.config.streak_freezes,
            logs,
        })
    }

    /// Records a study session dated `today`.
    ///
    /// Appends one immutable log row with the energy earned at the current
    /// multiplier and credits the balance by the same amount, in a single
    /// database transaction.
    pub async fn log_study(
        &mut self,
        duration_minutes: i64,
        note: Option<&str>,
        today: NaiveDate,
    ) -> ResultEngine<StudyReceipt> {
        if duration_minutes < 0 {
            return Err(EngineError::InvalidAmount(
                "duration_minutes must be >= 0".to_string(),
            ));
        }

        let multiplier = self.config.multiplier();
        let earned = duration_minutes as f64 / 60.0 * self.config.base_reward_rate * multiplier;
        let log = StudyLog::new(today, duration_minutes, note.map(|s| s.to_string()), earned);

        let db_tx = self.database.begin().await?;
        study_logs::ActiveModel::from(&log).insert(&db_tx).await?;
        let config_model = config::ActiveModel {
            id: ActiveValue::Set(CONFIG_KEY.to_string()),
            energy_balance: ActiveValue::Set(self.config.energy_balance + earned),
            ..Default::default()
        };
        config_model.update(&db_tx).await?;
        db_tx.commit().await?;

        self.config.energy_balance += earned;

        Ok(StudyReceipt {
            log_id: log.id,
            earned_energy: earned,
            multiplier,
        })
    }

    /// Runs the once-per-day streak check. Idempotent within a calendar day.
    pub async fn daily_check(&mut self, today: NaiveDate) -> ResultEngine<CheckOutcome> {
        if self.config.last_check_date >= today {
            return Ok(CheckOutcome::AlreadyChecked);
        }

        let yesterday = today - Days::new(1);
        let minutes: i64 = study_logs::Entity::find()
            .filter(study_logs::Column::Date.eq(study_logs::date_key(yesterday)))
            .all(&self.database)
            .await?
            .iter()
            .map(|model| model.duration_minutes)
            .sum();
        let yesterday_hours = minutes as f64 / 60.0;

        let (next, outcome) = daily_check::advance(&self.config, today, yesterday_hours);
        config::ActiveModel::from(&next).update(&self.database).await?;
        self.config = next;

        Ok(outcome)
    }

    /// Lists the whole reward catalog.
    pub async fn rewards(&self) -> ResultEngine<Vec<RewardItem>> {
        let models = rewards::Entity::find().all(&self.database).await?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(RewardItem::try_from(model)?);
        }
        Ok(items)
    }

    /// Adds a user-defined reward. Duplicate names are allowed.
    pub async fn new_reward(
        &self,
        name: &str,
        cost: f64,
        description: Option<&str>,
    ) -> ResultEngine<Uuid> {
        if cost < 0.0 {
            return Err(EngineError::InvalidAmount("cost must be >= 0".to_string()));
        }

        let item = RewardItem::new(
            name.to_string(),
            cost,
            description.map(|s| s.to_string()),
        );
        rewards::ActiveModel::from(&item)
            .insert(&self.database)
            .await?;
        Ok(item.id)
    }

    /// Redeems a reward: spends its cost and, for freeze items, grants one
    /// streak freeze.
    ///
    /// A missing item and an unaffordable one are deliberately collapsed into
    /// the same rejection; nothing is mutated on failure.
    pub async fn redeem(&mut self, reward_id: Uuid) -> ResultEngine<RewardItem> {
        let item = rewards::Entity::find_by_id(reward_id.to_string())
            .one(&self.database)
            .await?
            .map(RewardItem::try_from)
            .transpose()?
            .ok_or_else(redemption_denied)?;

        if self.config.energy_balance < item.cost {
            return Err(redemption_denied());
        }

        let new_balance = self.config.energy_balance - item.cost;
        let new_freezes = if item.kind == ItemKind::Freeze {
            self.config.streak_freezes + 1
        } else {
            self.config.streak_freezes
        };

        let config_model = config::ActiveModel {
            id: ActiveValue::Set(CONFIG_KEY.to_string()),
            energy_balance: ActiveValue::Set(new_balance),
            streak_freezes: ActiveValue::Set(new_freezes),
            ..Default::default()
        };
        config_model.update(&self.database).await?;

        self.config.energy_balance = new_balance;
        self.config.streak_freezes = new_freezes;

        Ok(item)
    }

    async fn logs_for(&self, date: NaiveDate) -> ResultEngine<Vec<StudyLog>> {
        let models = study_logs::Entity::find()
            .filter(study_logs::Column::Date.eq(study_logs::date_key(date)))
            .all(&self.database)
            .await?;

        let mut logs = Vec::with_capacity(models.len());
        for model in models {
            logs.push(StudyLog::try_from(model)?);
        }
        Ok(logs)
    }
}

fn redemption_denied() -> EngineError {
    EngineError::RedemptionDenied("item not found or insufficient balance".to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    today: Option<NaiveDate>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the day used when seeding the configuration row. Defaults to
    /// the local calendar day; tests pin it.
    pub fn today(mut self, today: NaiveDate) -> EngineBuilder {
        self.today = Some(today);
        self
    }

    /// Construct `Engine`.
    ///
    /// First startup seeds the singleton configuration row and the system
    /// streak-freeze item; later startups read the persisted state back.
    pub async fn build(self) -> Result<Engine, EngineError> {
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let config = match config::Entity::find_by_id(CONFIG_KEY)
            .one(&self.database)
            .await?
        {
            Some(model) => UserConfig::try_from(model)?,
            None => {
                let config = UserConfig::new(today);
                config::ActiveModel::from(&config)
                    .insert(&self.database)
                    .await?;
                config
            }
        };

        let freeze_item = rewards::Entity::find()
            .filter(rewards::Column::Kind.eq(ItemKind::Freeze.as_str()))
            .one(&self.database)
            .await?;
        if freeze_item.is_none() {
            rewards::ActiveModel::from(&RewardItem::freeze_card())
                .insert(&self.database)
                .await?;
        }

        Ok(Engine {
            config,
            database: self.database,
        })
    }
}
