//! The singleton user configuration and the streak multiplier.
//!
//! There is exactly one configuration row, stored under the well-known key
//! [`CONFIG_KEY`]. It is created by the engine builder at first startup and
//! mutated by every operation, never deleted.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Primary key of the singleton configuration row.
pub const CONFIG_KEY: &str = "default";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earning bonus for a given streak: 5% per consecutive day, capped.
///
/// With the default cap of 1.5 the bonus maxes out at a ten day streak.
pub fn multiplier(streak: i64, cap: f64) -> f64 {
    (1.0 + streak as f64 * 0.05).min(cap)
}

/// The per-user accounting state.
///
/// `energy_balance` is signed: missed-goal penalties may push it below zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    pub energy_balance: f64,
    pub daily_goal_hours: f64,
    pub base_reward_rate: f64,
    pub penalty_amount: f64,
    pub last_check_date: NaiveDate,
    pub current_streak: i64,
    pub streak_freezes: i64,
    pub max_streak_bonus: f64,
}

impl UserConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            energy_balance: 0.0,
            daily_goal_hours: 4.0,
            base_reward_rate: 10.0,
            penalty_amount: 50.0,
            last_check_date: today,
            current_streak: 0,
            streak_freezes: 0,
            max_streak_bonus: 1.5,
        }
    }

    /// The multiplier currently in effect, `max_streak_bonus` acting as cap.
    pub fn multiplier(&self) -> f64 {
        multiplier(self.current_streak, self.max_streak_bonus)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub energy_balance: f64,
    pub daily_goal_hours: f64,
    pub base_reward_rate: f64,
    pub penalty_amount: f64,
    pub last_check_date: String,
    pub current_streak: i64,
    pub streak_freezes: i64,
    pub max_streak_bonus: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&UserConfig> for ActiveModel {
    fn from(config: &UserConfig) -> Self {
        Self {
            id: ActiveValue::Set(CONFIG_KEY.to_string()),
            energy_balance: ActiveValue::Set(config.energy_balance),
            daily_goal_hours: ActiveValue::Set(config.daily_goal_hours),
            base_reward_rate: ActiveValue::Set(config.base_reward_rate),
            penalty_amount: ActiveValue::Set(config.penalty_amount),
            last_check_date: ActiveValue::Set(config.last_check_date.format(DATE_FORMAT).to_string()),
            current_streak: ActiveValue::Set(config.current_streak),
            streak_freezes: ActiveValue::Set(config.streak_freezes),
            max_streak_bonus: ActiveValue::Set(config.max_streak_bonus),
        }
    }
}

impl TryFrom<Model> for UserConfig {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let last_check_date = NaiveDate::parse_from_str(&model.last_check_date, DATE_FORMAT)
            .map_err(|_| EngineError::InvalidDate(model.last_check_date.clone()))?;

        Ok(Self {
            energy_balance: model.energy_balance,
            daily_goal_hours: model.daily_goal_hours,
            base_reward_rate: model.base_reward_rate,
            penalty_amount: model.penalty_amount,
            last_check_date,
            current_streak: model.current_streak,
            streak_freezes: model.streak_freezes,
            max_streak_bonus: model.max_streak_bonus,
        })
    }
}
