//! Study log entries.
//!
//! A log is immutable once created: the earned energy is computed at creation
//! time from the streak in effect and is never recomputed afterwards, even if
//! the streak or the reward rate later change.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded study session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudyLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub note: Option<String>,
    pub earned_energy: f64,
}

impl StudyLog {
    pub fn new(
        date: NaiveDate,
        duration_minutes: i64,
        note: Option<String>,
        earned_energy: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            duration_minutes,
            note,
            earned_energy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "study_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: String,
    pub duration_minutes: i64,
    pub note: Option<String>,
    pub earned_energy: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&StudyLog> for ActiveModel {
    fn from(log: &StudyLog) -> Self {
        Self {
            id: ActiveValue::Set(log.id.to_string()),
            date: ActiveValue::Set(log.date.format(DATE_FORMAT).to_string()),
            duration_minutes: ActiveValue::Set(log.duration_minutes),
            note: ActiveValue::Set(log.note.clone()),
            earned_energy: ActiveValue::Set(log.earned_energy),
        }
    }
}

impl TryFrom<Model> for StudyLog {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|_| EngineError::InvalidId(model.id.clone()))?;
        let date = NaiveDate::parse_from_str(&model.date, DATE_FORMAT)
            .map_err(|_| EngineError::InvalidDate(model.date.clone()))?;

        Ok(Self {
            id,
            date,
            duration_minutes: model.duration_minutes,
            note: model.note,
            earned_energy: model.earned_energy,
        })
    }
}

/// ISO date string used to filter log rows for a calendar day.
pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_round_trips_through_model() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let log = StudyLog::new(date, 90, Some("linear algebra".to_string()), 15.0);
        let model = Model {
            id: log.id.to_string(),
            date: "2026-08-29".to_string(),
            duration_minutes: 90,
            note: Some("linear algebra".to_string()),
            earned_energy: 15.0,
        };

        assert_eq!(StudyLog::try_from(model).unwrap(), log);
    }

    #[test]
    fn bad_id_is_rejected() {
        let err = StudyLog::try_from(Model {
            id: "nope".to_string(),
            date: "2026-08-29".to_string(),
            duration_minutes: 0,
            note: None,
            earned_energy: 0.0,
        })
        .unwrap_err();
        assert_eq!(err, EngineError::InvalidId("nope".to_string()));
    }
}
