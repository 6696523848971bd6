//! Request/response payloads shared by the server and its clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What redeeming an item does besides spending energy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Freeze,
    Generic,
}

pub mod status {
    use super::*;

    /// One study log row as reported by the status endpoint.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StudyLogView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub duration_minutes: i64,
        pub note: Option<String>,
        pub earned_energy: f64,
    }

    /// The daily dashboard.
    ///
    /// `energy` is rounded to one decimal, `today_hours` and `multiplier` to
    /// two; the raw values stay in the engine.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Status {
        pub energy: f64,
        pub today_hours: f64,
        pub goal: f64,
        pub streak: i64,
        pub multiplier: f64,
        pub freezes: i64,
        pub logs: Vec<StudyLogView>,
    }
}

pub mod study {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StudyNew {
        pub duration_minutes: i64,
        pub note: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StudyLogged {
        pub earned_energy: f64,
        pub multiplier_applied: f64,
    }
}

pub mod check {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CheckDone {
        pub message: String,
    }
}

pub mod reward {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RewardNew {
        pub name: String,
        pub cost: f64,
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RewardCreated {
        pub id: Uuid,
        pub message: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RewardView {
        pub id: Uuid,
        pub name: String,
        pub cost: f64,
        pub description: Option<String>,
        pub kind: ItemKind,
        pub is_system_item: bool,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Redeemed {
        pub message: String,
    }
}
