//! Status API endpoint

use api_types::status::{Status, StudyLogView};
use axum::{Json, extract::State};
use chrono::Local;

use crate::{ServerError, round_to, server::ServerState};

/// Handle requests for the daily dashboard.
pub async fn get(State(state): State<ServerState>) -> Result<Json<Status>, ServerError> {
    let engine = state.engine.read().await;
    let snapshot = engine.status(Local::now().date_naive()).await?;

    let logs = snapshot
        .logs
        .into_iter()
        .map(|log| StudyLogView {
            id: log.id,
            date: log.date,
            duration_minutes: log.duration_minutes,
            note: log.note,
            earned_energy: log.earned_energy,
        })
        .collect();

    Ok(Json(Status {
        energy: round_to(snapshot.energy_balance, 1),
        today_hours: round_to(snapshot.today_hours, 2),
        goal: snapshot.daily_goal_hours,
        streak: snapshot.current_streak,
        multiplier: round_to(snapshot.multiplier, 2),
        freezes: snapshot.streak_freezes,
        logs,
    }))
}
