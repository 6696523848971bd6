//! Study log and daily check API endpoints

use api_types::{
    check::CheckDone,
    study::{StudyLogged, StudyNew},
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Local;
use engine::CheckOutcome;

use crate::{ServerError, round_to, server::ServerState};

pub async fn log_study(
    State(state): State<ServerState>,
    Json(payload): Json<StudyNew>,
) -> Result<(StatusCode, Json<StudyLogged>), ServerError> {
    let mut engine = state.engine.write().await;
    let receipt = engine
        .log_study(
            payload.duration_minutes,
            payload.note.as_deref(),
            Local::now().date_naive(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StudyLogged {
            earned_energy: round_to(receipt.earned_energy, 1),
            multiplier_applied: round_to(receipt.multiplier, 2),
        }),
    ))
}

pub async fn daily_check(
    State(state): State<ServerState>,
) -> Result<Json<CheckDone>, ServerError> {
    let mut engine = state.engine.write().await;
    let outcome = engine.daily_check(Local::now().date_naive()).await?;

    let message = match outcome {
        CheckOutcome::AlreadyChecked => "Checked",
        CheckOutcome::Checked { .. } => "Daily check done",
    };

    Ok(Json(CheckDone {
        message: message.to_string(),
    }))
}
