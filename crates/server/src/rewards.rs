//! Reward catalog API endpoints

use api_types::reward::{Redeemed, RewardCreated, RewardNew, RewardView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::ItemKind) -> api_types::ItemKind {
    match kind {
        engine::ItemKind::Freeze => api_types::ItemKind::Freeze,
        engine::ItemKind::Generic => api_types::ItemKind::Generic,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<RewardView>>, ServerError> {
    let engine = state.engine.read().await;
    let items = engine.rewards().await?;

    let views = items
        .into_iter()
        .map(|item| RewardView {
            id: item.id,
            name: item.name,
            cost: item.cost,
            description: item.description,
            kind: map_kind(item.kind),
            is_system_item: item.is_system_item,
        })
        .collect();

    Ok(Json(views))
}

pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<RewardNew>,
) -> Result<(StatusCode, Json<RewardCreated>), ServerError> {
    let engine = state.engine.read().await;
    let id = engine
        .new_reward(&payload.name, payload.cost, payload.description.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RewardCreated {
            id,
            message: "Added".to_string(),
        }),
    ))
}

pub async fn redeem(
    State(state): State<ServerState>,
    Path(reward_id): Path<Uuid>,
) -> Result<Json<Redeemed>, ServerError> {
    let mut engine = state.engine.write().await;
    engine.redeem(reward_id).await?;

    Ok(Json(Redeemed {
        message: "Redeemed".to_string(),
    }))
}
