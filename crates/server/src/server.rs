use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{rewards, status, study};
use engine::Engine;

/// Shared handler state.
///
/// The lock is the single-writer guard around the singleton configuration:
/// mutating handlers take it for write, so a read-modify-write can never
/// interleave with another mutation.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/status", get(status::get))
        .route("/study", post(study::log_study))
        .route("/dailyCheck", post(study::daily_check))
        .route("/rewards", get(rewards::list).post(rewards::add))
        .route("/redeem/{reward_id}", post(rewards::redeem))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build().await.unwrap();

        router(ServerState {
            engine: Arc::new(RwLock::new(engine)),
        })
    }

    async fn send_json(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn status_starts_empty() {
        let router = test_router().await;
        let (status, body) = send_json(&router, "GET", "/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["energy"], 0.0);
        assert_eq!(body["streak"], 0);
        assert_eq!(body["goal"], 4.0);
        assert_eq!(body["multiplier"], 1.0);
        assert_eq!(body["freezes"], 0);
        assert!(body["logs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn logging_study_earns_energy() {
        let router = test_router().await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/study",
            Some(json!({"duration_minutes": 240, "note": "calculus"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["earned_energy"], 40.0);
        assert_eq!(body["multiplier_applied"], 1.0);

        let (_, body) = send_json(&router, "GET", "/status", None).await;
        assert_eq!(body["energy"], 40.0);
        assert_eq!(body["today_hours"], 4.0);
        assert_eq!(body["logs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn negative_duration_is_rejected() {
        let router = test_router().await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/study",
            Some(json!({"duration_minutes": -10, "note": null})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("duration_minutes"));
    }

    #[tokio::test]
    async fn daily_check_is_a_noop_on_seed_day() {
        // The engine was seeded today, so the check already counts as done.
        let router = test_router().await;

        let (status, body) = send_json(&router, "POST", "/dailyCheck", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Checked");
    }

    #[tokio::test]
    async fn catalog_lists_the_seeded_freeze_card() {
        let router = test_router().await;

        let (status, body) = send_json(&router, "GET", "/rewards", None).await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["kind"], "freeze");
        assert_eq!(items[0]["cost"], 30.0);
        assert_eq!(items[0]["is_system_item"], true);
    }

    #[tokio::test]
    async fn adding_and_redeeming_a_reward() {
        let router = test_router().await;

        // Earn 60 energy first.
        send_json(
            &router,
            "POST",
            "/study",
            Some(json!({"duration_minutes": 360, "note": null})),
        )
        .await;

        let (status, body) = send_json(
            &router,
            "POST",
            "/rewards",
            Some(json!({"name": "Movie night", "cost": 25.0, "description": "one film"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send_json(&router, "POST", &format!("/redeem/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Redeemed");

        let (_, body) = send_json(&router, "GET", "/status", None).await;
        assert_eq!(body["energy"], 35.0);
    }

    #[tokio::test]
    async fn unaffordable_redemption_is_denied() {
        let router = test_router().await;

        let (_, items) = send_json(&router, "GET", "/rewards", None).await;
        let id = items[0]["id"].as_str().unwrap().to_string();

        let (status, body) = send_json(&router, "POST", &format!("/redeem/{id}"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("not found or insufficient balance")
        );
    }

    #[tokio::test]
    async fn negative_cost_reward_is_rejected() {
        let router = test_router().await;

        let (status, _) = send_json(
            &router,
            "POST",
            "/rewards",
            Some(json!({"name": "Scam", "cost": -5.0, "description": null})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
