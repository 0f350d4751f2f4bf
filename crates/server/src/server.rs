use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use std::sync::Arc;

use crate::history;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/history", post(history::list))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
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
        engine: Arc::new(engine),
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
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use chrono::Utc;
    use engine::{BalanceType, Bsk, NewTransaction};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build().await.unwrap();

        for (minor, tx_type) in [
            (2550i64, "transfer_in"),
            (-500i64, "withdrawal"),
            (300i64, "ad_video_reward"),
        ] {
            engine
                .record_transaction(NewTransaction {
                    user_id: "alice".to_string(),
                    amount: Bsk::new(minor),
                    balance_type: BalanceType::Withdrawable,
                    tx_type: tx_type.to_string(),
                    description: None,
                    metadata: serde_json::Value::Null,
                    status: Some("completed".to_string()),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    async fn post_history(router: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/history")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn history_returns_page_and_statistics() {
        let router = test_router().await;
        let (status, body) =
            post_history(router, json!({"user_id": "alice", "page": 1})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 3);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 3);
        assert_eq!(body["statistics"]["total_earned_minor"], 2850);
        assert_eq!(body["statistics"]["total_spent_minor"], 500);
    }

    #[tokio::test]
    async fn statistics_are_skipped_when_not_requested() {
        let router = test_router().await;
        let (status, body) = post_history(
            router,
            json!({"user_id": "alice", "page": 1, "include_statistics": false}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["statistics"].is_null());
    }

    #[tokio::test]
    async fn filters_narrow_the_result() {
        let router = test_router().await;
        let (status, body) = post_history(
            router,
            json!({
                "user_id": "alice",
                "page": 1,
                "tx_types": ["withdrawal"],
                "max_amount_minor": -1,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["transactions"][0]["tx_type"], "withdrawal");
    }

    #[tokio::test]
    async fn invalid_page_is_unprocessable() {
        let router = test_router().await;
        let (status, _) =
            post_history(router, json!({"user_id": "alice", "page": 0})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
