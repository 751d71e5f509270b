//! Health check handlers.

use crate::constants::READINESS_CHECK_TIMEOUT;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(liveness_check))
        .route("/health/ready", get(readiness_check))
}

/// Run an async check with timeout; returns "healthy", "timeout" or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
struct ReadinessResponse {
    status: &'static str,
    record_store: String,
    backend: String,
}

/// Liveness probe - process is running.
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the record store answers.
async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let record_store = run_check(
        READINESS_CHECK_TIMEOUT,
        state.store.health_check(),
        "unhealthy",
    )
    .await;

    let ready = record_store == "healthy";
    if !ready {
        tracing::error!(record_store = %record_store, "Readiness check failed");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            record_store,
            backend: state.store.backend_type().to_string(),
        }),
    )
}
