//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, ReadyResponse, run_health_checks};

use crate::state::AppState;

/// Router exposing `GET /ready`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check: 200 while the event store answers a ping, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let storage = &state.storage;
    let check: HealthCheckFuture = Box::pin(async move {
        storage.ping().await.map_err(|e| e.to_string())
    });

    run_health_checks(vec![(storage.name(), check)]).await
}
