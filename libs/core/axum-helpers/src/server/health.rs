use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Aggregated readiness: `"ready"` plus each dependency as `"connected"`
/// or `"disconnected"`.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub services: BTreeMap<String, &'static str>,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs the named checks concurrently.
///
/// `200` when every check passes, `503` otherwise. The body lists each
/// check either way.
///
/// ```ignore
/// let mongodb: HealthCheckFuture =
///     Box::pin(async { ping(&client).await.map_err(|e| e.to_string()) });
/// run_health_checks(vec![("mongodb", mongodb)]).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<ReadyResponse>) {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let results = join_all(checks.into_iter().map(|(_, check)| check)).await;

    let mut services = BTreeMap::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                services.insert(name.to_string(), "connected");
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                services.insert(name.to_string(), "disconnected");
                all_healthy = false;
            }
        }
    }

    let response = ReadyResponse {
        status: if all_healthy { "ready" } else { "not ready" },
        services,
    };

    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness handler: always `200` while the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// Router exposing `GET /health`.
///
/// ```ignore
/// let app = router.merge(health_router(core_config::app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
