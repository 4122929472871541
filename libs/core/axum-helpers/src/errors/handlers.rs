use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
}
