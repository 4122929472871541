//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Single `{id}` path segment parsed as a UUID.
///
/// A segment that is not a UUID is rejected with `400 {"message": "Invalid id: <raw>"}`
/// before the handler runs.
///
/// ```ignore
/// async fn get_event(UuidPath(id): UuidPath) -> String {
///     format!("Event {}", id)
/// }
///
/// let app = Router::new().route("/{id}", get(get_event));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&raw)
            .map(UuidPath)
            .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)).into_response())
    }
}
