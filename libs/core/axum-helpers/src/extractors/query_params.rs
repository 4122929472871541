//! Query string extractor with JSON error bodies.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Query string deserialized into `T`.
///
/// Unlike [`Query`], a query string that does not fit `T` is answered with
/// `400 {"message": ...}`.
///
/// ```ignore
/// async fn list(QueryParams(filter): QueryParams<EventFilter>) -> String {
///     format!("{:?}", filter)
/// }
/// ```
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(QueryParams(value))
    }
}
