//! Event domain error types

use axum_helpers::{AppError, validation_message};
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Message returned to clients for an unknown event id.
pub const NOT_FOUND_MESSAGE: &str = "Event not found";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {id}")]
    NotFound { id: String },

    /// Already formatted for clients
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Database(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Database(format!("BSON deserialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(validation_message(&err))
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { .. } => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            EventError::Validation(message) => AppError::BadRequest(message),
            EventError::Database(message) | EventError::Internal(message) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        AppError::from(self).into_response()
    }
}
