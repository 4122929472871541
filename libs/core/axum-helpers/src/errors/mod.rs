pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Body sent to clients for every 5xx response; details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error body returned by every failing endpoint.
///
/// ```json
/// { "message": "Event not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {}", validation_message(.0))]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// The payload is logged; clients only see [`SERVER_ERROR_MESSAGE`].
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::QueryExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!("JSON extraction error: {}", e.body_text());
                e.body_text()
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::info!("Query extraction error: {}", e.body_text());
                e.body_text()
            }
            AppError::ValidationError(e) => {
                let message = validation_message(&e);
                tracing::info!("Validation error: {}", message);
                message
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                msg
            }
            AppError::InternalServerError(detail) => {
                tracing::error!("Internal server error: {}", detail);
                SERVER_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Flatten validator errors into one line, fields in alphabetical order:
/// `Validation failed: price: ..., title: ...`.
///
/// Each error contributes its custom `message` when set, otherwise its code.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_messages(errors, "", &mut parts);
    parts.sort();
    format!("Validation failed: {}", parts.join(", "))
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, parts: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let text = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    parts.push(format!("{}: {}", path, text));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, parts),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{}[{}]", path, index), parts);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn body_of(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) =
            body_of(AppError::InternalServerError("connection reset by peer".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Server error");
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let (status, body) = body_of(AppError::NotFound("Event not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ErrorResponse::new("Event not found"));
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            ValidationError::new("required").with_message("Path `title` is required.".into()),
        );

        let (status, body) = body_of(AppError::ValidationError(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Validation failed: title: Path `title` is required.");
    }

    #[test]
    fn test_validation_message_sorts_fields_and_falls_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("topic", ValidationError::new("length"));
        errors.add(
            "date",
            ValidationError::new("required").with_message("Path `date` is required.".into()),
        );

        assert_eq!(
            validation_message(&errors),
            "Validation failed: date: Path `date` is required., topic: length"
        );
    }
}
