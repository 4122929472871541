//! JSON extractor with validation via the `validator` crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that is deserialized and then checked with [`Validate`].
///
/// Every failure (missing or wrong content type, malformed JSON, type
/// mismatches, rule violations) is answered with `400 {"message": ...}`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateTalk {
///     #[validate(length(min = 1))]
///     title: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateTalk>) -> String {
///     payload.title
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Talk {
        #[validate(length(min = 1, message = "Path `title` is required."))]
        title: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(talk): ValidatedJson<Talk>| async move { talk.title }),
        )
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = send(r#"{"title":"Rust meetup"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_violation_is_bad_request() {
        let (status, body) = send(r#"{"title":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed: title: Path `title` is required.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = send(r#"{"title":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("JSON"));
    }
}
