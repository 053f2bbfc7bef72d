use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// `Json` extractor whose rejections come back in the `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parses an optional JSON request body. An empty body means `T::default()`;
/// anything else must deserialize.
pub fn optional_json<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct Body {
        name: Option<String>,
    }

    #[test]
    fn test_optional_json_empty_is_default() {
        let body: Body = optional_json(b"").unwrap();
        assert!(body.name.is_none());
        let body: Body = optional_json(b" \n").unwrap();
        assert!(body.name.is_none());
    }

    #[test]
    fn test_optional_json_rejects_malformed() {
        let body: Body = optional_json(br#"{"name":"x"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("x"));
        assert!(matches!(
            optional_json::<Body>(br#"{"name":5}"#),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(optional_json::<Body>(b"{"), Err(AppError::Validation(_))));
    }
}
