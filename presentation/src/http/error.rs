//! HTTP error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use duaonai_application::GenerateDuaError;
use duaonai_domain::Attempt;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by the dua endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Query is required")]
    MissingQuery,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Generation(#[from] GenerateDuaError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(GenerateDuaError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> serde_json::Value {
        match self {
            ApiError::MissingQuery => json!({ "error": "Query is required" }),
            ApiError::InvalidBody(message) => json!({
                "error": "Invalid request body",
                "message": message,
            }),
            ApiError::Generation(err) => match err {
                GenerateDuaError::Config(_) => json!({
                    "error": "Gemini API key is not configured",
                    "message": "Please set GEMINI_API_KEY in .env file",
                }),
                GenerateDuaError::Parse {
                    attempt, raw_text, ..
                } => json!({
                    "error": match attempt {
                        Attempt::First => "Failed to parse AI response",
                        Attempt::Retry => "Failed to parse AI response after retry",
                    },
                    "raw_response": raw_text,
                }),
                GenerateDuaError::Cancelled => json!({ "error": "Request cancelled" }),
                GenerateDuaError::Provider(message) => json!({
                    "error": "Failed to generate dua information",
                    "message": message,
                }),
                other => json!({
                    "error": "Failed to generate dua information",
                    "message": other.to_string(),
                }),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error generating dua: {}", self);
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parts(err: ApiError) -> (StatusCode, serde_json::Value) {
        (err.status(), err.body())
    }

    #[test]
    fn test_missing_query() {
        let (status, body) = parts(ApiError::MissingQuery);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Query is required" }));
    }

    #[test]
    fn test_config_error() {
        let (status, body) = parts(GenerateDuaError::Config("missing".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Gemini API key is not configured");
        assert_eq!(body["message"], "Please set GEMINI_API_KEY in .env file");
    }

    #[test]
    fn test_parse_errors_carry_raw_response() {
        let first = GenerateDuaError::Parse {
            attempt: Attempt::First,
            raw_text: "no json".into(),
            reason: duaonai_domain::ExtractionError::NoJsonSpan,
        };
        let (status, body) = parts(first.into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to parse AI response");
        assert_eq!(body["raw_response"], "no json");

        let retry = GenerateDuaError::Parse {
            attempt: Attempt::Retry,
            raw_text: "still none".into(),
            reason: duaonai_domain::ExtractionError::NoJsonSpan,
        };
        let (_, body) = parts(retry.into());
        assert_eq!(body["error"], "Failed to parse AI response after retry");
    }

    #[test]
    fn test_provider_error() {
        let (status, body) = parts(GenerateDuaError::Provider("quota exceeded".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate dua information");
        assert_eq!(body["message"], "quota exceeded");
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let (status, body) = parts(GenerateDuaError::Timeout(Duration::from_secs(30)).into());
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "Failed to generate dua information");
    }
}
