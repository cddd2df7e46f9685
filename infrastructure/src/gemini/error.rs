//! Error types for the Gemini adapter

use duaonai_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Response contained no text")]
    NoText,
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => GatewayError::NotConfigured(err.to_string()),
            GeminiError::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                GatewayError::ConnectionError(err.to_string())
            }
            GeminiError::NoText => GatewayError::EmptyResponse,
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_provider_message() {
        let err = GeminiError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        match GatewayError::from(err) {
            GatewayError::RequestFailed(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("Resource has been exhausted"));
            }
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_maps_to_not_configured() {
        assert!(matches!(
            GatewayError::from(GeminiError::MissingApiKey),
            GatewayError::NotConfigured(_)
        ));
        assert_eq!(
            GatewayError::from(GeminiError::NoText),
            GatewayError::EmptyResponse
        );
    }
}
