//! LLM Gateway implementation for the Gemini REST API

use super::error::{GeminiError, Result};
use super::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use duaonai_application::{ChatRequest, GatewayError, LlmGateway};
use duaonai_domain::Model;
use tracing::{debug, info};

/// Default base URL of the Gemini API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Value shipped in the sample `.env`; treated the same as a missing key
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// LLM Gateway backed by Gemini `generateContent`
///
/// Holds one pooled [`reqwest::Client`]; construct once at startup and share
/// behind an `Arc<dyn LlmGateway>`.
pub struct GeminiLlmGateway {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiLlmGateway {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    fn endpoint(&self, model: &Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate(&self, request: &ChatRequest) -> Result<String> {
        let api_key = self.usable_key().ok_or(GeminiError::MissingApiKey)?;
        let body = GenerateContentRequest::from_chat(request);

        info!("Sending prompt to Gemini API ({})", request.model);
        debug!("Conversation turns: {}", body.contents.len());

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        if let Some(reason) = parsed.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        let text = parsed.text().ok_or(GeminiError::NoText)?;
        debug!("Received {} bytes from Gemini", text.len());
        Ok(text)
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    fn ensure_configured(&self) -> std::result::Result<(), GatewayError> {
        self.usable_key()
            .map(|_| ())
            .ok_or_else(|| GeminiError::MissingApiKey.into())
    }

    async fn send(&self, request: &ChatRequest) -> std::result::Result<String, GatewayError> {
        self.generate(request).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use duaonai_domain::Message;
    use serde_json::{Value, json};

    fn chat() -> ChatRequest {
        ChatRequest::new(
            Model::Gemini15Flash,
            "system",
            vec![Message::model("ack")],
            "Please provide the dua for: travel.",
        )
    }

    /// Serve `router` on an ephemeral port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    #[test]
    fn test_ensure_configured() {
        assert!(GeminiLlmGateway::new(Some("abc123".into()))
            .ensure_configured()
            .is_ok());

        for key in [None, Some(""), Some("   "), Some("YOUR_API_KEY")] {
            let gateway = GeminiLlmGateway::new(key.map(String::from));
            assert!(matches!(
                gateway.ensure_configured(),
                Err(GatewayError::NotConfigured(_))
            ));
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = GeminiLlmGateway::with_base_url(None, "http://localhost:9999/v1beta/");
        assert_eq!(
            gateway.endpoint(&Model::Gemini20Flash),
            "http://localhost:9999/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_send_returns_candidate_text() {
        let router = Router::new().route(
            "/v1beta/models/gemini-1.5-flash:generateContent",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-goog-api-key"], "secret");
                assert_eq!(body["contents"].as_array().unwrap().len(), 3);
                Json(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "{\"title\": \"Dua\"}"}]},
                        "finishReason": "STOP"
                    }]
                }))
            }),
        );
        let base_url = serve(router).await;
        let gateway = GeminiLlmGateway::with_base_url(Some("secret".into()), base_url);

        let text = gateway.send(&chat()).await.unwrap();
        assert_eq!(text, r#"{"title": "Dua"}"#);
    }

    #[tokio::test]
    async fn test_send_surfaces_api_error_message() {
        let router = Router::new().route(
            "/v1beta/models/gemini-1.5-flash:generateContent",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}})),
                )
            }),
        );
        let base_url = serve(router).await;
        let gateway = GeminiLlmGateway::with_base_url(Some("bad".into()), base_url);

        match gateway.send(&chat()).await {
            Err(GatewayError::RequestFailed(msg)) => assert!(msg.contains("API key not valid.")),
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_without_text_is_empty_response() {
        let router = Router::new().route(
            "/v1beta/models/gemini-1.5-flash:generateContent",
            post(|| async { Json(json!({"candidates": []})) }),
        );
        let base_url = serve(router).await;
        let gateway = GeminiLlmGateway::with_base_url(Some("secret".into()), base_url);

        assert_eq!(
            gateway.send(&chat()).await,
            Err(GatewayError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_send_without_key_makes_no_request() {
        let gateway = GeminiLlmGateway::with_base_url(None, "http://127.0.0.1:1/v1beta");
        assert!(matches!(
            gateway.send(&chat()).await,
            Err(GatewayError::NotConfigured(_))
        ));
    }
}
