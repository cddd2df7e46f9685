//! LLM Gateway port
//!
//! Defines the interface for communicating with the generative text provider.

use async_trait::async_trait;
use duaonai_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

/// One chat-style call: system instruction, prior turns, and a new user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: Model,
    pub system_instruction: String,
    pub history: Vec<Message>,
    pub message: String,
}

impl ChatRequest {
    pub fn new(
        model: Model,
        system_instruction: impl Into<String>,
        history: Vec<Message>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            model,
            system_instruction: system_instruction.into(),
            history,
            message: message.into(),
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the
/// generative provider. Implementations (adapters) live in the
/// infrastructure layer and are constructed once at process start.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Check that credentials are usable without touching the network.
    ///
    /// Returns [`GatewayError::NotConfigured`] when they are not.
    fn ensure_configured(&self) -> Result<(), GatewayError>;

    /// Send a conversation and return the model's reply text.
    async fn send(&self, request: &ChatRequest) -> Result<String, GatewayError>;
}
