//! Application layer for duaonai
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    progress::{GenerationProgressNotifier, NoGenerationProgress},
};
pub use use_cases::generate_dua::{GenerateDuaError, GenerateDuaInput, GenerateDuaUseCase};
