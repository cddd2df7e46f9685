//! Gemini adapter
//!
//! Implements the [`LlmGateway`](duaonai_application::LlmGateway) port over
//! the Gemini `generateContent` REST endpoint.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::GeminiError;
pub use gateway::{DEFAULT_BASE_URL, GeminiLlmGateway};
