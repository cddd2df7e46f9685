//! Presentation layer for duaonai
//!
//! This crate contains CLI definitions, the HTTP API, output formatters
//! and progress reporters.

pub mod cli;
pub mod http;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use http::{AppState, RateLimit, ServerError, create_router, serve};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
