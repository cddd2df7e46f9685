//! Configuration file loading for duaonai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `DUAONAI_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./duaonai.toml` or `./.duaonai.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/duaonai/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGeminiConfig, FileLoggingConfig, FileRateLimitConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
