//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

use crate::gemini::DEFAULT_BASE_URL;
use duaonai_application::GenerationParams;
use duaonai_domain::Model;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("gemini.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("gemini.model cannot be empty")]
    EmptyModelName,

    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("server.rate_limit.burst cannot be 0")]
    InvalidRateLimitBurst,

    #[error("server.rate_limit.per_seconds cannot be 0")]
    InvalidRateLimitPeriod,
}

/// Gemini provider configuration (`[gemini]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Gemini API.
    pub base_url: String,
    /// Model every request is sent to.
    pub model: String,
    /// Per-call timeout in seconds. Every call is bounded; 0 is rejected.
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: Model::default().to_string(),
            timeout_seconds: 30,
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key: explicit `api_key` first, then `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

/// Per-IP rate limiting (`[server.rate_limit]` section).
///
/// One request token is replenished every `per_seconds`; up to `burst`
/// tokens may accumulate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitConfig {
    pub enabled: bool,
    pub per_seconds: u64,
    pub burst: u32,
}

impl Default for FileRateLimitConfig {
    fn default() -> Self {
        // ~100 requests per 15 minutes
        Self {
            enabled: true,
            per_seconds: 9,
            burst: 100,
        }
    }
}

/// HTTP server configuration (`[server]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit: FileRateLimitConfig,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            rate_limit: FileRateLimitConfig::default(),
        }
    }
}

/// Logging configuration (`[logging]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily rolling operation log (disabled when unset).
    pub directory: Option<PathBuf>,
    /// JSONL transcript of model exchanges (disabled when unset).
    pub conversation_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gemini: FileGeminiConfig,
    pub server: FileServerConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gemini.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        let rate_limit = &self.server.rate_limit;
        if rate_limit.enabled && rate_limit.burst == 0 {
            return Err(ConfigValidationError::InvalidRateLimitBurst);
        }
        if rate_limit.enabled && rate_limit.per_seconds == 0 {
            return Err(ConfigValidationError::InvalidRateLimitPeriod);
        }
        Ok(())
    }

    /// Build the use case parameters from the `[gemini]` section.
    pub fn to_generation_params(&self) -> Result<GenerationParams, ConfigValidationError> {
        let model: Model = self
            .gemini
            .model
            .parse()
            .map_err(|_| ConfigValidationError::EmptyModelName)?;
        Ok(GenerationParams::default()
            .with_model(model)
            .with_call_timeout(Some(Duration::from_secs(self.gemini.timeout_seconds))))
    }
}
