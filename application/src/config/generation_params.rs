//! Generation parameters: model call control.
//!
//! [`GenerationParams`] groups the static parameters that control how
//! [`GenerateDuaUseCase`](crate::use_cases::generate_dua::GenerateDuaUseCase)
//! talks to the model. These are application-layer concerns, not domain policy.

use duaonai_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for a single model call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Model call control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model every call in the request is sent to.
    pub model: Model,
    /// Timeout applied to each model call separately (`None` = unbounded).
    pub call_timeout: Option<Duration>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.model, Model::Gemini15Flash);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_builder() {
        let params = GenerationParams::default()
            .with_model(Model::Gemini20Flash)
            .with_call_timeout(None);
        assert_eq!(params.model, Model::Gemini20Flash);
        assert_eq!(params.call_timeout, None);
    }
}
