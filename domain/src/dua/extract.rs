//! JSON extraction from free-form model output.
//!
//! Models tend to wrap the requested JSON in prose or markdown code fences.
//! [`BraceSpanExtractor`] tolerates this by taking the greedy span from the
//! first `{` to the last `}` and parsing it, without a full tokenizer.
//!
//! The [`ResponseExtractor`] trait keeps this heuristic swappable, e.g. for a
//! provider mode that returns schema-constrained JSON directly.

use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a model response could not be turned into a JSON object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no JSON object found in response")]
    NoJsonSpan,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("JSON value is not an object")]
    NotAnObject,
}

/// Turns raw model text into a structured object
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Result<Map<String, Value>, ExtractionError>;
}

/// Greedy `{ ... }` span extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceSpanExtractor;

impl BraceSpanExtractor {
    /// Locate the span from the first `{` through the last `}`.
    pub fn find_span(raw: &str) -> Option<&str> {
        let start = raw.find('{')?;
        let end = raw.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&raw[start..=end])
    }
}

impl ResponseExtractor for BraceSpanExtractor {
    fn extract(&self, raw: &str) -> Result<Map<String, Value>, ExtractionError> {
        let span = Self::find_span(raw).ok_or(ExtractionError::NoJsonSpan)?;

        match serde_json::from_str::<Value>(span) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ExtractionError::NotAnObject),
            Err(e) => Err(ExtractionError::Malformed(e.to_string())),
        }
    }
}
