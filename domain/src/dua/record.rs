//! Dua record entity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The structured supplication returned to the caller (Entity)
///
/// All five text fields must be non-empty for the record to pass
/// validation. `note` is only set when the record failed validation twice
/// and is returned as a best-effort answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuaRecord {
    pub arabic_text: String,
    pub english_translation: String,
    pub urdu_translation: String,
    pub reference: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DuaRecord {
    /// Required fields, in the order the completeness check reports them
    pub const REQUIRED_FIELDS: [&'static str; 5] = [
        "arabic_text",
        "english_translation",
        "urdu_translation",
        "reference",
        "title",
    ];

    /// Build a record from a parsed JSON object.
    ///
    /// Missing, `null` and non-string values become empty strings so that
    /// the completeness check reports them. Unknown keys (including a
    /// model-supplied `note`) are dropped.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| -> String {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };

        Self {
            arabic_text: text("arabic_text"),
            english_translation: text("english_translation"),
            urdu_translation: text("urdu_translation"),
            reference: text("reference"),
            title: text("title"),
            note: None,
        }
    }

    /// Look up a required field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "arabic_text" => Some(&self.arabic_text),
            "english_translation" => Some(&self.english_translation),
            "urdu_translation" => Some(&self.urdu_translation),
            "reference" => Some(&self.reference),
            "title" => Some(&self.title),
            _ => None,
        }
    }

    /// Attach a caveat describing a validation failure that survived the retry
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether this record carries an unverified-content caveat
    pub fn is_annotated(&self) -> bool {
        self.note.is_some()
    }
}
