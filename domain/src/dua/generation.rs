//! Single-retry generation state machine.
//!
//! [`GenerationMachine`] owns every decision of the dua pipeline while
//! leaving I/O to the caller: the caller sends the prompt it is handed,
//! feeds the raw reply back in, and follows the returned [`GenerationStep`].
//!
//! ```text
//! Initial --start--> Sent --valid-----------------------> Finished (Accepted)
//!                     |  --unparseable-----------------> Finished (Unparseable)
//!                     |  --invalid--> RetrySent --valid--> Finished (Accepted)
//!                                        |  --invalid----> Finished (Annotated)
//!                                        |  --unparseable> Finished (Unparseable)
//! ```
//!
//! At most two prompts are ever produced. Parse failures never trigger a
//! retry; only content validation failures do.

use super::extract::{ExtractionError, ResponseExtractor};
use super::query::DuaQuery;
use super::record::DuaRecord;
use super::validation::{ValidationFailure, ValidationOutcome, validate};
use crate::conversation::Message;
use crate::prompt::DuaPromptTemplate;
use thiserror::Error;

/// Which model call a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retry,
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attempt::First => write!(f, "first"),
            Attempt::Retry => write!(f, "retry"),
        }
    }
}

/// Position in the generation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Initial,
    Sent,
    RetrySent,
    Finished,
}

/// Terminal result of a generation run
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The record passed validation
    Accepted { record: DuaRecord, attempt: Attempt },
    /// The retry still failed validation; the record carries a `note`
    Annotated {
        record: DuaRecord,
        failure: ValidationFailure,
    },
    /// No JSON object could be extracted from the response
    Unparseable {
        attempt: Attempt,
        raw: String,
        error: ExtractionError,
    },
}

/// What the caller must do after feeding in a response
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStep {
    /// Send `prompt` as the one corrective retry
    Retry {
        prompt: String,
        failure: ValidationFailure,
    },
    /// The run is over
    Done(GenerationOutcome),
}

/// Misuse of the state machine by its driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation already started (state: {0:?})")]
    AlreadyStarted(GenerationState),

    #[error("no prompt is awaiting a response (state: {0:?})")]
    UnexpectedResponse(GenerationState),
}

/// Drives one dua request through prompt, validation and optional retry.
#[derive(Debug, Clone)]
pub struct GenerationMachine {
    query: DuaQuery,
    state: GenerationState,
    history: Vec<Message>,
    pending_prompt: Option<String>,
}

impl GenerationMachine {
    pub fn new(query: DuaQuery) -> Self {
        Self {
            query,
            state: GenerationState::Initial,
            history: vec![Message::model(DuaPromptTemplate::acknowledgement())],
            pending_prompt: None,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Conversation turns that precede the prompt currently awaiting a reply
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Move `Initial → Sent` and return the first user instruction.
    pub fn start(&mut self) -> Result<String, GenerationError> {
        if self.state != GenerationState::Initial {
            return Err(GenerationError::AlreadyStarted(self.state));
        }

        let prompt = DuaPromptTemplate::initial_query(self.query.content());
        self.pending_prompt = Some(prompt.clone());
        self.state = GenerationState::Sent;
        Ok(prompt)
    }

    /// Feed in the raw model reply for the prompt last handed out.
    pub fn on_response(
        &mut self,
        raw: &str,
        extractor: &dyn ResponseExtractor,
    ) -> Result<GenerationStep, GenerationError> {
        let attempt = match self.state {
            GenerationState::Sent => Attempt::First,
            GenerationState::RetrySent => Attempt::Retry,
            state => return Err(GenerationError::UnexpectedResponse(state)),
        };

        if let Some(prompt) = self.pending_prompt.take() {
            self.history.push(Message::user(prompt));
        }
        self.history.push(Message::model(raw));

        let object = match extractor.extract(raw) {
            Ok(object) => object,
            Err(error) => {
                return Ok(self.finish(GenerationOutcome::Unparseable {
                    attempt,
                    raw: raw.to_string(),
                    error,
                }));
            }
        };

        let record = DuaRecord::from_object(&object);
        let failure = match validate(&record) {
            ValidationOutcome::Valid => {
                return Ok(self.finish(GenerationOutcome::Accepted { record, attempt }));
            }
            ValidationOutcome::Invalid(failure) => failure,
        };

        match attempt {
            Attempt::First => {
                let prompt = DuaPromptTemplate::retry_query(self.query.content(), &failure);
                self.pending_prompt = Some(prompt.clone());
                self.state = GenerationState::RetrySent;
                Ok(GenerationStep::Retry { prompt, failure })
            }
            Attempt::Retry => {
                let record = record.with_note(format!(
                    "Warning: {}. Please verify this information.",
                    failure
                ));
                Ok(self.finish(GenerationOutcome::Annotated { record, failure }))
            }
        }
    }

    fn finish(&mut self, outcome: GenerationOutcome) -> GenerationStep {
        self.state = GenerationState::Finished;
        GenerationStep::Done(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::dua::extract::BraceSpanExtractor;

    const VALID: &str = r#"Here you go:
{
  "arabic_text": "سُبْحَانَ الَّذِي سَخَّرَ لَنَا هَذَا",
  "english_translation": "Glory be to Him who has subjected this to us",
  "urdu_translation": "پاک ہے وہ ذات جس نے اسے ہمارے لیے مسخر کیا",
  "reference": "Sunan Ibn Majah",
  "title": "Dua for Travel"
}"#;

    const URDU_COPY: &str = r#"{
  "arabic_text": "سُبْحَانَ الَّذِي سَخَّرَ لَنَا هَذَا",
  "english_translation": "Glory be to Him who has subjected this to us",
  "urdu_translation": "سبحان الذي سخر لنا هذا",
  "reference": "Quran 43:13",
  "title": "Dua for Travel"
}"#;

    fn machine() -> GenerationMachine {
        GenerationMachine::new(DuaQuery::try_new("dua for travel").unwrap())
    }

    #[test]
    fn test_start_moves_to_sent() {
        let mut m = machine();
        assert_eq!(m.state(), GenerationState::Initial);

        let prompt = m.start().unwrap();
        assert!(prompt.contains("dua for travel"));
        assert_eq!(m.state(), GenerationState::Sent);
        assert_eq!(m.history().len(), 1);
        assert_eq!(m.history()[0].role, Role::Model);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut m = machine();
        m.start().unwrap();
        assert_eq!(
            m.start(),
            Err(GenerationError::AlreadyStarted(GenerationState::Sent))
        );
    }

    #[test]
    fn test_response_before_start_is_rejected() {
        let mut m = machine();
        assert_eq!(
            m.on_response(VALID, &BraceSpanExtractor),
            Err(GenerationError::UnexpectedResponse(GenerationState::Initial))
        );
    }

    #[test]
    fn test_valid_first_response_is_accepted() {
        let mut m = machine();
        m.start().unwrap();

        let step = m.on_response(VALID, &BraceSpanExtractor).unwrap();
        match step {
            GenerationStep::Done(GenerationOutcome::Accepted { record, attempt }) => {
                assert_eq!(attempt, Attempt::First);
                assert_eq!(record.reference, "Sunan Ibn Majah");
                assert_eq!(record.note, None);
            }
            other => panic!("Expected Accepted, got {:?}", other),
        }
        assert_eq!(m.state(), GenerationState::Finished);
    }

    #[test]
    fn test_unparseable_first_response_does_not_retry() {
        let mut m = machine();
        m.start().unwrap();

        let raw = "I cannot find an authentic reference for this dua.";
        let step = m.on_response(raw, &BraceSpanExtractor).unwrap();
        assert_eq!(
            step,
            GenerationStep::Done(GenerationOutcome::Unparseable {
                attempt: Attempt::First,
                raw: raw.to_string(),
                error: ExtractionError::NoJsonSpan,
            })
        );
        assert_eq!(m.state(), GenerationState::Finished);
    }

    #[test]
    fn test_invalid_first_response_requests_one_retry() {
        let mut m = machine();
        let first_prompt = m.start().unwrap();

        let step = m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();
        let GenerationStep::Retry { prompt, failure } = step else {
            panic!("Expected a retry step");
        };
        assert!(failure.concerns_urdu());
        assert!(prompt.contains("PROPER URDU TRANSLATION"));
        assert_eq!(m.state(), GenerationState::RetrySent);

        // Retry keeps the first exchange as context
        let history = m.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], Message::user(first_prompt));
        assert_eq!(history[2], Message::model(URDU_COPY));
    }

    #[test]
    fn test_valid_retry_is_accepted_without_note() {
        let mut m = machine();
        m.start().unwrap();
        m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();

        let step = m.on_response(VALID, &BraceSpanExtractor).unwrap();
        match step {
            GenerationStep::Done(GenerationOutcome::Accepted { record, attempt }) => {
                assert_eq!(attempt, Attempt::Retry);
                assert!(!record.is_annotated());
            }
            other => panic!("Expected Accepted, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_retry_is_annotated() {
        let mut m = machine();
        m.start().unwrap();
        m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();

        let step = m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();
        match step {
            GenerationStep::Done(GenerationOutcome::Annotated { record, failure }) => {
                assert!(failure.concerns_urdu());
                let note = record.note.unwrap();
                assert!(note.starts_with("Warning: The Urdu translation appears to be a copy"));
                assert!(note.ends_with("Please verify this information."));
                assert_eq!(record.title, "Dua for Travel");
            }
            other => panic!("Expected Annotated, got {:?}", other),
        }
        assert_eq!(m.state(), GenerationState::Finished);
    }

    #[test]
    fn test_unparseable_retry_response() {
        let mut m = machine();
        m.start().unwrap();
        m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();

        let step = m.on_response("{ not json }", &BraceSpanExtractor).unwrap();
        match step {
            GenerationStep::Done(GenerationOutcome::Unparseable { attempt, raw, error }) => {
                assert_eq!(attempt, Attempt::Retry);
                assert_eq!(raw, "{ not json }");
                assert!(matches!(error, ExtractionError::Malformed(_)));
            }
            other => panic!("Expected Unparseable, got {:?}", other),
        }
    }

    #[test]
    fn test_no_third_call_after_finish() {
        let mut m = machine();
        m.start().unwrap();
        m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();
        m.on_response(URDU_COPY, &BraceSpanExtractor).unwrap();

        assert_eq!(
            m.on_response(VALID, &BraceSpanExtractor),
            Err(GenerationError::UnexpectedResponse(GenerationState::Finished))
        );
    }
}
