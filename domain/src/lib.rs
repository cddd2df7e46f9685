//! Domain layer for duaonai
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Dua generation
//!
//! A [`DuaQuery`] is turned into a prompt, the model's free-form reply is
//! reduced to a JSON object, and the object is checked by the validator
//! before it becomes a [`DuaRecord`]:
//!
//! - **Extraction**: [`ResponseExtractor`] locates the JSON object in prose
//! - **Validation**: completeness, Urdu/Arabic distinctness, citation specificity
//! - **Retry**: [`GenerationMachine`] allows exactly one corrective retry and
//!   annotates a record that still fails instead of discarding it

pub mod conversation;
pub mod core;
pub mod dua;
pub mod prompt;

// Re-export commonly used types
pub use conversation::{Message, Role};
pub use core::{error::DomainError, model::Model, string::truncate};
pub use dua::{
    extract::{BraceSpanExtractor, ExtractionError, ResponseExtractor},
    generation::{
        Attempt, GenerationError, GenerationMachine, GenerationOutcome, GenerationState,
        GenerationStep,
    },
    query::DuaQuery,
    record::DuaRecord,
    validation::{ValidationFailure, ValidationOutcome, similarity, strip_diacritics, validate},
};
pub use prompt::DuaPromptTemplate;
