//! Dua generation subdomain.
//!
//! - [`query::DuaQuery`]: validated topic supplied by the caller
//! - [`record::DuaRecord`]: the structured result returned to the caller
//! - [`extract`]: locating a JSON object in free-form model output
//! - [`validation`]: content authenticity checks
//! - [`generation`]: the single-retry state machine tying them together

pub mod extract;
pub mod generation;
pub mod query;
pub mod record;
pub mod validation;
