//! Prompt templates for dua generation
//!
//! - [`DuaPromptTemplate`]: system instruction, acknowledgement turn, and
//!   initial/retry user instructions

mod template;

pub use template::DuaPromptTemplate;
