//! Application-level configuration.
//!
//! - [`GenerationParams`]: model selection and per-call timeout for the dua pipeline

pub mod generation_params;

pub use generation_params::GenerationParams;
