//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: generative models the pipeline can target
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
