//! Progress notification port
//!
//! Defines the interface for reporting progress while a dua is generated.

use duaonai_domain::{Attempt, Model, ValidationFailure};

/// Callback for progress updates during dua generation
///
/// Implementations live in the presentation layer (e.g. a terminal spinner).
/// Every method has a no-op default.
pub trait GenerationProgressNotifier: Send + Sync {
    /// Called right before a model call is issued
    fn on_model_call_start(&self, _model: &Model, _attempt: Attempt) {}

    /// Called when a model call returned text
    fn on_model_call_end(&self, _attempt: Attempt) {}

    /// Called when a response failed validation and a retry follows
    fn on_validation_failed(&self, _failure: &ValidationFailure) {}

    /// Called once the run is over, successfully or not
    fn on_finished(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoGenerationProgress;

impl GenerationProgressNotifier for NoGenerationProgress {}
