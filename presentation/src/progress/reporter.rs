//! Progress reporting for dua generation

use colored::Colorize;
use duaonai_application::GenerationProgressNotifier;
use duaonai_domain::{Attempt, Model, ValidationFailure};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a terminal spinner
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn attempt_label(attempt: Attempt) -> &'static str {
        match attempt {
            Attempt::First => "Asking",
            Attempt::Retry => "Retrying",
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgressNotifier for ProgressReporter {
    fn on_model_call_start(&self, model: &Model, attempt: Attempt) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::attempt_label(attempt));
        pb.set_message(model.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_model_call_end(&self, _attempt: Attempt) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
    }

    fn on_validation_failed(&self, failure: &ValidationFailure) {
        eprintln!("{} {}", "!".yellow().bold(), failure.to_string().yellow());
    }

    fn on_finished(&self, _success: bool) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Used with `-v`, where log lines would tear a spinner apart.
pub struct SimpleProgress;

impl GenerationProgressNotifier for SimpleProgress {
    fn on_model_call_start(&self, model: &Model, attempt: Attempt) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::attempt_label(attempt).bold(),
            model
        );
    }

    fn on_validation_failed(&self, failure: &ValidationFailure) {
        eprintln!("  {} {}", "x".red(), failure);
    }

    fn on_finished(&self, success: bool) {
        if success {
            eprintln!("  {} done", "v".green());
        } else {
            eprintln!("  {} failed", "x".red());
        }
    }
}
