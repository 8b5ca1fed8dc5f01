//! Spinner shown on stderr while a target's version is being read
//!
//! Probing can shell out to an interpreter, so each target check gets a
//! short-lived indicatif spinner. Quiet and JSON runs draw nothing.

use crate::domain::Target;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for the target currently being checked
pub struct Progress {
    /// False in quiet and JSON mode
    enabled: bool,
    /// Spinner of the running check, if any
    current: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    /// Start the spinner for `target`, replacing any previous one
    pub fn start_check(&mut self, target: Target) {
        self.finish_check();
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(check_message(target));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.current = Some(spinner);
    }

    /// Clear the spinner of the running check
    pub fn finish_check(&mut self) {
        if let Some(spinner) = self.current.take() {
            spinner.finish_and_clear();
        }
    }
}

fn check_message(target: Target) -> String {
    format!("Checking {} version...", target.display_name())
}
