//! Shared CLI progress callback with styled output and spinners

use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use itercr::error::Error;
use itercr::submit::{Phase, ProgressCallback};
use itercr::types::ProjectId;
use std::time::Duration;

/// CLI progress callback that prints to stdout with styled output
///
/// Each phase runs under a spinner; finished steps are printed above it.
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create progress output with a live spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Stop the spinner without printing anything
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    fn line(&self, text: String) {
        self.spinner.suspend(|| println!("{text}"));
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if phase == Phase::Complete {
            self.spinner.finish_and_clear();
        } else {
            self.spinner.set_message(format!("{phase}..."));
        }
    }

    async fn on_project_resolved(&self, project_line: &str, project_id: ProjectId) {
        self.line(format!(
            "  {} Project {} {}",
            check(),
            project_line.emphasis(),
            format!("(id {project_id})").muted()
        ));
    }

    async fn on_iteration_created(&self, iteration_id: &str) {
        self.line(format!(
            "  {} Created iteration {}",
            check(),
            iteration_id.accent()
        ));
    }

    async fn on_review_created(&self, review_id: &str) {
        self.line(format!(
            "  {} Created code review {}",
            check(),
            review_id.accent()
        ));
    }

    async fn on_error(&self, err: &Error) {
        self.spinner
            .suspend(|| eprintln!("  {} {}: {}", cross(), "warning".warn(), err));
    }

    async fn on_message(&self, message: &str) {
        self.line(message.to_string());
    }
}

/// Plain progress for dry runs: messages only, no spinner
pub struct PlainProgress;

#[async_trait]
impl ProgressCallback for PlainProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_project_resolved(&self, _project_line: &str, _project_id: ProjectId) {}
    async fn on_iteration_created(&self, _iteration_id: &str) {}
    async fn on_review_created(&self, _review_id: &str) {}

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "warning".warn(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{}", message.muted());
    }
}
