//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (interactive CLI, stdio server,
//! tests) to receive progress updates during submission.

use crate::error::Error;
use crate::types::ProjectId;
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving the project line against the remote project list
    Resolving,
    /// Creating the iteration
    CreatingIteration,
    /// Re-reading the iteration
    Verifying,
    /// Creating the code review
    CreatingReview,
    /// Updating the local cache
    Recording,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolving => write!(f, "Resolving project"),
            Self::CreatingIteration => write!(f, "Creating iteration"),
            Self::Verifying => write!(f, "Verifying iteration"),
            Self::CreatingReview => write!(f, "Creating code review"),
            Self::Recording => write!(f, "Recording history"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during submission.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the project line is resolved
    async fn on_project_resolved(&self, project_line: &str, project_id: ProjectId);

    /// Called when the iteration is created
    async fn on_iteration_created(&self, iteration_id: &str);

    /// Called when the code review is created
    async fn on_review_created(&self, review_id: &str);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_project_resolved(&self, _project_line: &str, _project_id: ProjectId) {}
    async fn on_iteration_created(&self, _iteration_id: &str) {}
    async fn on_review_created(&self, _review_id: &str) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
