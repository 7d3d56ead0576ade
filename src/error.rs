//! Error types for itercr

use crate::types::{Project, Step};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the workflow, the submitter and their collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// A required step field is missing or blank
    #[error("{step}: missing required field(s): {}", .missing.join(", "))]
    Validation {
        /// Step the payload was sent for
        step: Step,
        /// Wire names of the missing fields
        missing: Vec<String>,
    },

    /// A step payload is present but malformed
    #[error("{step}: invalid payload: {reason}")]
    InvalidPayload {
        /// Step the payload was sent for
        step: Step,
        /// What was wrong with it
        reason: String,
    },

    /// Data from an earlier step is missing
    #[error("incomplete session: {0}")]
    IncompleteSession(String),

    /// The requested action is not valid in the current state
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        /// Attempted action
        action: &'static str,
        /// Current state name
        state: &'static str,
    },

    /// The project token matched no remote project
    #[error("project not found: '{token}'. Available projects: {}", format_projects(.available))]
    ProjectNotFound {
        /// Token supplied by the user
        token: String,
        /// Every project the remote offered
        available: Vec<Project>,
    },

    /// No bearer token could be found
    #[error("no credential: {0}")]
    NoCredential(String),

    /// The remote service answered with an error
    #[error("{operation} failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Remote {
        /// Remote operation that failed
        operation: &'static str,
        /// HTTP status, when one was received
        status: Option<u16>,
        /// Raw response body, when available
        body: Option<String>,
        /// Human-readable failure description
        message: String,
    },

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// Local cache could not be read or written
    #[error("cache error: {0}")]
    Cache(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse error classification exposed to front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller should correct and resend the same step
    Validation,
    /// State-machine invariant violation
    IncompleteSession,
    /// Identifier resolution failed
    ProjectNotFound,
    /// Submission cannot authenticate
    NoCredential,
    /// Transport or API failure
    RemoteCallFailure,
    /// Local failure (config, cache, IO)
    Internal,
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidPayload { .. } => ErrorKind::Validation,
            Self::IncompleteSession(_) | Self::InvalidTransition { .. } => {
                ErrorKind::IncompleteSession
            }
            Self::ProjectNotFound { .. } => ErrorKind::ProjectNotFound,
            Self::NoCredential(_) => ErrorKind::NoCredential,
            Self::Remote { .. } | Self::Http(_) => ErrorKind::RemoteCallFailure,
            Self::Config(_) | Self::Cache(_) | Self::Io(_) | Self::Json(_) | Self::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub(crate) fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            status: None,
            body: None,
            message: message.into(),
        }
    }
}

fn format_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "(none)".to_string();
    }
    projects
        .iter()
        .map(|p| format!("{}({})", p.name, p.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Try, log, continue: downgrade a failed side effect to a warning
pub trait BestEffort<T> {
    /// Log the error under `what` and return `None` instead of failing
    fn best_effort(self, what: impl Display) -> Option<T>;
}

impl<T> BestEffort<T> for Result<T> {
    fn best_effort(self, what: impl Display) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{what} failed (ignored): {e}");
                None
            }
        }
    }
}
