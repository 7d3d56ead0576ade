//! itercr - iteration and code-review requests from a git workspace
//!
//! Collects an iteration record step by step, pre-fills what it can from the
//! local git checkout, and submits it as an iteration plus a dependent code
//! review.
//!
//! # Layout
//!
//! - [`workflow`]: the step-by-step session
//! - [`submit`]: two-phase submission (plan, then execute)
//! - [`git`]: workspace metadata and effort estimation
//! - [`platform`]: the remote review service
//! - [`resolve`]: project line to project id
//! - [`cache`]: recently used people, project lines and submissions

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod platform;
pub mod resolve;
pub mod submit;
pub mod types;
pub mod workflow;
pub mod workspace;

pub use error::{Error, ErrorKind, Result};
