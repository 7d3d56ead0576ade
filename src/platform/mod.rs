//! Remote review service
//!
//! Provides the interface the submitter and workflow use to talk to the
//! iteration / code-review backend.

mod factory;
mod http;
mod payload;

pub use factory::create_remote_service;
pub use http::HttpRemoteService;
pub use payload::{
    CodeReviewDraft, CodeReviewPayload, ComponentLineItem, FunctionLineItem, IterationPayload,
};

use crate::error::Result;
use crate::types::{Project, User};
use async_trait::async_trait;

/// Remote service trait
///
/// The iteration is the parent resource; the code review depends on it and
/// can only be created once the iteration id is known.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// List projects the user can submit to
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// List users that can participate or review
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Create the iteration (parent resource), returning its id
    async fn create_iteration(&self, payload: &IterationPayload) -> Result<String>;

    /// Check that an iteration exists
    async fn verify_iteration(&self, iteration_id: &str) -> Result<bool>;

    /// Create the code review (dependent resource) under `iteration_id`
    async fn create_code_review(&self, iteration_id: &str, review: &CodeReviewDraft)
    -> Result<String>;
}
