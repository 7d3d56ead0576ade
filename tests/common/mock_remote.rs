//! Mock remote service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use itercr::error::{Error, Result};
use itercr::platform::{CodeReviewDraft, IterationPayload, RemoteService};
use itercr::types::{Project, User};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// One recorded call, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects,
    ListUsers,
    CreateIteration(IterationPayload),
    VerifyIteration(String),
    CreateCodeReview(String, CodeReviewDraft),
}

/// Simple mock remote service for testing
///
/// Features:
/// - Auto-incrementing ids (`it-N`, `cr-N`)
/// - Call tracking for ordering checks
/// - Error injection per operation
pub struct MockRemoteService {
    projects: Vec<Project>,
    users: Vec<User>,
    next_id: AtomicU64,
    verify_result: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
    error_on_list: Mutex<Option<String>>,
    error_on_create_iteration: Mutex<Option<String>>,
    error_on_verify: Mutex<Option<String>>,
    error_on_create_review: Mutex<Option<String>>,
}

impl MockRemoteService {
    /// Mock offering `projects` and `users`
    pub fn new(projects: Vec<Project>, users: Vec<User>) -> Self {
        Self {
            projects,
            users,
            next_id: AtomicU64::new(1),
            verify_result: Mutex::new(true),
            calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_create_iteration: Mutex::new(None),
            error_on_verify: Mutex::new(None),
            error_on_create_review: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make both list calls fail
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_iteration` fail
    pub fn fail_create_iteration(&self, msg: &str) {
        *self.error_on_create_iteration.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `verify_iteration` fail
    pub fn fail_verify(&self, msg: &str) {
        *self.error_on_verify.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `verify_iteration` report the iteration missing
    pub fn verify_returns(&self, exists: bool) {
        *self.verify_result.lock().unwrap() = exists;
    }

    /// Make `create_code_review` fail
    pub fn fail_create_review(&self, msg: &str) {
        *self.error_on_create_review.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Every call so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that create something
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateIteration(_) | Call::CreateCodeReview(..)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(slot: &Mutex<Option<String>>, operation: &'static str) -> Result<()> {
        match slot.lock().unwrap().as_ref() {
            Some(msg) => Err(Error::Remote {
                operation,
                status: Some(500),
                body: Some(format!("{{\"code\":500,\"message\":\"{msg}\"}}")),
                message: msg.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteService for MockRemoteService {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.record(Call::ListProjects);
        Self::injected(&self.error_on_list, "list projects")?;
        Ok(self.projects.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.record(Call::ListUsers);
        Self::injected(&self.error_on_list, "list users")?;
        Ok(self.users.clone())
    }

    async fn create_iteration(&self, payload: &IterationPayload) -> Result<String> {
        self.record(Call::CreateIteration(payload.clone()));
        Self::injected(&self.error_on_create_iteration, "create iteration")?;
        Ok(format!("it-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn verify_iteration(&self, iteration_id: &str) -> Result<bool> {
        self.record(Call::VerifyIteration(iteration_id.to_string()));
        Self::injected(&self.error_on_verify, "verify iteration")?;
        Ok(*self.verify_result.lock().unwrap())
    }

    async fn create_code_review(
        &self,
        iteration_id: &str,
        review: &CodeReviewDraft,
    ) -> Result<String> {
        self.record(Call::CreateCodeReview(
            iteration_id.to_string(),
            review.clone(),
        ));
        Self::injected(&self.error_on_create_review, "create code review")?;
        Ok(format!("cr-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }
}
