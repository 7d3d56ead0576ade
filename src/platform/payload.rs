//! Wire payloads for the review service

use crate::types::ProjectId;
use serde::{Deserialize, Serialize};

/// Body of `POST /iterations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationPayload {
    /// Resolved project id
    pub project_id: ProjectId,
    /// Iteration name
    pub name: String,
    /// Planned online time, epoch milliseconds
    pub release_timestamp: i64,
    /// Remarks, empty when none
    pub remark: String,
}

/// A component module as the service expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLineItem {
    /// Component name
    pub component_name: String,
    /// Path relative to the repository root
    pub component_path: String,
    /// Reviewer id
    pub reviewer_id: u64,
    /// Preview image link, empty when none
    pub preview_image: String,
}

/// A function module as the service expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionLineItem {
    /// Function name
    pub function_name: String,
    /// Reviewer id
    pub reviewer_id: u64,
    /// Description, empty when none
    pub function_desc: String,
}

/// Code-review body minus the iteration id, which is only known after the
/// iteration has been created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReviewDraft {
    /// Resolved project id
    pub project_id: ProjectId,
    /// Product requirements document link
    pub product_doc: String,
    /// Technical design document link
    pub technical_doc: String,
    /// Dashboard link
    pub dashboard_url: String,
    /// Design document link
    pub design_doc: String,
    /// Repository URL
    pub git_url: String,
    /// Repository display name
    pub git_project_name: String,
    /// Branch under review
    pub branch: String,
    /// Comma-separated participant ids
    pub participant_ids: String,
    /// Comma-separated reviewer ids
    pub reviewer_ids: String,
    /// Estimated effort in days
    pub estimated_days: f64,
    /// Remarks, empty when none
    pub remark: String,
    /// Component line items
    pub component_modules: Vec<ComponentLineItem>,
    /// Function line items
    pub function_modules: Vec<FunctionLineItem>,
}

impl CodeReviewDraft {
    /// Attach the iteration id
    pub fn with_iteration(&self, iteration_id: &str) -> CodeReviewPayload {
        CodeReviewPayload {
            iteration_id: iteration_id.to_string(),
            review: self.clone(),
        }
    }
}

/// Body of `POST /code-reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReviewPayload {
    /// Parent iteration id
    pub iteration_id: String,
    /// Everything else
    #[serde(flatten)]
    pub review: CodeReviewDraft,
}
