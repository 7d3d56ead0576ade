//! Submission execution
//!
//! Creates the iteration, verifies it, creates the code review and records
//! the result locally. Nothing is rolled back.

use crate::cache::PersonnelCache;
use crate::error::{BestEffort, Error, Result};
use crate::platform::RemoteService;
use crate::submit::{Phase, ProgressCallback, SubmissionPlan};
use crate::types::{SubmissionEntry, SubmissionRecord, SubmissionResult};
use chrono::Utc;
use tracing::{info, warn};

/// Execute a submission plan
///
/// 1. Create the iteration
/// 2. Re-read it (never fatal)
/// 3. Create the code review under it
/// 4. Record personnel, project line and the submission (never fatal)
pub async fn execute_submission(
    plan: &SubmissionPlan,
    record: &SubmissionRecord,
    remote: &dyn RemoteService,
    cache: &dyn PersonnelCache,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionResult> {
    progress.on_phase(Phase::CreatingIteration).await;
    let parent_id = remote.create_iteration(&plan.iteration).await?;
    info!("created iteration {parent_id}");
    progress.on_iteration_created(&parent_id).await;

    progress.on_phase(Phase::Verifying).await;
    verify_parent(remote, &parent_id, progress).await;

    progress.on_phase(Phase::CreatingReview).await;
    let dependent_id = match remote.create_code_review(&parent_id, &plan.review).await {
        Ok(id) => id,
        Err(e) => return Err(orphaned(e, &parent_id)),
    };
    info!("created code review {dependent_id} under iteration {parent_id}");
    progress.on_review_created(&dependent_id).await;

    progress.on_phase(Phase::Recording).await;
    let info = &record.project_info;
    cache
        .record_recent_personnel(&info.participant_ids, &info.reviewer_ids)
        .best_effort("recording recent personnel");
    cache
        .record_project_line(&record.basic_info.project_line)
        .best_effort("recording project line");
    cache
        .record_submission(&SubmissionEntry {
            iteration_name: record.basic_info.iteration_name.clone(),
            project_line: record.basic_info.project_line.clone(),
            parent_id: parent_id.clone(),
            dependent_id: dependent_id.clone(),
            submitted_at: Utc::now(),
        })
        .best_effort("recording submission");

    progress.on_phase(Phase::Complete).await;

    Ok(SubmissionResult {
        parent_id,
        dependent_id,
    })
}

async fn verify_parent(remote: &dyn RemoteService, parent_id: &str, progress: &dyn ProgressCallback) {
    let problem = match remote.verify_iteration(parent_id).await {
        Ok(true) => return,
        Ok(false) => Error::remote(
            "verify iteration",
            format!("iteration {parent_id} not found after creation"),
        ),
        Err(e) => e,
    };
    warn!("verification of iteration {parent_id} failed (continuing): {problem}");
    progress.on_error(&problem).await;
}

/// Name the orphaned iteration in the failure so it can be cleaned up by hand
fn orphaned(err: Error, parent_id: &str) -> Error {
    match err {
        Error::Remote {
            operation,
            status,
            body,
            message,
        } => Error::Remote {
            operation,
            status,
            body,
            message: format!("{message} (iteration {parent_id} was created and left in place)"),
        },
        Error::Http(e) => Error::remote(
            "create code review",
            format!("{e} (iteration {parent_id} was created and left in place)"),
        ),
        other => other,
    }
}

/// Report what would be done in a dry run
pub async fn report_dry_run(plan: &SubmissionPlan, progress: &dyn ProgressCallback) {
    progress
        .on_message("Dry run - no changes will be made")
        .await;
    progress
        .on_message(&format!("Project id: {}", plan.project_id))
        .await;
    progress
        .on_message(&format!(
            "Would create iteration '{}' (release {})",
            plan.iteration.name, plan.iteration.release_timestamp
        ))
        .await;
    progress
        .on_message(&format!(
            "Would create code review for {} on {} ({} component(s), {} function(s))",
            plan.review.git_project_name,
            plan.review.branch,
            plan.review.component_modules.len(),
            plan.review.function_modules.len()
        ))
        .await;
}
