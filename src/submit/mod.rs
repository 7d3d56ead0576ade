//! Two-phase submission engine
//!
//! Handles submitting an assembled record as an iteration plus a dependent
//! code review:
//! 1. Planning - resolve the project and build both payloads
//! 2. Execution - create the iteration, then the code review

mod execute;
mod plan;
mod progress;

pub use execute::{execute_submission, report_dry_run};
pub use plan::{FALLBACK_ESTIMATED_DAYS, SubmissionPlan, build_plan, create_submission_plan};
pub use progress::{NoopProgress, Phase, ProgressCallback};

use crate::cache::PersonnelCache;
use crate::error::Result;
use crate::platform::RemoteService;
use crate::types::{SubmissionRecord, SubmissionResult};

/// Plan and execute in one go
pub async fn submit_record(
    record: &SubmissionRecord,
    remote: &dyn RemoteService,
    cache: &dyn PersonnelCache,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionResult> {
    progress.on_phase(Phase::Resolving).await;
    let plan = create_submission_plan(record, remote).await?;
    progress
        .on_project_resolved(&record.basic_info.project_line, plan.project_id)
        .await;
    execute_submission(&plan, record, remote, cache, progress).await
}
