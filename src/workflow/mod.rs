//! Step-by-step collection workflow
//!
//! A [`Workflow`] owns the one session of the process. Each action validates
//! its payload before touching the session, so a failed action leaves the
//! session as it was.

mod guidance;
mod payload;
mod session;

pub use guidance::{StartHints, StepOutput};
pub use payload::{BasicInfoDraft, ModulesDraft, ProjectInfoDraft, parse_payload};
pub use session::{
    ReadyToSubmit, Session, SessionState, Started, WithBasicInfo, WithProjectInfo,
};

use crate::cache::PersonnelCache;
use crate::error::{BestEffort, Result};
use crate::git::MetadataSource;
use crate::platform::RemoteService;
use crate::submit::{ProgressCallback, SubmissionPlan, create_submission_plan, submit_record};
use crate::types::Step;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Collection workflow and its collaborators
pub struct Workflow {
    session: Session,
    remote: Arc<dyn RemoteService>,
    cache: Arc<dyn PersonnelCache>,
    metadata: Arc<dyn MetadataSource>,
    workspace: PathBuf,
}

impl Workflow {
    /// Idle workflow over `workspace`
    pub fn new(
        remote: Arc<dyn RemoteService>,
        cache: Arc<dyn PersonnelCache>,
        metadata: Arc<dyn MetadataSource>,
        workspace: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session: Session::Idle,
            remote,
            cache,
            metadata,
            workspace: workspace.into(),
        }
    }

    /// Current session
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Current state name
    pub const fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Workspace the git defaults are derived from
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Point the workflow at another workspace
    pub fn set_workspace(&mut self, workspace: impl Into<PathBuf>) {
        self.workspace = workspace.into();
    }

    /// Reset the session and gather hints; never fails
    pub async fn start(&mut self) -> StepOutput {
        self.session = Session::Started(Started);

        let hints = StartHints {
            recent_participants: self
                .cache
                .recent_participants()
                .best_effort("reading recent participants")
                .unwrap_or_default(),
            recent_reviewers: self
                .cache
                .recent_reviewers()
                .best_effort("reading recent reviewers")
                .unwrap_or_default(),
            recent_project_lines: self
                .cache
                .recent_project_lines()
                .best_effort("reading recent project lines")
                .unwrap_or_default(),
            projects: self
                .remote
                .list_projects()
                .await
                .best_effort("listing projects")
                .unwrap_or_default(),
            users: self
                .remote
                .list_users()
                .await
                .best_effort("listing users")
                .unwrap_or_default(),
        };

        debug!(
            "session started with {} project(s), {} user(s)",
            hints.projects.len(),
            hints.users.len()
        );

        StepOutput::Started {
            hints,
            next: Step::BasicInfo,
        }
    }

    /// Store basic info and derive git defaults for the next step
    pub async fn submit_basic_info(&mut self, draft: BasicInfoDraft) -> Result<StepOutput> {
        let basic_info = draft.validate()?;
        let next = self.session.with_basic_info(basic_info)?;
        self.session = next;

        let defaults = self.metadata.resolve(&self.workspace).await;
        Ok(StepOutput::BasicInfoAccepted {
            defaults,
            next: Step::ProjectInfo,
        })
    }

    /// Store project info and remember the people in it
    pub fn submit_project_info(&mut self, draft: ProjectInfoDraft) -> Result<StepOutput> {
        let project_info = draft.validate()?;
        let next = self.session.with_project_info(project_info)?;
        self.session = next;

        let reviewer_ids = self
            .session
            .project_info()
            .map(|info| {
                self.cache
                    .record_recent_personnel(&info.participant_ids, &info.reviewer_ids)
                    .best_effort("recording recent personnel");
                info.reviewer_ids.clone()
            })
            .unwrap_or_default();

        Ok(StepOutput::ProjectInfoAccepted {
            reviewer_ids,
            next: Step::Modules,
        })
    }

    /// Store modules and hand back the record for confirmation
    pub fn submit_modules(&mut self, draft: ModulesDraft) -> Result<StepOutput> {
        let modules = draft.validate()?;
        let next = self.session.with_modules(modules)?;
        self.session = next;

        let record = self.session.ready()?.record().clone();
        Ok(StepOutput::ModulesAccepted { record })
    }

    /// Resolve and transform without creating anything
    pub async fn plan(&self) -> Result<SubmissionPlan> {
        let ready = self.session.ready()?;
        create_submission_plan(ready.record(), self.remote.as_ref()).await
    }

    /// Run the two-phase submission
    ///
    /// On failure the session stays ready so the caller can retry or go back.
    pub async fn submit(&mut self, progress: &dyn ProgressCallback) -> Result<StepOutput> {
        let record = self.session.ready()?.record().clone();
        let result = submit_record(
            &record,
            self.remote.as_ref(),
            self.cache.as_ref(),
            progress,
        )
        .await?;

        self.session = Session::Submitted(result.clone());
        Ok(StepOutput::Submitted { result })
    }

    /// Clear the session
    pub fn abandon(&mut self) -> StepOutput {
        self.session = Session::Idle;
        StepOutput::Abandoned
    }
}
