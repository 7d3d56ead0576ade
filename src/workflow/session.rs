//! Session states
//!
//! Each step state is its own type and only offers the transitions that are
//! legal from it. [`Session`] wraps them for front ends that drive the
//! workflow from data.

use crate::error::{Error, Result};
use crate::types::{BasicInfo, ModuleSet, ProjectInfo, SubmissionRecord, SubmissionResult};
use serde::Serialize;
use std::fmt;

/// Fresh session, nothing collected yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Started;

/// Basic info collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithBasicInfo {
    basic_info: BasicInfo,
}

/// Basic and project info collected
#[derive(Debug, Clone, PartialEq)]
pub struct WithProjectInfo {
    basic_info: BasicInfo,
    project_info: ProjectInfo,
}

/// Every step collected; the only state a record can be taken from
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyToSubmit {
    record: SubmissionRecord,
}

impl Started {
    /// Store basic info
    pub fn with_basic_info(self, basic_info: BasicInfo) -> WithBasicInfo {
        WithBasicInfo { basic_info }
    }
}

impl WithBasicInfo {
    /// Collected basic info
    pub const fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    /// Store project info
    pub fn with_project_info(self, project_info: ProjectInfo) -> WithProjectInfo {
        WithProjectInfo {
            basic_info: self.basic_info,
            project_info,
        }
    }
}

impl WithProjectInfo {
    /// Collected basic info
    pub const fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    /// Collected project info
    pub const fn project_info(&self) -> &ProjectInfo {
        &self.project_info
    }

    /// Drop project info
    pub fn rewind(self) -> WithBasicInfo {
        WithBasicInfo {
            basic_info: self.basic_info,
        }
    }

    /// Store modules, completing the record
    pub fn with_modules(self, modules: ModuleSet) -> ReadyToSubmit {
        ReadyToSubmit {
            record: SubmissionRecord {
                basic_info: self.basic_info,
                project_info: self.project_info,
                modules,
            },
        }
    }
}

impl ReadyToSubmit {
    /// The complete record
    pub const fn record(&self) -> &SubmissionRecord {
        &self.record
    }

    /// Drop modules
    pub fn rewind(self) -> WithProjectInfo {
        WithProjectInfo {
            basic_info: self.record.basic_info,
            project_info: self.record.project_info,
        }
    }
}

/// Name of a session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session
    Idle,
    /// Started, waiting for basic info
    Started,
    /// Waiting for project info
    BasicInfoSet,
    /// Waiting for modules
    ProjectInfoSet,
    /// Ready to submit
    ModulesSet,
    /// Submitted; only `start` is accepted
    Submitted,
}

impl SessionState {
    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Started => "started",
            Self::BasicInfoSet => "basic_info_set",
            Self::ProjectInfoSet => "project_info_set",
            Self::ModulesSet => "modules_set",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The session as a value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    /// No session
    #[default]
    Idle,
    /// Nothing collected yet
    Started(Started),
    /// Basic info collected
    BasicInfoSet(WithBasicInfo),
    /// Basic and project info collected
    ProjectInfoSet(WithProjectInfo),
    /// Ready to submit
    ModulesSet(ReadyToSubmit),
    /// Submitted
    Submitted(SubmissionResult),
}

impl Session {
    /// Current state name
    pub const fn state(&self) -> SessionState {
        match self {
            Self::Idle => SessionState::Idle,
            Self::Started(_) => SessionState::Started,
            Self::BasicInfoSet(_) => SessionState::BasicInfoSet,
            Self::ProjectInfoSet(_) => SessionState::ProjectInfoSet,
            Self::ModulesSet(_) => SessionState::ModulesSet,
            Self::Submitted(_) => SessionState::Submitted,
        }
    }

    /// Collected basic info, if any
    pub const fn basic_info(&self) -> Option<&BasicInfo> {
        match self {
            Self::BasicInfoSet(s) => Some(s.basic_info()),
            Self::ProjectInfoSet(s) => Some(s.basic_info()),
            Self::ModulesSet(s) => Some(&s.record().basic_info),
            Self::Idle | Self::Started(_) | Self::Submitted(_) => None,
        }
    }

    /// Collected project info, if any
    pub const fn project_info(&self) -> Option<&ProjectInfo> {
        match self {
            Self::ProjectInfoSet(s) => Some(s.project_info()),
            Self::ModulesSet(s) => Some(&s.record().project_info),
            _ => None,
        }
    }

    /// Collected modules, if any
    pub const fn modules(&self) -> Option<&ModuleSet> {
        match self {
            Self::ModulesSet(s) => Some(&s.record().modules),
            _ => None,
        }
    }

    /// Store basic info, discarding every later step
    pub fn with_basic_info(&self, basic_info: BasicInfo) -> Result<Self> {
        self.open("submit basic info")?;
        Ok(Self::BasicInfoSet(Started.with_basic_info(basic_info)))
    }

    /// Store project info, discarding modules
    pub fn with_project_info(&self, project_info: ProjectInfo) -> Result<Self> {
        let base = match self.clone() {
            Self::BasicInfoSet(s) => s,
            Self::ProjectInfoSet(s) => s.rewind(),
            Self::ModulesSet(s) => s.rewind().rewind(),
            Self::Started(_) => {
                return Err(Error::IncompleteSession(
                    "basic info must be submitted before project info".to_string(),
                ));
            }
            Self::Idle | Self::Submitted(_) => {
                return Err(self.invalid("submit project info"));
            }
        };
        Ok(Self::ProjectInfoSet(base.with_project_info(project_info)))
    }

    /// Store modules, completing the record
    pub fn with_modules(&self, modules: ModuleSet) -> Result<Self> {
        let base = match self.clone() {
            Self::ProjectInfoSet(s) => s,
            Self::ModulesSet(s) => s.rewind(),
            Self::Started(_) | Self::BasicInfoSet(_) => {
                return Err(Error::IncompleteSession(
                    "basic info and project info must be submitted before modules".to_string(),
                ));
            }
            Self::Idle | Self::Submitted(_) => return Err(self.invalid("submit modules")),
        };
        Ok(Self::ModulesSet(base.with_modules(modules)))
    }

    /// The record, only once every step is collected
    pub fn ready(&self) -> Result<&ReadyToSubmit> {
        match self {
            Self::ModulesSet(ready) => Ok(ready),
            Self::Started(_) | Self::BasicInfoSet(_) | Self::ProjectInfoSet(_) => Err(
                Error::IncompleteSession("every step must be submitted first".to_string()),
            ),
            Self::Idle | Self::Submitted(_) => Err(self.invalid("submit")),
        }
    }

    /// Fails unless a session is open for collection
    fn open(&self, action: &'static str) -> Result<()> {
        match self {
            Self::Idle | Self::Submitted(_) => Err(self.invalid(action)),
            _ => Ok(()),
        }
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.state().as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(name: &str) -> BasicInfo {
        BasicInfo {
            project_line: "2".to_string(),
            iteration_name: name.to_string(),
            online_time: "2025-01-01".to_string(),
            remarks: None,
        }
    }

    fn project() -> ProjectInfo {
        ProjectInfo {
            product_doc: None,
            technical_doc: None,
            dashboard_url: None,
            design_doc: None,
            git_url: "https://x/y".to_string(),
            git_project_name: "y".to_string(),
            branch: "feat/a".to_string(),
            participant_ids: vec![1],
            reviewer_ids: vec![2],
            estimated_days: None,
            remarks: None,
        }
    }

    fn ready() -> Session {
        Session::Started(Started)
            .with_basic_info(basic("v1"))
            .and_then(|s| s.with_project_info(project()))
            .and_then(|s| s.with_modules(ModuleSet::default()))
            .unwrap()
    }

    #[test]
    fn test_typestate_chain_builds_record() {
        let ready = Started
            .with_basic_info(basic("v1"))
            .with_project_info(project())
            .with_modules(ModuleSet::default());
        assert_eq!(ready.record().basic_info.iteration_name, "v1");
        assert!(ready.record().modules.component_modules.is_empty());
    }

    #[test]
    fn test_resending_basic_info_drops_later_steps() {
        let session = ready().with_basic_info(basic("v2")).unwrap();
        assert_eq!(session.state(), SessionState::BasicInfoSet);
        assert_eq!(session.basic_info().unwrap().iteration_name, "v2");
        assert!(session.project_info().is_none());
        assert!(session.modules().is_none());
    }

    #[test]
    fn test_resending_project_info_keeps_basic_info() {
        let session = ready().with_project_info(project()).unwrap();
        assert_eq!(session.state(), SessionState::ProjectInfoSet);
        assert_eq!(session.basic_info().unwrap().iteration_name, "v1");
        assert!(session.modules().is_none());
    }

    #[test]
    fn test_same_payload_twice_is_idempotent() {
        let once = ready();
        let twice = once.with_modules(ModuleSet::default()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_out_of_order_is_incomplete() {
        let err = Session::Started(Started)
            .with_project_info(project())
            .unwrap_err();
        assert!(matches!(err, Error::IncompleteSession(_)));

        let err = Session::Started(Started)
            .with_modules(ModuleSet::default())
            .unwrap_err();
        assert!(matches!(err, Error::IncompleteSession(_)));
    }

    #[test]
    fn test_submitted_rejects_steps() {
        let submitted = Session::Submitted(SubmissionResult {
            parent_id: "1".to_string(),
            dependent_id: "2".to_string(),
        });
        let err = submitted.with_basic_info(basic("v1")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                state: "submitted",
                ..
            }
        ));
        assert!(submitted.ready().is_err());
    }

    #[test]
    fn test_idle_requires_start() {
        assert!(matches!(
            Session::Idle.with_basic_info(basic("v1")),
            Err(Error::InvalidTransition { state: "idle", .. })
        ));
    }
}
