//! What each step hands back to the caller

use crate::types::{
    GitSnapshot, Project, Step, SubmissionRecord, SubmissionResult, User, UserId,
};
use serde::Serialize;

/// Hints gathered by `start`
///
/// Every list is empty when its source failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartHints {
    /// Recently used participants, most recent first
    pub recent_participants: Vec<UserId>,
    /// Recently used reviewers, most recent first
    pub recent_reviewers: Vec<UserId>,
    /// Recently used project lines, most recent first
    pub recent_project_lines: Vec<String>,
    /// Remote projects
    pub projects: Vec<Project>,
    /// Remote user directory
    pub users: Vec<User>,
}

/// Output of a workflow action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StepOutput {
    /// Session (re)started
    Started {
        /// Hints for the first step
        hints: StartHints,
        /// Step expected next
        next: Step,
    },
    /// Basic info stored
    BasicInfoAccepted {
        /// Advisory defaults derived from the workspace; not stored
        defaults: GitSnapshot,
        /// Step expected next
        next: Step,
    },
    /// Project info stored
    ProjectInfoAccepted {
        /// Reviewers to choose module reviewers from
        reviewer_ids: Vec<UserId>,
        /// Step expected next
        next: Step,
    },
    /// Modules stored; the record awaits confirmation
    ModulesAccepted {
        /// Record that `submit` would send
        record: SubmissionRecord,
    },
    /// Both resources created
    Submitted {
        /// Created identifiers
        result: SubmissionResult,
    },
    /// Session cleared
    Abandoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_is_tagged() {
        let output = StepOutput::ProjectInfoAccepted {
            reviewer_ids: vec![2],
            next: Step::Modules,
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"type": "project_info_accepted", "reviewerIds": [2], "next": "modules"})
        );
        assert_eq!(
            serde_json::to_value(StepOutput::Abandoned).unwrap(),
            json!({"type": "abandoned"})
        );
    }

    #[test]
    fn test_submitted_carries_ids() {
        let output = StepOutput::Submitted {
            result: SubmissionResult {
                parent_id: "41".to_string(),
                dependent_id: "cr-9".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"type": "submitted", "result": {"parentId": "41", "dependentId": "cr-9"}})
        );
    }
}
