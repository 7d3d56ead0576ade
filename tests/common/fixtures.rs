//! Test data factories for itercr types

#![allow(dead_code)]

use async_trait::async_trait;
use itercr::cache::PersonnelCache;
use itercr::error::{Error, Result};
use itercr::git::MetadataSource;
use itercr::types::{
    BasicInfo, GitSnapshot, ModuleSet, Project, ProjectInfo, SubmissionEntry, SubmissionRecord,
    User, UserId,
};
use itercr::workflow::{BasicInfoDraft, ModulesDraft, ProjectInfoDraft};
use serde_json::{Value, json};
use std::path::Path;

/// `[{1, "Core"}, {2, "Growth"}]`
pub fn make_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Core".to_string(),
        },
        Project {
            id: 2,
            name: "Growth".to_string(),
        },
    ]
}

/// Two users, ids 1 and 2
pub fn make_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Ada".to_string(),
        },
        User {
            id: 2,
            name: "Grace".to_string(),
        },
    ]
}

pub fn basic_info_json() -> Value {
    json!({"projectLine": "2", "iterationName": "v1", "onlineTime": "2025-01-01"})
}

pub fn project_info_json() -> Value {
    json!({
        "gitUrl": "https://x/y",
        "gitProjectName": "y",
        "branch": "feat/a",
        "participantIds": [1],
        "reviewerIds": [2]
    })
}

pub fn modules_json() -> Value {
    json!({"componentModules": [], "functionModules": []})
}

pub fn basic_info_draft() -> BasicInfoDraft {
    serde_json::from_value(basic_info_json()).unwrap()
}

pub fn project_info_draft() -> ProjectInfoDraft {
    serde_json::from_value(project_info_json()).unwrap()
}

pub fn modules_draft() -> ModulesDraft {
    serde_json::from_value(modules_json()).unwrap()
}

/// The record the drafts above assemble into
pub fn make_record() -> SubmissionRecord {
    SubmissionRecord {
        basic_info: BasicInfo {
            project_line: "2".to_string(),
            iteration_name: "v1".to_string(),
            online_time: "2025-01-01".to_string(),
            remarks: None,
        },
        project_info: ProjectInfo {
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
        },
        modules: ModuleSet::default(),
    }
}

/// Metadata source returning a fixed snapshot
pub struct FixedMetadata(pub GitSnapshot);

#[async_trait]
impl MetadataSource for FixedMetadata {
    async fn resolve(&self, _workspace: &Path) -> GitSnapshot {
        self.0.clone()
    }
}

pub fn make_snapshot() -> GitSnapshot {
    GitSnapshot {
        project_url: Some("git@example.com:team/y.git".to_string()),
        project_name: Some("y".to_string()),
        branch: Some("feat/a".to_string()),
        estimated_days: Some(5),
    }
}

/// Cache whose every read and write fails
pub struct BrokenCache;

fn broken<T>() -> Result<T> {
    Err(Error::Cache("disk unavailable".to_string()))
}

impl PersonnelCache for BrokenCache {
    fn recent_participants(&self) -> Result<Vec<UserId>> {
        broken()
    }
    fn recent_reviewers(&self) -> Result<Vec<UserId>> {
        broken()
    }
    fn recent_project_lines(&self) -> Result<Vec<String>> {
        broken()
    }
    fn submissions(&self) -> Result<Vec<SubmissionEntry>> {
        broken()
    }
    fn record_recent_personnel(
        &self,
        _participants: &[UserId],
        _reviewers: &[UserId],
    ) -> Result<()> {
        broken()
    }
    fn record_project_line(&self, _project_line: &str) -> Result<()> {
        broken()
    }
    fn record_submission(&self, _entry: &SubmissionEntry) -> Result<()> {
        broken()
    }
}
