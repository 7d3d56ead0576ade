//! Core types for itercr

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote project id
pub type ProjectId = u64;

/// Remote user id
pub type UserId = u64;

/// A workflow step that accepts a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Project line, iteration name, online time
    BasicInfo,
    /// Documents, git coordinates, people, estimate
    ProjectInfo,
    /// Component and function modules
    Modules,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicInfo => write!(f, "basic info"),
            Self::ProjectInfo => write!(f, "project info"),
            Self::Modules => write!(f, "modules"),
        }
    }
}

/// Step 1 payload: which iteration this is and when it goes live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    /// Project line, either a numeric project id or a (fuzzy) project name
    pub project_line: String,
    /// Iteration name, used as the parent resource name
    pub iteration_name: String,
    /// Planned online date, as entered
    pub online_time: String,
    /// Free-form remarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl BasicInfo {
    /// Online time as epoch milliseconds, or `None` if it does not parse
    pub fn release_timestamp(&self) -> Option<i64> {
        parse_online_time(&self.online_time)
    }
}

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse an online time into epoch milliseconds
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD`. Values without
/// an offset are read in the local time zone; a bare date means midnight.
pub fn parse_online_time(value: &str) -> Option<i64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// Step 2 payload: documents, git coordinates and people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Product requirements document link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_doc: Option<String>,
    /// Technical design document link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_doc: Option<String>,
    /// Monitoring dashboard link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    /// UI/UX design document link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_doc: Option<String>,
    /// Repository URL
    pub git_url: String,
    /// Repository display name
    pub git_project_name: String,
    /// Branch under review
    pub branch: String,
    /// Participating developers
    #[serde(default)]
    pub participant_ids: Vec<UserId>,
    /// Reviewers
    #[serde(default)]
    pub reviewer_ids: Vec<UserId>,
    /// Estimated effort in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_days: Option<f64>,
    /// Free-form remarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// A UI component under review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Component name
    pub name: String,
    /// Path relative to the repository root
    pub relative_path: String,
    /// Assigned reviewer
    pub reviewer_id: UserId,
    /// Screenshot or preview link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A functional change under review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    /// Function name
    pub name: String,
    /// Assigned reviewer
    pub reviewer_id: UserId,
    /// What the change does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Step 3 payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSet {
    /// Components under review
    pub component_modules: Vec<Component>,
    /// Functions under review
    pub function_modules: Vec<Function>,
}

/// Metadata derived from the git workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSnapshot {
    /// Repository URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    /// Repository display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Current branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Estimated effort in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_days: Option<u32>,
}

impl GitSnapshot {
    /// True when nothing could be derived
    pub const fn is_empty(&self) -> bool {
        self.project_url.is_none()
            && self.project_name.is_none()
            && self.branch.is_none()
            && self.estimated_days.is_none()
    }
}

/// A fully assembled record, ready for the two-phase submission
///
/// Only the workflow constructs these, and only once every step is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Step 1 data
    pub basic_info: BasicInfo,
    /// Step 2 data
    pub project_info: ProjectInfo,
    /// Step 3 data
    pub modules: ModuleSet,
}

/// Identifiers of the two resources created by a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// Iteration (parent resource) id
    pub parent_id: String,
    /// Code-review application (dependent resource) id
    pub dependent_id: String,
}

/// A remote project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project id
    pub id: ProjectId,
    /// Project name
    pub name: String,
}

/// A remote user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: UserId,
    /// Display name
    pub name: String,
}

/// A past submission, as remembered by the local cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// Iteration name
    pub iteration_name: String,
    /// Project line as entered
    pub project_line: String,
    /// Iteration id
    pub parent_id: String,
    /// Code-review id
    pub dependent_id: String,
    /// When the submission completed
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_is_exact() {
        assert_eq!(
            parse_online_time("2025-01-01T00:00:00Z"),
            Some(1_735_689_600_000)
        );
        assert_eq!(
            parse_online_time("2025-01-01T08:00:00+08:00"),
            Some(1_735_689_600_000)
        );
    }

    #[test]
    fn test_date_means_local_midnight() {
        let date = parse_online_time("2025-01-01").unwrap();
        assert_eq!(parse_online_time("2025-01-01 00:00"), Some(date));
        assert_eq!(parse_online_time(" 2025-01-01 00:00:00 "), Some(date));
        assert_eq!(
            parse_online_time("2025-01-01 12:30").map(|ms| ms - date),
            Some((12 * 60 + 30) * 60 * 1000)
        );
    }

    #[test]
    fn test_unparseable_online_time() {
        assert_eq!(parse_online_time("next friday"), None);
        assert_eq!(parse_online_time("2025-13-01"), None);
        assert_eq!(parse_online_time(""), None);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::ProjectInfo.to_string(), "project info");
    }
}
