//! Step payload drafts and their validation
//!
//! Drafts mirror the wire shape with every field optional, so a payload with
//! gaps still deserializes and the gaps can be reported by name.

use crate::error::{Error, Result};
use crate::types::{
    BasicInfo, Component, Function, ModuleSet, ProjectInfo, Step, UserId, parse_online_time,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Step 1 payload as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoDraft {
    /// Project id or name
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_line: Option<String>,
    /// Iteration name
    pub iteration_name: Option<String>,
    /// Planned online time
    pub online_time: Option<String>,
    /// Free-form remarks
    pub remarks: Option<String>,
}

/// Step 2 payload as received
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfoDraft {
    /// Product requirements document link
    pub product_doc: Option<String>,
    /// Technical design document link
    pub technical_doc: Option<String>,
    /// Dashboard link
    pub dashboard_url: Option<String>,
    /// Design document link
    pub design_doc: Option<String>,
    /// Repository URL (required)
    pub git_url: Option<String>,
    /// Repository display name (required)
    pub git_project_name: Option<String>,
    /// Branch (required)
    pub branch: Option<String>,
    /// Participating developers
    pub participant_ids: Option<Vec<UserId>>,
    /// Reviewers
    pub reviewer_ids: Option<Vec<UserId>>,
    /// Estimated effort in days
    pub estimated_days: Option<f64>,
    /// Free-form remarks
    pub remarks: Option<String>,
}

/// Step 3 payload as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulesDraft {
    /// Components under review (required, may be empty)
    pub component_modules: Option<Vec<Component>>,
    /// Functions under review (required, may be empty)
    pub function_modules: Option<Vec<Function>>,
}

/// Parse a JSON payload for `step`
///
/// A payload that is not an object, or whose fields have the wrong types,
/// is an `InvalidPayload` error.
pub fn parse_payload<T: DeserializeOwned>(step: Step, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::InvalidPayload {
        step,
        reason: e.to_string(),
    })
}

/// Records which required fields are missing or blank
struct Required {
    step: Step,
    missing: Vec<String>,
}

impl Required {
    const fn new(step: Step) -> Self {
        Self {
            step,
            missing: Vec::new(),
        }
    }

    fn text(&mut self, name: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn list<T>(&mut self, name: &str, value: Option<Vec<T>>) -> Vec<T> {
        value.unwrap_or_else(|| {
            self.missing.push(name.to_string());
            Vec::new()
        })
    }

    fn finish(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                step: self.step,
                missing: self.missing,
            })
        }
    }
}

impl BasicInfoDraft {
    /// Check required fields and the online time format
    pub fn validate(self) -> Result<BasicInfo> {
        let mut required = Required::new(Step::BasicInfo);
        let project_line = required.text("projectLine", self.project_line);
        let iteration_name = required.text("iterationName", self.iteration_name);
        let online_time = required.text("onlineTime", self.online_time);
        required.finish()?;

        if parse_online_time(&online_time).is_none() {
            return Err(Error::InvalidPayload {
                step: Step::BasicInfo,
                reason: format!(
                    "onlineTime '{online_time}' is not a date (expected YYYY-MM-DD, \
                     YYYY-MM-DD HH:MM[:SS] or RFC 3339)"
                ),
            });
        }

        Ok(BasicInfo {
            project_line,
            iteration_name,
            online_time,
            remarks: self.remarks,
        })
    }
}

impl ProjectInfoDraft {
    /// Check required git coordinates and the estimate
    pub fn validate(self) -> Result<ProjectInfo> {
        let mut required = Required::new(Step::ProjectInfo);
        let git_url = required.text("gitUrl", self.git_url);
        let git_project_name = required.text("gitProjectName", self.git_project_name);
        let branch = required.text("branch", self.branch);
        required.finish()?;

        if let Some(days) = self.estimated_days.filter(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(Error::InvalidPayload {
                step: Step::ProjectInfo,
                reason: format!("estimatedDays must be a positive number, got {days}"),
            });
        }

        Ok(ProjectInfo {
            product_doc: self.product_doc,
            technical_doc: self.technical_doc,
            dashboard_url: self.dashboard_url,
            design_doc: self.design_doc,
            git_url,
            git_project_name,
            branch,
            participant_ids: self.participant_ids.unwrap_or_default(),
            reviewer_ids: self.reviewer_ids.unwrap_or_default(),
            estimated_days: self.estimated_days,
            remarks: self.remarks,
        })
    }
}

impl ModulesDraft {
    /// Both lists must be present; either may be empty
    pub fn validate(self) -> Result<ModuleSet> {
        let mut required = Required::new(Step::Modules);
        let component_modules = required.list("componentModules", self.component_modules);
        let function_modules = required.list("functionModules", self.function_modules);
        required.finish()?;

        Ok(ModuleSet {
            component_modules,
            function_modules,
        })
    }
}

/// Accept `"2"` as well as `2`
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Number(n) => n.to_string(),
    }))
}
