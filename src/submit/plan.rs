//! Submission planning
//!
//! Resolves the project and builds both payloads without touching the
//! remote. A plan is what a dry run shows.

use crate::error::{Error, Result};
use crate::platform::{
    CodeReviewDraft, ComponentLineItem, FunctionLineItem, IterationPayload, RemoteService,
};
use crate::resolve::resolve_project_id;
use crate::types::{ModuleSet, ProjectId, ProjectInfo, SubmissionRecord, Step, UserId};
use serde::Serialize;

/// Effort estimate used when the record carries none
pub const FALLBACK_ESTIMATED_DAYS: f64 = 7.0;

/// Submission plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPlan {
    /// Resolved project id
    pub project_id: ProjectId,
    /// Parent resource body
    pub iteration: IterationPayload,
    /// Dependent resource body, minus the iteration id
    pub review: CodeReviewDraft,
}

/// Create a submission plan
///
/// Fetches the project list and resolves the project line. Fails before any
/// remote mutation when the project cannot be resolved.
pub async fn create_submission_plan(
    record: &SubmissionRecord,
    remote: &dyn RemoteService,
) -> Result<SubmissionPlan> {
    let projects = remote.list_projects().await?;
    let project_id = resolve_project_id(&record.basic_info.project_line, &projects)?;
    build_plan(record, project_id)
}

/// Build the payloads for an already resolved project
pub fn build_plan(record: &SubmissionRecord, project_id: ProjectId) -> Result<SubmissionPlan> {
    let basic = &record.basic_info;
    let release_timestamp = basic
        .release_timestamp()
        .ok_or_else(|| Error::InvalidPayload {
            step: Step::BasicInfo,
            reason: format!("onlineTime '{}' is not a date", basic.online_time),
        })?;

    Ok(SubmissionPlan {
        project_id,
        iteration: IterationPayload {
            project_id,
            name: basic.iteration_name.clone(),
            release_timestamp,
            remark: basic.remarks.clone().unwrap_or_default(),
        },
        review: review_draft(&record.project_info, &record.modules, project_id),
    })
}

fn review_draft(info: &ProjectInfo, modules: &ModuleSet, project_id: ProjectId) -> CodeReviewDraft {
    CodeReviewDraft {
        project_id,
        product_doc: info.product_doc.clone().unwrap_or_default(),
        technical_doc: info.technical_doc.clone().unwrap_or_default(),
        dashboard_url: info.dashboard_url.clone().unwrap_or_default(),
        design_doc: info.design_doc.clone().unwrap_or_default(),
        git_url: info.git_url.clone(),
        git_project_name: info.git_project_name.clone(),
        branch: info.branch.clone(),
        participant_ids: join_ids(&info.participant_ids),
        reviewer_ids: join_ids(&info.reviewer_ids),
        estimated_days: info.estimated_days.unwrap_or(FALLBACK_ESTIMATED_DAYS),
        remark: info.remarks.clone().unwrap_or_default(),
        component_modules: modules
            .component_modules
            .iter()
            .map(|c| ComponentLineItem {
                component_name: c.name.clone(),
                component_path: c.relative_path.clone(),
                reviewer_id: c.reviewer_id,
                preview_image: c.image.clone().unwrap_or_default(),
            })
            .collect(),
        function_modules: modules
            .function_modules
            .iter()
            .map(|f| FunctionLineItem {
                function_name: f.name.clone(),
                reviewer_id: f.reviewer_id,
                function_desc: f.description.clone().unwrap_or_default(),
            })
            .collect(),
    }
}

fn join_ids(ids: &[UserId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasicInfo, Component, Function};

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            basic_info: BasicInfo {
                project_line: "Growth".to_string(),
                iteration_name: "v1".to_string(),
                online_time: "2025-01-01T00:00:00Z".to_string(),
                remarks: None,
            },
            project_info: ProjectInfo {
                product_doc: Some("https://docs/prd".to_string()),
                technical_doc: None,
                dashboard_url: None,
                design_doc: None,
                git_url: "https://x/y".to_string(),
                git_project_name: "y".to_string(),
                branch: "feat/a".to_string(),
                participant_ids: vec![1, 3],
                reviewer_ids: vec![2],
                estimated_days: None,
                remarks: Some("ship it".to_string()),
            },
            modules: ModuleSet {
                component_modules: vec![Component {
                    name: "Header".to_string(),
                    relative_path: "src/Header.tsx".to_string(),
                    reviewer_id: 2,
                    image: None,
                }],
                function_modules: vec![Function {
                    name: "login".to_string(),
                    reviewer_id: 4,
                    description: Some("oauth".to_string()),
                }],
            },
        }
    }

    #[test]
    fn test_build_plan_transforms_record() {
        let plan = build_plan(&record(), 2).unwrap();

        assert_eq!(plan.iteration.project_id, 2);
        assert_eq!(plan.iteration.name, "v1");
        assert_eq!(plan.iteration.release_timestamp, 1_735_689_600_000);
        assert_eq!(plan.iteration.remark, "");

        let review = &plan.review;
        assert_eq!(review.product_doc, "https://docs/prd");
        assert_eq!(review.technical_doc, "");
        assert_eq!(review.participant_ids, "1,3");
        assert_eq!(review.reviewer_ids, "2");
        assert!((review.estimated_days - FALLBACK_ESTIMATED_DAYS).abs() < f64::EPSILON);
        assert_eq!(review.remark, "ship it");
        assert_eq!(review.component_modules[0].component_path, "src/Header.tsx");
        assert_eq!(review.component_modules[0].preview_image, "");
        assert_eq!(review.function_modules[0].function_desc, "oauth");
    }

    #[test]
    fn test_review_payload_wire_shape() {
        let plan = build_plan(&record(), 2).unwrap();
        let json = serde_json::to_value(plan.review.with_iteration("17")).unwrap();

        assert_eq!(json["iterationId"], "17");
        assert_eq!(json["projectId"], 2);
        assert_eq!(json["gitProjectName"], "y");
        assert_eq!(json["componentModules"][0]["componentName"], "Header");
        assert_eq!(json["functionModules"][0]["reviewerId"], 4);
    }

    #[test]
    fn test_bad_online_time_is_validation() {
        let mut record = record();
        record.basic_info.online_time = "soon".to_string();
        let err = build_plan(&record, 2).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[]), "");
        assert_eq!(join_ids(&[5]), "5");
    }
}
