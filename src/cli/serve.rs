//! Serve command - drive the workflow with JSON lines over stdio
//!
//! One request per line in, one response per line out. Logs go to stderr.

use crate::cli::AppContext;
use async_trait::async_trait;
use itercr::error::{Error, ErrorKind, Result};
use itercr::submit::{Phase, ProgressCallback};
use itercr::types::{Project, ProjectId, Step};
use itercr::workflow::{SessionState, Workflow, parse_payload};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Requested action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Action {
    Start,
    BasicInfo,
    ProjectInfo,
    Modules,
    Submit,
    Abandon,
    Status,
}

#[derive(Debug, Deserialize)]
struct Request {
    step: Action,
    #[serde(default)]
    payload: Option<Value>,
    #[serde(default)]
    roots: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Response {
    ok: bool,
    state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    available: Vec<Project>,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        let (missing, available) = match err {
            Error::Validation { missing, .. } => (missing.clone(), Vec::new()),
            Error::ProjectNotFound { available, .. } => (Vec::new(), available.clone()),
            _ => (Vec::new(), Vec::new()),
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            missing,
            available,
        }
    }
}

/// Progress goes to the log; stdout belongs to the protocol
struct LogProgress;

#[async_trait]
impl ProgressCallback for LogProgress {
    async fn on_phase(&self, phase: Phase) {
        info!("{phase}");
    }

    async fn on_project_resolved(&self, project_line: &str, project_id: ProjectId) {
        info!("project '{project_line}' resolved to {project_id}");
    }

    async fn on_iteration_created(&self, iteration_id: &str) {
        info!("iteration {iteration_id} created");
    }

    async fn on_review_created(&self, review_id: &str) {
        info!("code review {review_id} created");
    }

    async fn on_error(&self, error: &Error) {
        warn!("{error}");
    }

    async fn on_message(&self, message: &str) {
        info!("{message}");
    }
}

/// Run the serve command until stdin closes
pub async fn run_serve(ctx: &AppContext) -> Result<()> {
    let mut workflow = ctx.workflow()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => respond(ctx, &mut workflow, request).await,
            Err(e) => Response {
                ok: false,
                state: workflow.state(),
                output: None,
                error: Some(ErrorBody {
                    kind: ErrorKind::Validation,
                    message: format!("invalid request: {e}"),
                    missing: Vec::new(),
                    available: Vec::new(),
                }),
            },
        };

        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

async fn respond(ctx: &AppContext, workflow: &mut Workflow, request: Request) -> Response {
    match handle(ctx, workflow, request).await {
        Ok(output) => Response {
            ok: true,
            state: workflow.state(),
            output: Some(output),
            error: None,
        },
        Err(e) => Response {
            ok: false,
            state: workflow.state(),
            output: None,
            error: Some(ErrorBody::from(&e)),
        },
    }
}

async fn handle(ctx: &AppContext, workflow: &mut Workflow, request: Request) -> Result<Value> {
    let payload = request.payload.unwrap_or(Value::Null);

    let output = match request.step {
        Action::Start => {
            if !request.roots.is_empty() {
                workflow.set_workspace(ctx.workspace(&request.roots)?);
            }
            workflow.start().await
        }
        Action::BasicInfo => {
            workflow
                .submit_basic_info(parse_payload(Step::BasicInfo, payload)?)
                .await?
        }
        Action::ProjectInfo => {
            workflow.submit_project_info(parse_payload(Step::ProjectInfo, payload)?)?
        }
        Action::Modules => workflow.submit_modules(parse_payload(Step::Modules, payload)?)?,
        Action::Submit => workflow.submit(&LogProgress).await?,
        Action::Abandon => workflow.abandon(),
        Action::Status => {
            let session = workflow.session();
            return Ok(json!({
                "workspace": workflow.workspace().display().to_string(),
                "basicInfo": session.basic_info(),
                "projectInfo": session.project_info(),
                "modules": session.modules(),
            }));
        }
    };

    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parsing() {
        let request: Request =
            serde_json::from_str(r#"{"step": "basic_info", "payload": {"projectLine": "2"}}"#)
                .unwrap();
        assert_eq!(request.step, Action::BasicInfo);
        assert!(request.roots.is_empty());
        assert!(serde_json::from_str::<Request>(r#"{"step": "launch"}"#).is_err());
    }

    #[test]
    fn test_error_body_lists_available_projects() {
        let err = Error::ProjectNotFound {
            token: "9".to_string(),
            available: vec![Project {
                id: 1,
                name: "Core".to_string(),
            }],
        };
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body["kind"], "project_not_found");
        assert_eq!(body["available"][0]["name"], "Core");
        assert!(body.get("missing").is_none());
    }
}
