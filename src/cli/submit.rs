//! Submit command - submit a record file

use crate::cli::AppContext;
use crate::cli::progress::{CliProgress, PlainProgress};
use crate::cli::style::{Stylize, arrow, check};
use anstream::println;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use itercr::error::{Error, Result};
use itercr::submit::report_dry_run;
use itercr::types::Step;
use itercr::workflow::{StepOutput, parse_payload};
use serde::Deserialize;
use std::path::Path;

/// Record file layout; each step is validated by the workflow
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFile {
    #[serde(default)]
    basic_info: serde_json::Value,
    #[serde(default)]
    project_info: serde_json::Value,
    #[serde(default)]
    modules: serde_json::Value,
}

/// Run the submit command
pub async fn run_submit(ctx: &AppContext, file: &Path, dry_run: bool, yes: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let record: RecordFile = serde_json::from_str(&text)?;

    let mut workflow = ctx.workflow()?;
    workflow.start().await;
    workflow
        .submit_basic_info(parse_payload(Step::BasicInfo, record.basic_info)?)
        .await?;
    workflow.submit_project_info(parse_payload(Step::ProjectInfo, record.project_info)?)?;
    workflow.submit_modules(parse_payload(Step::Modules, record.modules)?)?;

    if dry_run {
        let plan = workflow.plan().await?;
        report_dry_run(&plan, &PlainProgress).await;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if !yes && !confirm(file)? {
        println!("{}", "Aborted".muted());
        workflow.abandon();
        return Ok(());
    }

    let progress = CliProgress::new();
    let output = workflow.submit(&progress).await;
    progress.finish();

    if let StepOutput::Submitted { result } = output? {
        println!(
            "{} {}: iteration {} {} code review {}",
            check(),
            "Submitted".success(),
            result.parent_id.accent(),
            arrow(),
            result.dependent_id.accent()
        );
    }
    Ok(())
}

fn confirm(file: &Path) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Submit {}?", file.display()))
        .default(true)
        .interact()
        .map_err(|e| Error::Internal(format!("prompt failed: {e}")))
}
