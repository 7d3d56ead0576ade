//! Default interactive command - walk the workflow with prompts

use crate::cli::AppContext;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stream, Stylize, arrow, bullet, check, cross, hyperlink_url};
use anstream::{eprintln, println};
use chrono::Local;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use itercr::error::{Error, ErrorKind, Result};
use itercr::git::DEFAULT_ESTIMATED_DAYS;
use itercr::types::{
    Component, Function, GitSnapshot, SubmissionRecord, User, UserId, parse_online_time,
};
use itercr::workflow::{
    BasicInfoDraft, ModulesDraft, ProjectInfoDraft, StartHints, StepOutput, Workflow,
};

/// Run the interactive wizard (default when no subcommand given)
pub async fn run_interactive(ctx: &AppContext) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut workflow = ctx.workflow()?;

    let StepOutput::Started { hints, .. } = workflow.start().await else {
        return Err(Error::Internal("unexpected start output".to_string()));
    };

    println!("{}", "New iteration".emphasis());
    println!("{}", format!("Workspace: {}", workflow.workspace().display()).muted());
    println!();

    let defaults = loop {
        let basic = prompt_basic_info(&theme, &hints)?;
        if let Some(output) = retry_on_validation(workflow.submit_basic_info(basic).await)? {
            break match output {
                StepOutput::BasicInfoAccepted { defaults, .. } => defaults,
                _ => GitSnapshot::default(),
            };
        }
    };

    println!();
    println!("{}", "Project info".emphasis());
    let reviewers = loop {
        let project = prompt_project_info(&theme, &hints, &defaults)?;
        if let Some(output) = retry_on_validation(workflow.submit_project_info(project))? {
            break match output {
                StepOutput::ProjectInfoAccepted { reviewer_ids, .. } => reviewer_ids,
                _ => Vec::new(),
            };
        }
    };

    println!();
    println!("{}", "Modules".emphasis());
    let record = loop {
        let modules = prompt_modules(&theme, &hints.users, &reviewers)?;
        match retry_on_validation(workflow.submit_modules(modules))? {
            Some(StepOutput::ModulesAccepted { record }) => break record,
            Some(_) => return Err(Error::Internal("unexpected modules output".to_string())),
            None => {}
        }
    };

    println!();
    print_summary(&record);
    println!();

    if !confirm(&theme, "Submit this iteration?", true)? {
        workflow.abandon();
        println!("{}", "Aborted".muted());
        return Ok(());
    }

    submit(&mut workflow).await
}

async fn submit(workflow: &mut Workflow) -> Result<()> {
    let progress = CliProgress::new();
    let output = workflow.submit(&progress).await;
    progress.finish();

    if let StepOutput::Submitted { result } = output? {
        println!(
            "{} Submitted: iteration {} {} code review {}",
            check(),
            result.parent_id.accent(),
            arrow(),
            result.dependent_id.accent()
        );
    }
    Ok(())
}

fn prompt_basic_info(theme: &ColorfulTheme, hints: &StartHints) -> Result<BasicInfoDraft> {
    let project_line = if hints.projects.is_empty() {
        let mut input = Input::<String>::with_theme(theme).with_prompt("Project line (id or name)");
        if let Some(recent) = hints.recent_project_lines.first() {
            input = input.default(recent.clone());
        }
        input.interact_text().map_err(prompt_error)?
    } else {
        let names: Vec<String> = hints
            .projects
            .iter()
            .map(|p| format!("{} ({})", p.name, p.id))
            .collect();
        let default = hints
            .recent_project_lines
            .first()
            .and_then(|recent| {
                hints
                    .projects
                    .iter()
                    .position(|p| &p.name == recent || &p.id.to_string() == recent)
            })
            .unwrap_or(0);
        let idx = Select::with_theme(theme)
            .with_prompt("Project line")
            .items(&names)
            .default(default)
            .interact()
            .map_err(prompt_error)?;
        hints.projects[idx].id.to_string()
    };

    let iteration_name = text(theme, "Iteration name", None)?;
    let online_time = Input::<String>::with_theme(theme)
        .with_prompt("Online time")
        .default(Local::now().format("%Y-%m-%d").to_string())
        .validate_with(|value: &String| -> std::result::Result<(), String> {
            parse_online_time(value)
                .map(|_| ())
                .ok_or_else(|| "expected YYYY-MM-DD or YYYY-MM-DD HH:MM".to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;
    let remarks = optional_text(theme, "Remarks", None)?;

    Ok(BasicInfoDraft {
        project_line: Some(project_line),
        iteration_name: Some(iteration_name),
        online_time: Some(online_time),
        remarks,
    })
}

fn prompt_project_info(
    theme: &ColorfulTheme,
    hints: &StartHints,
    defaults: &GitSnapshot,
) -> Result<ProjectInfoDraft> {
    let product_doc = optional_text(theme, "Product doc", None)?;
    let technical_doc = optional_text(theme, "Technical doc", None)?;
    let dashboard_url = optional_text(theme, "Dashboard URL", None)?;
    let design_doc = optional_text(theme, "Design doc", None)?;

    let git_url = text(theme, "Git URL", defaults.project_url.as_deref())?;
    let git_project_name = text(theme, "Git project name", defaults.project_name.as_deref())?;
    let branch = text(theme, "Branch", defaults.branch.as_deref())?;

    let participant_ids = pick_users(
        theme,
        "Participants",
        &hints.users,
        &hints.recent_participants,
    )?;
    let reviewer_ids = pick_users(theme, "Reviewers", &hints.users, &hints.recent_reviewers)?;

    let estimate = defaults.estimated_days.unwrap_or(DEFAULT_ESTIMATED_DAYS);
    let estimated_days = Input::<f64>::with_theme(theme)
        .with_prompt("Estimated days")
        .default(f64::from(estimate))
        .interact_text()
        .map_err(prompt_error)?;
    let remarks = optional_text(theme, "Remarks", None)?;

    Ok(ProjectInfoDraft {
        product_doc,
        technical_doc,
        dashboard_url,
        design_doc,
        git_url: Some(git_url),
        git_project_name: Some(git_project_name),
        branch: Some(branch),
        participant_ids: Some(participant_ids),
        reviewer_ids: Some(reviewer_ids),
        estimated_days: Some(estimated_days),
        remarks,
    })
}

fn prompt_modules(
    theme: &ColorfulTheme,
    users: &[User],
    reviewers: &[UserId],
) -> Result<ModulesDraft> {
    let mut components = Vec::new();
    while confirm(theme, "Add a component module?", components.is_empty())? {
        components.push(Component {
            name: text(theme, "  Component name", None)?,
            relative_path: text(theme, "  Relative path", None)?,
            reviewer_id: pick_reviewer(theme, users, reviewers)?,
            image: optional_text(theme, "  Preview image", None)?,
        });
    }

    let mut functions = Vec::new();
    while confirm(theme, "Add a function module?", functions.is_empty())? {
        functions.push(Function {
            name: text(theme, "  Function name", None)?,
            reviewer_id: pick_reviewer(theme, users, reviewers)?,
            description: optional_text(theme, "  Description", None)?,
        });
    }

    Ok(ModulesDraft {
        component_modules: Some(components),
        function_modules: Some(functions),
    })
}

fn pick_users(
    theme: &ColorfulTheme,
    prompt: &str,
    users: &[User],
    recent: &[UserId],
) -> Result<Vec<UserId>> {
    if users.is_empty() {
        let default = recent
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let raw = Input::<String>::with_theme(theme)
            .with_prompt(format!("{prompt} (comma-separated ids)"))
            .default(default)
            .allow_empty(true)
            .validate_with(|value: &String| parse_ids(value).map(|_| ()))
            .interact_text()
            .map_err(prompt_error)?;
        return parse_ids(&raw).map_err(Error::Internal);
    }

    let labels: Vec<String> = users.iter().map(user_label).collect();
    let checked: Vec<bool> = users.iter().map(|u| recent.contains(&u.id)).collect();
    let picked = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&checked)
        .interact()
        .map_err(prompt_error)?;
    Ok(picked.into_iter().map(|i| users[i].id).collect())
}

fn pick_reviewer(theme: &ColorfulTheme, users: &[User], reviewers: &[UserId]) -> Result<UserId> {
    if reviewers.is_empty() {
        return Input::<UserId>::with_theme(theme)
            .with_prompt("  Reviewer id")
            .interact_text()
            .map_err(prompt_error);
    }

    let labels: Vec<String> = reviewers
        .iter()
        .map(|id| {
            users
                .iter()
                .find(|u| u.id == *id)
                .map_or_else(|| id.to_string(), user_label)
        })
        .collect();
    let idx = Select::with_theme(theme)
        .with_prompt("  Reviewer")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(reviewers[idx])
}

fn print_summary(record: &SubmissionRecord) {
    let basic = &record.basic_info;
    let project = &record.project_info;
    println!("{}", "Summary".emphasis());
    println!(
        "  {} {} {} {}",
        bullet(),
        basic.iteration_name.accent(),
        format!("[{}]", basic.project_line).muted(),
        basic.online_time
    );
    println!(
        "  {} {} {} {}",
        bullet(),
        project.git_project_name,
        arrow(),
        project.branch.accent()
    );
    println!(
        "    {}",
        hyperlink_url(Stream::Stdout, &project.git_url).muted()
    );
    println!(
        "  {} participants {:?}, reviewers {:?}",
        bullet(),
        project.participant_ids,
        project.reviewer_ids
    );
    println!(
        "  {} {} component(s), {} function(s)",
        bullet(),
        record.modules.component_modules.len(),
        record.modules.function_modules.len()
    );
}

fn user_label(user: &User) -> String {
    format!("{} ({})", user.name, user.id)
}

fn text(theme: &ColorfulTheme, prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    input.interact_text().map_err(prompt_error)
}

fn optional_text(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<&str>,
) -> Result<Option<String>> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let value = input.interact_text().map_err(prompt_error)?;
    Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
}

fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

/// Validation failures send the user back to the same step; anything else ends the wizard
fn retry_on_validation<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::Validation => {
            eprintln!("{} {}", cross(), e.to_string().warn());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Internal(format!("prompt failed: {err}"))
}

/// Parse `1, 2,3` into ids; blank means none
fn parse_ids(value: &str) -> std::result::Result<Vec<UserId>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().map_err(|_| format!("'{part}' is not a user id")))
        .collect()
}
