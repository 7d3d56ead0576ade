//! History command - recently submitted records

use crate::cli::AppContext;
use crate::cli::style::{Stylize, bullet};
use anstream::println;
use chrono::Local;
use itercr::error::Result;

/// Print recent submissions from the local cache, newest first
pub fn run_history(ctx: &AppContext) -> Result<()> {
    let submissions = ctx.cache().submissions()?;

    if submissions.is_empty() {
        println!("{}", "No submissions recorded yet".muted());
        return Ok(());
    }

    for entry in &submissions {
        println!(
            "{} {} {} iteration {} / review {} {}",
            bullet(),
            entry.iteration_name.emphasis(),
            format!("[{}]", entry.project_line).muted(),
            entry.parent_id.accent(),
            entry.dependent_id.accent(),
            entry
                .submitted_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .muted()
        );
    }
    Ok(())
}
