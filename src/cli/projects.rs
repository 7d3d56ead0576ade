//! Projects command - list remote projects

use crate::cli::AppContext;
use crate::cli::style::{Stylize, bullet};
use anstream::println;
use itercr::error::Result;

/// List the projects the service offers
pub async fn run_projects(ctx: &AppContext) -> Result<()> {
    let projects = ctx.remote()?.list_projects().await?;

    if projects.is_empty() {
        println!("{}", "No projects found".muted());
        return Ok(());
    }

    for project in &projects {
        println!(
            "{} {} {}",
            bullet(),
            project.name.emphasis(),
            format!("({})", project.id).muted()
        );
    }
    Ok(())
}
