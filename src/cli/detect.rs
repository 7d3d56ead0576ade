//! Detect command - print what the workspace says about itself

use crate::cli::AppContext;
use itercr::error::Result;
use itercr::git::{GitMetadataResolver, MetadataSource};

/// Print the git snapshot of the workspace as JSON
pub async fn run_detect(ctx: &AppContext) -> Result<()> {
    let workspace = ctx.workspace(&[])?;
    let snapshot = GitMetadataResolver.resolve(&workspace).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
