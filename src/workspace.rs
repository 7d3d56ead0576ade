//! Workspace location
//!
//! Priority: explicit override, host-provided roots, `ITERCR_WORKSPACE`,
//! `PWD`, then the process working directory.

use crate::config::non_empty_env;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the workspace
pub const WORKSPACE_ENV: &str = "ITERCR_WORKSPACE";

/// Resolve the absolute workspace directory
pub fn locate_workspace(explicit: Option<&Path>, host_roots: &[String]) -> Result<PathBuf> {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| host_roots.iter().find_map(|root| root_to_path(root)))
        .or_else(|| non_empty_env(WORKSPACE_ENV).map(PathBuf::from))
        .or_else(|| non_empty_env("PWD").map(PathBuf::from));

    let cwd = env::current_dir()?;
    let path = match candidate {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => cwd,
    };

    Ok(path.canonicalize().unwrap_or(path))
}

/// Host roots may be plain paths or `file://` URIs
fn root_to_path(root: &str) -> Option<PathBuf> {
    let root = root.trim();
    if root.is_empty() {
        return None;
    }
    if root.starts_with("file://") {
        return url::Url::parse(root).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(root))
}
