//! Git workspace metadata
//!
//! Derives project URL/name, current branch and an effort estimate from a
//! local checkout. Resolution never fails: anything that cannot be determined
//! is left absent.

mod command;
mod config_file;
mod estimate;
mod remote;

pub use command::GitCli;
pub use config_file::{
    JSON_FILE, KEY_VALUE_FILE, ProjectConfig, parse_json, parse_key_value, read_project_config,
};
pub use estimate::{
    BranchHistory, DEFAULT_ESTIMATED_DAYS, MAIN_LINE_BRANCHES, RECENT_WINDOW_DAYS, Strategy,
    days_since, estimate_days, strategies_for,
};
pub use remote::{humanize_dir_name, project_name_from_url};

use crate::types::GitSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tracing::debug;

/// Source of workspace metadata
///
/// The workflow depends on this trait so tests can supply a fixed snapshot.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Derive a snapshot for `workspace`
    async fn resolve(&self, workspace: &Path) -> GitSnapshot;
}

/// Resolves metadata by shelling out to `git`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitMetadataResolver;

#[async_trait]
impl MetadataSource for GitMetadataResolver {
    async fn resolve(&self, workspace: &Path) -> GitSnapshot {
        resolve_snapshot(workspace, Utc::now()).await
    }
}

/// Resolve a snapshot as of `now`
pub async fn resolve_snapshot(workspace: &Path, now: DateTime<Utc>) -> GitSnapshot {
    let git = GitCli::new(workspace);

    if !git.is_work_tree().await {
        debug!("{} is not a git work tree", workspace.display());
        return GitSnapshot::default();
    }

    let (project_url, project_name) = resolve_project(&git).await;
    let history = gather_history(&git).await;
    let estimated_days = estimate_days(&history, now);

    debug!(
        "Resolved git metadata: branch={:?} estimate={estimated_days}d",
        history.branch
    );

    GitSnapshot {
        project_url,
        project_name,
        branch: history.branch,
        estimated_days: Some(estimated_days),
    }
}

async fn resolve_project(git: &GitCli) -> (Option<String>, Option<String>) {
    let workdir = git.workdir();

    // Config files live at the repository root, which may differ from the workspace
    let root = git.run(&["rev-parse", "--show-toplevel"]).await;
    let config = root
        .as_deref()
        .map(Path::new)
        .and_then(read_project_config)
        .or_else(|| read_project_config(workdir));

    if let Some(config) = config {
        let name = config
            .project_name
            .or_else(|| config.project_url.as_deref().and_then(project_name_from_url));
        if name.is_some() {
            return (config.project_url, name);
        }
    }

    if let Some(url) = remote_url(git).await {
        if let Some(name) = project_name_from_url(&url) {
            return (Some(url), Some(name));
        }
    }

    let base = root
        .as_deref()
        .map(Path::new)
        .unwrap_or(workdir)
        .file_name()
        .map(|n| humanize_dir_name(&n.to_string_lossy()))
        .filter(|n| !n.is_empty());

    (None, base)
}

async fn remote_url(git: &GitCli) -> Option<String> {
    if let Some(url) = git.run(&["remote", "get-url", "origin"]).await {
        return Some(url);
    }

    let remotes = git.run(&["remote"]).await?;
    let first = remotes.lines().next()?.trim().to_string();
    git.run(&["remote", "get-url", &first]).await
}

async fn gather_history(git: &GitCli) -> BranchHistory {
    let branch = git.run(&["symbolic-ref", "--short", "-q", "HEAD"]).await;

    let since = format!("--since={RECENT_WINDOW_DAYS}.days.ago");
    let recent_commits = git
        .run(&["rev-list", "--count", &since, "HEAD"])
        .await
        .and_then(|out| out.parse().ok());

    let root_commit_at = root_commit_at(git).await;

    let mut history = BranchHistory {
        branch,
        root_commit_at,
        recent_commits,
        ..BranchHistory::default()
    };

    // Detached HEAD has no strategies, so only named feature branches need these
    if let Some(name) = history.branch.clone().filter(|_| !history.is_main_line()) {
        history.merge_base_at = merge_base_at(git).await;
        history.branch_created_at = branch_created_at(git, &name).await.or(root_commit_at);
    }

    history
}

async fn root_commit_at(git: &GitCli) -> Option<DateTime<Utc>> {
    let out = git
        .run(&["log", "--max-parents=0", "--format=%ct", "HEAD"])
        .await?;
    out.lines()
        .filter_map(|line| line.trim().parse::<i64>().ok())
        .min()
        .and_then(from_unix)
}

async fn merge_base_at(git: &GitCli) -> Option<DateTime<Utc>> {
    for base in ["main", "master", "origin/main", "origin/master"] {
        if let Some(sha) = git.run(&["merge-base", "HEAD", base]).await {
            let ts = git.run(&["show", "-s", "--format=%ct", &sha]).await;
            if let Some(at) = ts.and_then(|t| t.parse().ok()).and_then(from_unix) {
                debug!("Merge-base with {base}: {sha}");
                return Some(at);
            }
        }
    }
    None
}

async fn branch_created_at(git: &GitCli, branch: &str) -> Option<DateTime<Utc>> {
    let reference = format!("refs/heads/{branch}");
    let out = git
        .run(&["reflog", "show", "--date=unix", "--format=%gd", &reference])
        .await?;

    // Entries look like `refs/heads/feat@{1700000000}`, newest first
    let oldest = out.lines().last()?;
    let start = oldest.rfind("@{")? + 2;
    let end = oldest[start..].find('}')? + start;
    oldest[start..end].parse().ok().and_then(from_unix)
}

fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_non_repo_yields_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshot = resolve_snapshot(dir.path(), Utc::now()).await;
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_from_unix() {
        assert_eq!(from_unix(0).unwrap().timestamp(), 0);
    }
}
