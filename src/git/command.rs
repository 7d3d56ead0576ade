//! Thin async wrapper around the `git` CLI

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Runs git commands inside one working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Create a runner for `workdir`
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Working directory the commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git and return trimmed stdout
    ///
    /// Returns `None` when git is missing, exits non-zero, or prints nothing.
    pub async fn run(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            debug!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() { None } else { Some(stdout) }
    }

    /// Whether the working directory is inside a git work tree
    pub async fn is_work_tree(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .await
            .is_some_and(|out| out == "true")
    }
}
