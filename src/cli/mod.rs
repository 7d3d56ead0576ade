//! CLI commands
//!
//! Command implementations for the `itercr` binary.

mod auth;
mod detect;
mod history;
mod interactive;
mod progress;
mod projects;
mod serve;
mod style;
mod submit;

pub use auth::{AuthAction, run_auth};
pub use detect::run_detect;
pub use history::run_history;
pub use interactive::run_interactive;
pub use projects::run_projects;
pub use serve::run_serve;
pub use submit::run_submit;

use itercr::cache::{FileCache, NoopCache, PersonnelCache};
use itercr::config::Config;
use itercr::error::Result;
use itercr::git::GitMetadataResolver;
use itercr::platform::{RemoteService, create_remote_service};
use itercr::workflow::Workflow;
use itercr::workspace::locate_workspace;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the commands share: config, flags and how to build collaborators
pub struct AppContext {
    /// Layered configuration
    pub config: Config,
    /// `--token`
    pub token: Option<String>,
    /// `--path`
    pub path: Option<PathBuf>,
}

impl AppContext {
    /// Remote service client
    pub fn remote(&self) -> Result<Arc<dyn RemoteService>> {
        create_remote_service(&self.config, self.token.clone())
    }

    /// Local cache, or one that forgets everything when no cache dir exists
    pub fn cache(&self) -> Arc<dyn PersonnelCache> {
        match self.config.cache_file() {
            Some(path) => Arc::new(FileCache::new(path)),
            None => Arc::new(NoopCache),
        }
    }

    /// Absolute workspace directory
    pub fn workspace(&self, host_roots: &[String]) -> Result<PathBuf> {
        locate_workspace(self.path.as_deref(), host_roots)
    }

    /// Idle workflow wired to the real collaborators
    pub fn workflow(&self) -> Result<Workflow> {
        Ok(Workflow::new(
            self.remote()?,
            self.cache(),
            Arc::new(GitMetadataResolver),
            self.workspace(&[])?,
        ))
    }
}
