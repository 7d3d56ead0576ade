//! Local cache of recently used people, project lines and submissions
//!
//! Best-effort by contract: callers log and ignore failures.

use crate::error::{Error, Result};
use crate::types::{SubmissionEntry, UserId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Maximum remembered ids per list
pub const MAX_RECENT_IDS: usize = 20;

/// Maximum remembered project lines
pub const MAX_RECENT_PROJECT_LINES: usize = 10;

/// Maximum remembered submissions
pub const MAX_SUBMISSIONS: usize = 20;

/// Cache of recent personnel and submissions
pub trait PersonnelCache: Send + Sync {
    /// Recently used participant ids, most recent first
    fn recent_participants(&self) -> Result<Vec<UserId>>;

    /// Recently used reviewer ids, most recent first
    fn recent_reviewers(&self) -> Result<Vec<UserId>>;

    /// Recently used project lines, most recent first
    fn recent_project_lines(&self) -> Result<Vec<String>>;

    /// Past submissions, most recent first
    fn submissions(&self) -> Result<Vec<SubmissionEntry>>;

    /// Move the given ids to the front of the recent lists
    fn record_recent_personnel(&self, participants: &[UserId], reviewers: &[UserId])
    -> Result<()>;

    /// Move `project_line` to the front of the recent project lines
    fn record_project_line(&self, project_line: &str) -> Result<()>;

    /// Remember a completed submission
    fn record_submission(&self, entry: &SubmissionEntry) -> Result<()>;
}

/// On-disk cache contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheData {
    /// Recent participant ids
    #[serde(default)]
    pub recent_participants: Vec<UserId>,
    /// Recent reviewer ids
    #[serde(default)]
    pub recent_reviewers: Vec<UserId>,
    /// Recent project lines
    #[serde(default)]
    pub recent_project_lines: Vec<String>,
    /// Past submissions
    #[serde(default)]
    pub submissions: Vec<SubmissionEntry>,
}

impl CacheData {
    fn record_personnel(&mut self, participants: &[UserId], reviewers: &[UserId]) {
        promote(&mut self.recent_participants, participants, MAX_RECENT_IDS);
        promote(&mut self.recent_reviewers, reviewers, MAX_RECENT_IDS);
    }

    fn record_project_line(&mut self, project_line: &str) {
        let line = project_line.trim();
        if !line.is_empty() {
            promote(
                &mut self.recent_project_lines,
                &[line.to_string()],
                MAX_RECENT_PROJECT_LINES,
            );
        }
    }

    fn record_submission(&mut self, entry: &SubmissionEntry) {
        self.submissions.insert(0, entry.clone());
        self.submissions.truncate(MAX_SUBMISSIONS);
    }
}

/// Move `items` to the front of `list` (keeping their order), dropping duplicates
fn promote<T: Clone + PartialEq>(list: &mut Vec<T>, items: &[T], cap: usize) {
    let mut fresh: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !fresh.contains(item) {
            fresh.push(item.clone());
        }
    }
    list.retain(|existing| !fresh.contains(existing));
    fresh.append(list);
    fresh.truncate(cap);
    *list = fresh;
}

/// JSON file cache
///
/// Every write re-reads the file, so concurrent processes race on
/// read-modify-write; only one session is expected at a time.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Cache backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<cache_dir>/itercr/recent.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("itercr").join("recent.json"))
    }

    /// File backing this cache
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache; a missing file is an empty cache
    pub fn load(&self) -> Result<CacheData> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| Error::Cache(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CacheData::default()),
            Err(e) => Err(Error::Cache(format!("{}: {e}", self.path.display()))),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut CacheData)) -> Result<()> {
        let mut data = self.load()?;
        apply(&mut data);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Cache(format!("{}: {e}", parent.display())))?;
        }
        let text = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, text)
            .map_err(|e| Error::Cache(format!("{}: {e}", self.path.display())))?;

        debug!("Updated cache at {}", self.path.display());
        Ok(())
    }
}

impl PersonnelCache for FileCache {
    fn recent_participants(&self) -> Result<Vec<UserId>> {
        Ok(self.load()?.recent_participants)
    }

    fn recent_reviewers(&self) -> Result<Vec<UserId>> {
        Ok(self.load()?.recent_reviewers)
    }

    fn recent_project_lines(&self) -> Result<Vec<String>> {
        Ok(self.load()?.recent_project_lines)
    }

    fn submissions(&self) -> Result<Vec<SubmissionEntry>> {
        Ok(self.load()?.submissions)
    }

    fn record_recent_personnel(
        &self,
        participants: &[UserId],
        reviewers: &[UserId],
    ) -> Result<()> {
        self.update(|data| data.record_personnel(participants, reviewers))
    }

    fn record_project_line(&self, project_line: &str) -> Result<()> {
        self.update(|data| data.record_project_line(project_line))
    }

    fn record_submission(&self, entry: &SubmissionEntry) -> Result<()> {
        self.update(|data| data.record_submission(entry))
    }
}

/// Cache held in memory, for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryCache {
    data: Mutex<CacheData>,
}

impl MemoryCache {
    /// Empty in-memory cache
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory cache seeded with `data`
    pub fn with_data(data: CacheData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> CacheData {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheData> {
        self.data
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PersonnelCache for MemoryCache {
    fn recent_participants(&self) -> Result<Vec<UserId>> {
        Ok(self.lock().recent_participants.clone())
    }

    fn recent_reviewers(&self) -> Result<Vec<UserId>> {
        Ok(self.lock().recent_reviewers.clone())
    }

    fn recent_project_lines(&self) -> Result<Vec<String>> {
        Ok(self.lock().recent_project_lines.clone())
    }

    fn submissions(&self) -> Result<Vec<SubmissionEntry>> {
        Ok(self.lock().submissions.clone())
    }

    fn record_recent_personnel(
        &self,
        participants: &[UserId],
        reviewers: &[UserId],
    ) -> Result<()> {
        self.lock().record_personnel(participants, reviewers);
        Ok(())
    }

    fn record_project_line(&self, project_line: &str) -> Result<()> {
        self.lock().record_project_line(project_line);
        Ok(())
    }

    fn record_submission(&self, entry: &SubmissionEntry) -> Result<()> {
        self.lock().record_submission(entry);
        Ok(())
    }
}

/// Cache that remembers nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl PersonnelCache for NoopCache {
    fn recent_participants(&self) -> Result<Vec<UserId>> {
        Ok(Vec::new())
    }

    fn recent_reviewers(&self) -> Result<Vec<UserId>> {
        Ok(Vec::new())
    }

    fn recent_project_lines(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn submissions(&self) -> Result<Vec<SubmissionEntry>> {
        Ok(Vec::new())
    }

    fn record_recent_personnel(&self, _: &[UserId], _: &[UserId]) -> Result<()> {
        Ok(())
    }

    fn record_project_line(&self, _: &str) -> Result<()> {
        Ok(())
    }

    fn record_submission(&self, _: &SubmissionEntry) -> Result<()> {
        Ok(())
    }
}
