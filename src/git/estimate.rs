//! Effort estimation from branch history
//!
//! Each strategy is a pure function over [`BranchHistory`] and an explicit
//! `now`. Strategies run in order and the first `Some` wins; if all decline,
//! [`DEFAULT_ESTIMATED_DAYS`] is used.

use chrono::{DateTime, Utc};

/// Estimate used when every strategy declines
pub const DEFAULT_ESTIMATED_DAYS: u32 = 7;

/// Branch names treated as the main line
pub const MAIN_LINE_BRANCHES: &[&str] = &["main", "master"];

/// Window for the commit-rate strategies
pub const RECENT_WINDOW_DAYS: u32 = 30;

const FEATURE_MIN_DAYS: u32 = 1;
const FEATURE_MAX_DAYS: u32 = 30;
const COMMITS_PER_DAY: u32 = 3;
const COMMIT_RATE_MIN_DAYS: u32 = 3;
const SECONDS_PER_DAY: i64 = 86_400;

/// Facts about the checked-out branch, gathered from git
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchHistory {
    /// Current branch, `None` when detached
    pub branch: Option<String>,
    /// Timestamp of the oldest root commit reachable from HEAD
    pub root_commit_at: Option<DateTime<Utc>>,
    /// Timestamp of the merge-base with the main line
    pub merge_base_at: Option<DateTime<Utc>>,
    /// When the branch was created (oldest reflog entry)
    pub branch_created_at: Option<DateTime<Utc>>,
    /// Commits reachable from HEAD in the last [`RECENT_WINDOW_DAYS`] days
    pub recent_commits: Option<u32>,
}

impl BranchHistory {
    /// Whether the branch is `main` or `master`
    pub fn is_main_line(&self) -> bool {
        self.branch
            .as_deref()
            .is_some_and(|b| MAIN_LINE_BRANCHES.contains(&b))
    }
}

/// An estimation strategy
pub type Strategy = fn(&BranchHistory, DateTime<Utc>) -> Option<u32>;

/// Main line: repository age, then recent activity
pub const MAIN_LINE_STRATEGIES: &[Strategy] = &[days_since_root_commit, commit_rate_when_active];

/// Feature branches: divergence age, branch age, then recent activity
pub const FEATURE_STRATEGIES: &[Strategy] =
    &[days_since_merge_base, days_since_branch_created, commit_rate];

/// Strategy list for the given history; empty when detached
pub fn strategies_for(history: &BranchHistory) -> &'static [Strategy] {
    match history.branch {
        None => &[],
        Some(_) if history.is_main_line() => MAIN_LINE_STRATEGIES,
        Some(_) => FEATURE_STRATEGIES,
    }
}

/// Estimate effort in days
pub fn estimate_days(history: &BranchHistory, now: DateTime<Utc>) -> u32 {
    strategies_for(history)
        .iter()
        .find_map(|strategy| strategy(history, now))
        .unwrap_or(DEFAULT_ESTIMATED_DAYS)
}

/// `ceil((now - reference) / 1 day)`; `None` if `reference` is in the future
pub fn days_since(reference: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let seconds = (now - reference).num_seconds();
    if seconds < 0 {
        return None;
    }
    u32::try_from((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).ok()
}

/// Days since the first commit of the whole history
pub fn days_since_root_commit(history: &BranchHistory, now: DateTime<Utc>) -> Option<u32> {
    days_since(history.root_commit_at?, now)
}

/// Days since divergence from the main line, clamped to `[1, 30]`
pub fn days_since_merge_base(history: &BranchHistory, now: DateTime<Utc>) -> Option<u32> {
    days_since(history.merge_base_at?, now).map(clamp_feature)
}

/// Days since the branch was created, clamped to `[1, 30]`
pub fn days_since_branch_created(history: &BranchHistory, now: DateTime<Utc>) -> Option<u32> {
    days_since(history.branch_created_at?, now).map(clamp_feature)
}

/// `max(ceil(recent_commits / 3), 3)`
pub fn commit_rate(history: &BranchHistory, _now: DateTime<Utc>) -> Option<u32> {
    let commits = history.recent_commits?;
    Some(commits.div_ceil(COMMITS_PER_DAY).max(COMMIT_RATE_MIN_DAYS))
}

/// Like [`commit_rate`], but declines when there were no recent commits
pub fn commit_rate_when_active(history: &BranchHistory, now: DateTime<Utc>) -> Option<u32> {
    match history.recent_commits {
        Some(0) | None => None,
        Some(_) => commit_rate(history, now),
    }
}

fn clamp_feature(days: u32) -> u32 {
    days.clamp(FEATURE_MIN_DAYS, FEATURE_MAX_DAYS)
}
