//! Git metadata resolution against real repositories
//!
//! Skipped when `git` is not installed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use itercr::git::resolve_snapshot;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str], at: Option<DateTime<Utc>>) {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com");
    if let Some(at) = at {
        let stamp = format!("{} +0000", at.timestamp());
        cmd.env("GIT_AUTHOR_DATE", &stamp)
            .env("GIT_COMMITTER_DATE", &stamp);
    }
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit(dir: &Path, message: &str, at: DateTime<Utc>) {
    git(
        dir,
        &["commit", "--allow-empty", "-q", "-m", message],
        Some(at),
    );
}

/// Fresh repository on `main`
fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"], None);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"], None);
    dir
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_main_branch_counts_days_since_root_commit() {
    if !git_available() {
        return;
    }
    let now = fixed_now();
    let repo = init_repo();
    commit(repo.path(), "root", now - Duration::days(10));

    let snapshot = resolve_snapshot(repo.path(), now).await;
    assert_eq!(snapshot.branch.as_deref(), Some("main"));
    assert_eq!(snapshot.estimated_days, Some(10));
}

#[tokio::test]
async fn test_feature_branch_clamped_to_thirty_days() {
    if !git_available() {
        return;
    }
    let now = fixed_now();
    let repo = init_repo();
    commit(repo.path(), "root", now - Duration::days(45));
    git(repo.path(), &["checkout", "-q", "-b", "feat/a"], None);
    commit(repo.path(), "work", now - Duration::days(2));

    let snapshot = resolve_snapshot(repo.path(), now).await;
    assert_eq!(snapshot.branch.as_deref(), Some("feat/a"));
    assert_eq!(snapshot.estimated_days, Some(30));
}

#[tokio::test]
async fn test_feature_branch_diverged_today_is_one_day() {
    if !git_available() {
        return;
    }
    let now = fixed_now();
    let repo = init_repo();
    commit(repo.path(), "root", now);
    git(repo.path(), &["checkout", "-q", "-b", "feat/b"], None);

    let snapshot = resolve_snapshot(repo.path(), now).await;
    assert_eq!(snapshot.estimated_days, Some(1));
}

#[tokio::test]
async fn test_project_from_origin_remote() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    commit(repo.path(), "root", fixed_now());
    git(
        repo.path(),
        &["remote", "add", "origin", "git@example.com:team/my-app.git"],
        None,
    );

    let snapshot = resolve_snapshot(repo.path(), fixed_now()).await;
    assert_eq!(
        snapshot.project_url.as_deref(),
        Some("git@example.com:team/my-app.git")
    );
    assert_eq!(snapshot.project_name.as_deref(), Some("my-app"));
}

#[tokio::test]
async fn test_config_file_wins_over_remote() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    commit(repo.path(), "root", fixed_now());
    git(
        repo.path(),
        &["remote", "add", "origin", "https://example.com/team/other.git"],
        None,
    );
    fs::write(
        repo.path().join(".itercr"),
        "# project settings\nproject_url = \"https://example.com/team/portal.git\"\n",
    )
    .unwrap();

    let snapshot = resolve_snapshot(repo.path(), fixed_now()).await;
    assert_eq!(
        snapshot.project_url.as_deref(),
        Some("https://example.com/team/portal.git")
    );
    assert_eq!(snapshot.project_name.as_deref(), Some("portal"));
}

#[tokio::test]
async fn test_no_remote_humanizes_directory() {
    if !git_available() {
        return;
    }
    let parent = TempDir::new().unwrap();
    let dir = parent.path().join("order-service_api");
    fs::create_dir(&dir).unwrap();
    git(&dir, &["init", "-q"], None);
    commit(&dir, "root", fixed_now());

    let snapshot = resolve_snapshot(&dir, fixed_now()).await;
    assert_eq!(snapshot.project_url, None);
    assert_eq!(snapshot.project_name.as_deref(), Some("Order Service Api"));
}

#[tokio::test]
async fn test_detached_head_has_no_branch() {
    if !git_available() {
        return;
    }
    let now = fixed_now();
    let repo = init_repo();
    commit(repo.path(), "root", now - Duration::days(3));
    git(repo.path(), &["checkout", "-q", "--detach"], None);

    let snapshot = resolve_snapshot(repo.path(), now).await;
    assert_eq!(snapshot.branch, None);
    assert_eq!(snapshot.estimated_days, Some(7));
}

#[tokio::test]
async fn test_detached_feature_commit_uses_default_estimate() {
    if !git_available() {
        return;
    }
    let now = fixed_now();
    let repo = init_repo();
    commit(repo.path(), "root", now - Duration::days(12));
    git(repo.path(), &["checkout", "-q", "-b", "feat/c"], None);
    commit(repo.path(), "work", now - Duration::days(4));
    git(repo.path(), &["checkout", "-q", "--detach"], None);

    let snapshot = resolve_snapshot(repo.path(), now).await;
    assert_eq!(snapshot.branch, None);
    assert_eq!(snapshot.estimated_days, Some(7));
}
