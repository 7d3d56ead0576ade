//! Binary tests

use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config, cache and token
fn itercr(home: &TempDir) -> Command {
    let config = home.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("itercr").unwrap();
    cmd.env("ITERCR_CONFIG", &config)
        .env("ITERCR_CACHE_PATH", home.path().join("recent.json"))
        .env_remove("ITERCR_TOKEN")
        .env_remove("ITERCR_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    itercr(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("detect"));
}

#[test]
fn test_auth_setup_explains_token_sources() {
    let home = TempDir::new().unwrap();
    itercr(&home)
        .args(["auth", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ITERCR_TOKEN"));
}

#[test]
fn test_detect_outside_repo_prints_empty_snapshot() {
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    itercr(&home)
        .args(["detect", "--path"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}

#[test]
fn test_history_empty() {
    let home = TempDir::new().unwrap();
    itercr(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions"));
}

#[test]
fn test_auth_test_without_token_fails() {
    let home = TempDir::new().unwrap();
    itercr(&home)
        .args(["auth", "test", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no credential"));
}

#[test]
fn test_submit_dry_run_prints_plan() {
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let mut server = Server::new();
    let projects = server
        .mock("GET", "/projects")
        .with_status(200)
        .with_body(
            json!({"code": 0, "data": [{"id": 1, "name": "Core"}, {"id": 2, "name": "Growth"}]})
                .to_string(),
        )
        .expect_at_least(1)
        .create();
    server
        .mock("GET", "/users")
        .with_status(200)
        .with_body(json!({"code": 0, "data": []}).to_string())
        .create();
    let iterations = server.mock("POST", "/iterations").expect(0).create();

    let record = workspace.path().join("record.json");
    fs::write(
        &record,
        json!({
            "basicInfo": {"projectLine": "growth", "iterationName": "v1", "onlineTime": "2025-01-01"},
            "projectInfo": {"gitUrl": "https://x/y", "gitProjectName": "y", "branch": "feat/a"},
            "modules": {"componentModules": [], "functionModules": []}
        })
        .to_string(),
    )
    .unwrap();

    itercr(&home)
        .args(["--api-url", &server.url(), "--token", "t", "--path"])
        .arg(workspace.path())
        .arg("submit")
        .arg(&record)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projectId\": 2"))
        .stdout(predicate::str::contains("Dry run"));

    projects.assert();
    iterations.assert();
}

#[test]
fn test_submit_rejects_incomplete_record() {
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let record = workspace.path().join("record.json");
    fs::write(
        &record,
        json!({"basicInfo": {"projectLine": "2"}}).to_string(),
    )
    .unwrap();

    itercr(&home)
        .args(["--api-url", "http://127.0.0.1:9", "--path"])
        .arg(workspace.path())
        .arg("submit")
        .arg(&record)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("iterationName"));
}

#[test]
fn test_serve_speaks_json_lines() {
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let input = [
        json!({"step": "status"}).to_string(),
        json!({"step": "start"}).to_string(),
        json!({"step": "basic_info", "payload": {"projectLine": "2"}}).to_string(),
        "not json".to_string(),
        json!({"step": "abandon"}).to_string(),
    ]
    .join("\n");

    let output = itercr(&home)
        .args(["--api-url", "http://127.0.0.1:9", "--path"])
        .arg(workspace.path())
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let responses: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["ok"], true);
    assert_eq!(responses[0]["state"], "idle");

    assert_eq!(responses[1]["ok"], true);
    assert_eq!(responses[1]["state"], "started");
    assert_eq!(responses[1]["output"]["type"], "started");

    assert_eq!(responses[2]["ok"], false);
    assert_eq!(responses[2]["state"], "started");
    assert_eq!(responses[2]["error"]["kind"], "validation");
    assert_eq!(
        responses[2]["error"]["missing"],
        json!(["iterationName", "onlineTime"])
    );

    assert_eq!(responses[3]["ok"], false);
    assert_eq!(responses[3]["error"]["kind"], "validation");

    assert_eq!(responses[4]["ok"], true);
    assert_eq!(responses[4]["state"], "idle");
}
