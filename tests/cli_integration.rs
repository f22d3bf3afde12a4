//! CLI integration tests
//!
//! End-to-end tests for CLI commands using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the route-planner binary with credentials and overrides cleared.
///
/// Runs inside `dir` so a developer's `.env` or config file cannot leak in.
fn planner_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("route-planner").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("GOOGLE_MAPS_API_KEY")
        .env_remove("ROUTE_PLANNER_PORT")
        .env_remove("ROUTE_PLANNER_HOST")
        .env_remove("ROUTE_PLANNER_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_output() {
    let temp = TempDir::new().unwrap();
    planner_cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("route-planner"));
}

#[test]
fn test_help_shows_all_commands() {
    let temp = TempDir::new().unwrap();
    planner_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_serve_help() {
    let temp = TempDir::new().unwrap();
    planner_cmd(&temp)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--host"));
}

#[test]
fn test_plan_help() {
    let temp = TempDir::new().unwrap();
    planner_cmd(&temp)
        .args(["plan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--start"))
        .stdout(predicate::str::contains("--pretty"));
}

#[test]
fn test_config_init_creates_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("test.toml");

    planner_cmd(&temp)
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[completion]"));
    assert!(content.contains("[maps]"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("route-planner.toml"), "existing").unwrap();

    planner_cmd(&temp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_serve_without_credentials_fails_at_startup() {
    let temp = TempDir::new().unwrap();

    planner_cmd(&temp)
        .args(["serve", "-p", "18765"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_serve_missing_maps_key_fails_at_startup() {
    let temp = TempDir::new().unwrap();

    planner_cmd(&temp)
        .env("OPENAI_API_KEY", "sk-test")
        .args(["serve", "-p", "18765"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_MAPS_API_KEY"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("route-planner.toml"),
        "[pipeline]\nmax_concurrent_lookups = 0\n",
    )
    .unwrap();

    planner_cmd(&temp)
        .args(["plan", "京都へ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrent_lookups"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    planner_cmd(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("route-planner"));
}
