//! Smoke tests to verify command wiring
//!
//! Every test starts from an empty environment and points CONFIG_DIR at an
//! empty directory so no profile file leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn memoctl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("memoctl").unwrap();
    cmd.env_clear().env("CONFIG_DIR", config_dir.path());
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("create-db"))
        .stdout(predicate::str::contains("github-token"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memoctl"));
}

// === GitHub token ===

#[test]
fn test_github_token_from_environment() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .arg("github-token")
        .env("GITHUB_TOKEN", "ghp_from_env")
        .assert()
        .success()
        .stdout("ghp_from_env\n");
}

#[test]
fn test_github_access_token_fallback() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .arg("github-token")
        .env("GITHUB_ACCESS_TOKEN", "ghp_access")
        .assert()
        .success()
        .stdout("ghp_access\n");
}

#[test]
fn test_github_token_missing_exits_1() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .arg("github-token")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("GitHub token not found"));
}

#[test]
fn test_profile_file_supplies_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.staging.env"),
        "GITHUB_TOKEN=ghp_from_profile\n",
    )
    .unwrap();

    memoctl(&dir)
        .arg("github-token")
        .env("APP_PROFILE", "staging")
        .assert()
        .success()
        .stdout("ghp_from_profile\n");
}

#[test]
fn test_process_env_beats_profile_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.local.env"), "GITHUB_TOKEN=from_file\n").unwrap();

    memoctl(&dir)
        .arg("github-token")
        .env("GITHUB_TOKEN", "from_process")
        .assert()
        .success()
        .stdout("from_process\n");
}

// === Configuration errors are fatal before binding ===

#[test]
fn test_serve_rejects_malformed_database_url() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .args(["serve", "--bind", "127.0.0.1:0"])
        .env("DATABASE_URL", "mysql://user:pw@localhost:3306/memo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed DATABASE_URL"));
}

#[test]
fn test_serve_requires_password() {
    let dir = TempDir::new().unwrap();
    memoctl(&dir)
        .args(["serve", "--bind", "127.0.0.1:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing database configuration: password"));
}
