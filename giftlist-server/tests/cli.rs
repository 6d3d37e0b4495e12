//! Integration tests for the giftlist binary.
//!
//! These tests cover argument parsing and start-up failures; the API itself
//! is exercised in-process by `api.rs`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn giftlist_cmd() -> Command {
    let mut cmd = Command::cargo_bin("giftlist").expect("Failed to find giftlist binary");
    for var in [
        "ADMIN_PASSWORD",
        "GIFTLIST_ADMIN_PASSWORD",
        "PORT",
        "GIFTLIST_PORT",
        "GIFTLIST_DATA_DIR",
        "GIFTLIST_DATABASE",
        "GIFTLIST_IMAGES_DIR",
        "GIFTLIST_BUSY_TIMEOUT_MS",
        "GIFTLIST_BIND_ADDRESS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_version_flag() {
    giftlist_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("giftlist"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help_flag() {
    giftlist_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Serve the gift registry API"))
        .stdout(predicate::str::contains("--data-dir"));
}

#[test]
fn test_cli_unknown_flag() {
    giftlist_cmd()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_admin_password_fails() {
    let dir = TempDir::new().unwrap();
    giftlist_cmd()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("admin_password"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.yaml");
    std::fs::write(&config, "port: [oops]\n").unwrap();

    giftlist_cmd()
        .env("ADMIN_PASSWORD", "s3cret")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom.yaml"));
}

#[test]
fn test_zero_busy_timeout_fails() {
    let dir = TempDir::new().unwrap();
    giftlist_cmd()
        .env("ADMIN_PASSWORD", "s3cret")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--busy-timeout")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("busy_timeout_ms"));
}
