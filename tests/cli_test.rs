//! End-to-end tests for the kardex binary
//!
//! These run the compiled binary and check argument handling, help output,
//! and the session gate for commands that need an active login. Network
//! traffic is avoided: every scenario here stops before a request happens.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;

/// Top-level help advertises the auth and catalog commands
#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("products"));
}

/// The products subcommand help advertises the catalog operations
#[test]
fn test_products_help_lists_operations() {
    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("products").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));
}

/// --version reports the binary name
#[test]
fn test_version_reports_name() {
    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kardex"));
}

/// Unknown commands are rejected by the parser
#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}

/// An invalid sort order is rejected by the parser
#[test]
fn test_invalid_sort_order_fails() {
    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("products").arg("list").arg("--order").arg("sideways");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--order"));
}

/// A config file with a bad base URL fails validation before any command runs
#[test]
fn test_invalid_base_url_rejected() {
    let (_temp_dir, config_path) = common::temp_config_file("api:\n  base_url: \"not a url\"\n");

    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--config").arg(config_path).arg("logout");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid api.base_url"));
}

/// Commands that need a session fail cleanly when none is stored
#[test]
fn test_whoami_without_session_is_rejected() {
    let creds_dir = TempDir::new().expect("tempdir");
    let (_temp_dir, config_path) = common::temp_config_file("api:\n  timeout_seconds: 1\n");

    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("whoami")
        .env("KARDEX_CREDENTIALS_DIR", creds_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No hay sesión activa"));
}

/// The product listing is gated on a session too
#[test]
fn test_products_list_without_session_is_rejected() {
    let creds_dir = TempDir::new().expect("tempdir");
    let (_temp_dir, config_path) = common::temp_config_file("api:\n  timeout_seconds: 1\n");

    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("products")
        .arg("list")
        .env("KARDEX_CREDENTIALS_DIR", creds_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No hay sesión activa"));
}

/// Logout succeeds even when no session was ever stored
#[test]
fn test_logout_without_session_succeeds() {
    let creds_dir = TempDir::new().expect("tempdir");
    let (_temp_dir, config_path) = common::temp_config_file("api:\n  timeout_seconds: 1\n");

    let mut cmd = Command::cargo_bin("kardex").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("logout")
        .env("KARDEX_CREDENTIALS_DIR", creds_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sesión cerrada"));
}
