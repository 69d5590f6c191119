//! Smoke tests for CLI argument parsing.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("agrent")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("vehicles"))
        .stdout(predicate::str::contains("bookings"))
        .stdout(predicate::str::contains("profile"));
}

#[test]
fn version_prints() {
    Command::cargo_bin("agrent")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agrent"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("agrent")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn role_rejects_invalid_value() {
    let temp = tempfile::tempdir().unwrap();
    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .args(["role", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid role"));
}
