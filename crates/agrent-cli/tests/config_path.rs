//! Tests for config commands and AGRENT_HOME resolution.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn config_path_honors_agrent_home() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(temp.path().to_str().unwrap()))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_writes_template() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("config.toml");

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("[api]"));
    assert!(contents.contains("base_url"));
}

#[test]
fn config_init_keeps_user_values() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "log_filter = \"debug\"\n").unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("log_filter = \"debug\""));
    assert!(contents.contains("[api]"));
}
