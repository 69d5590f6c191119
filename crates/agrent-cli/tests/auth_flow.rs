//! End-to-end auth flow tests against a mock server.
//!
//! Each test gets an isolated AGRENT_HOME and points AGRENT_API_URL at
//! wiremock, exercising the real binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agrent(temp: &tempfile::TempDir, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("agrent").unwrap();
    cmd.env("AGRENT_HOME", temp.path())
        .env("AGRENT_API_URL", server.uri());
    cmd
}

fn read_session(temp: &tempfile::TempDir) -> serde_json::Value {
    let contents = fs::read_to_string(temp.path().join("session.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn login_stores_token_and_role() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "final-tok",
            "role": "owner",
            "message": "Logged in successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["login", "--username", "ravi", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ravi (owner)."));

    let session = read_session(&temp);
    assert_eq!(session["token"], "final-tok");
    assert_eq!(session["role"], "owner");
}

#[tokio::test(flavor = "multi_thread")]
async fn login_without_role_stores_temp_token_only() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "message": "Please select a role before logging in.",
            "role_needed": true,
            "username": "ravi",
            "temp_token": "temp-tok"
        })))
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["login", "--username", "ravi", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agrent role"));

    let session = read_session(&temp);
    assert_eq!(session["temp_token"], "temp-tok");
    assert_eq!(session["username"], "ravi");
    assert!(session.get("token").is_none(), "no final token on this path");
}

#[tokio::test(flavor = "multi_thread")]
async fn role_command_completes_the_login() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    // Seed the pending role exchange the way a role-needed login leaves it.
    fs::write(
        temp.path().join("session.json"),
        serde_json::json!({"temp_token": "temp-tok", "username": "ravi"}).to_string(),
    )
    .unwrap();

    Mock::given(method("PUT"))
        .and(path("/users/ravi/role"))
        .and(header("x-access-token", "temp-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Role updated to renter successfully! You are now logged in.",
            "token": "final-tok",
            "role": "renter"
        })))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["role", "renter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are now logged in"));

    let session = read_session(&temp);
    assert_eq!(session["token"], "final-tok");
    assert_eq!(session["role"], "renter");
    assert!(session.get("temp_token").is_none());
    assert!(session.get("username").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_prints_server_message_and_fails() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid password!"
        })))
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["login", "--username", "ravi", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid password!"));

    assert!(!temp.path().join("session.json").exists());
}

#[test]
fn logout_clears_the_session() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("session.json"),
        serde_json::json!({"token": "tok", "role": "owner"}).to_string(),
    )
    .unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    let contents = fs::read_to_string(temp.path().join("session.json")).unwrap();
    assert!(!contents.contains("tok"), "token should be cleared");
}

#[test]
fn logout_when_not_logged_in() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn whoami_reports_session_state() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));

    fs::write(
        temp.path().join("session.json"),
        serde_json::json!({"token": "tok", "role": "renter"}).to_string(),
    )
    .unwrap();

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in (renter)."));
}

/// session.json is written with restricted permissions on Unix.
#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn session_file_has_restricted_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "final-tok",
            "role": "owner",
        })))
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["login", "--username", "ravi", "--password", "secret"])
        .assert()
        .success();

    let mode = fs::metadata(temp.path().join("session.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600, "session.json should be 0600");
}
