//! Vehicle/booking/profile commands against a mock server.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn logged_in_home(token: &str, role: &str) -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("session.json"),
        serde_json::json!({"token": token, "role": role}).to_string(),
    )
    .unwrap();
    temp
}

fn agrent(temp: &tempfile::TempDir, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("agrent").unwrap();
    cmd.env("AGRENT_HOME", temp.path())
        .env("AGRENT_API_URL", server.uri());
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn vehicles_list_sends_stored_token() {
    let server = MockServer::start().await;
    let temp = logged_in_home("tok-abc", "owner");

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .and(header("x-access-token", "tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "_id": "v1",
            "vehicle_name": "Tractor",
            "model": "MF 241",
            "type": "tractor",
            "rent_price": 1200.0,
            "availability": false,
        }])))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["vehicles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tractor"))
        .stdout(predicate::str::contains("rented"));
}

#[tokio::test(flavor = "multi_thread")]
async fn vehicles_pause_sends_partial_update() {
    let server = MockServer::start().await;
    let temp = logged_in_home("tok-abc", "owner");

    Mock::given(method("PUT"))
        .and(path("/vehicles/v1"))
        .and(body_json(serde_json::json!({"availability": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Vehicle updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args(["vehicles", "pause", "v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle updated successfully"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bookings_create_sends_iso_times() {
    let server = MockServer::start().await;
    let temp = logged_in_home("tok-abc", "renter");

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(serde_json::json!({
            "vehicle_id": "v1",
            "start_time": "2026-08-10T09:00:00",
            "end_time": "2026-08-12T18:00:00",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Booking request sent successfully! Waiting for owner confirmation."
        })))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args([
            "bookings",
            "create",
            "--vehicle",
            "v1",
            "--from",
            "2026-08-10 09:00",
            "--to",
            "2026-08-12 18:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Booking request sent"));
}

#[test]
fn bookings_create_rejects_bad_times_locally() {
    let temp = logged_in_home("tok-abc", "renter");

    Command::cargo_bin("agrent")
        .unwrap()
        .env("AGRENT_HOME", temp.path())
        .args([
            "bookings", "create", "--vehicle", "v1", "--from", "soon", "--to", "later",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start time"));
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_conflict_surfaces_server_message() {
    let server = MockServer::start().await;
    let temp = logged_in_home("tok-abc", "renter");

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "message": "Vehicle is already booked during this period."
        })))
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .args([
            "bookings",
            "create",
            "--vehicle",
            "v1",
            "--from",
            "2026-08-10 09:00",
            "--to",
            "2026-08-12 18:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already booked"));
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_joins_three_fetches() {
    let server = MockServer::start().await;
    let temp = logged_in_home("tok-abc", "owner");

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "u1",
            "username": "ravi",
            "fullname": "Ravi Kumar",
            "phone": "9876543210",
            "address": "Warangal",
            "role": "owner",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    agrent(&temp, &server)
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ravi Kumar"))
        .stdout(predicate::str::contains("vehicles:  0"));
}
