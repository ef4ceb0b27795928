//! Tests for the registration endpoint

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum_test::TestServer;
use common::{client_cookie, create_test_server, new_client, register_user, registration};
use helmet_dashboard::routes::create_router;
use helmet_dashboard::{AppState, InMemoryClientStorage};
use serde_json::Value;

/// Test: successful registration sends the user to the login page
#[tokio::test]
async fn test_register_success() {
    let server = create_test_server();
    let client = new_client(&server).await;

    let response = server
        .post("/api/register")
        .add_cookie(client_cookie(&client))
        .json(&registration("Ada", "ada@example.com", "secret1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["redirect"], "/login");
    let id = body["id"].as_str().unwrap();
    assert!(id.starts_with('#'));
    assert_eq!(id.len(), 7);
}

/// Test: the same email cannot register twice
#[tokio::test]
async fn test_register_duplicate_email() {
    let server = create_test_server();
    let client = new_client(&server).await;
    register_user(&server, &client, "ada@example.com", "secret1").await;

    let response = server
        .post("/api/register")
        .add_cookie(client_cookie(&client))
        .json(&registration("Ada Again", "ada@example.com", "secret2"))
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

/// Test: form validation messages reach the browser
#[tokio::test]
async fn test_register_validation() {
    let server = create_test_server();
    let client = new_client(&server).await;

    let cases = [
        ("password", "12345", "Password must be at least 6 characters."),
        ("age", "-3", "Please enter a valid positive age."),
        ("email", "not-an-email", "Please enter a valid email address."),
        ("bloodType", "", "Please select a blood type."),
    ];

    for (field, value, reason) in cases {
        let mut form = registration("Ada", "ada@example.com", "secret1");
        form[field] = Value::from(value);

        let response = server
            .post("/api/register")
            .add_cookie(client_cookie(&client))
            .json(&form)
            .await;

        assert_eq!(response.status_code(), 400, "{}", field);
        let body: Value = response.json();
        assert_eq!(body["reason"], reason, "{}", field);
    }
}

/// Test: registration waits out the configured delay
#[tokio::test]
async fn test_register_delay_applied() {
    let mut config = common::test_config();
    config.registration_delay_ms = 150;
    let state = AppState::new(InMemoryClientStorage::new(), config).unwrap();
    let server = TestServer::new(create_router(Arc::new(state))).unwrap();
    let client = new_client(&server).await;

    let started = Instant::now();
    register_user(&server, &client, "slow@example.com", "secret1").await;
    assert!(started.elapsed() >= Duration::from_millis(150));
}
