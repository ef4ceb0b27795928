//! Tests for the login endpoint

mod common;

use common::{client_cookie, create_test_server, new_client, register_user};
use serde_json::{json, Value};

/// Test: login with no roster at all fails generically
#[tokio::test]
async fn test_login_without_roster() {
    let server = create_test_server();
    let client = new_client(&server).await;

    let response = server
        .post("/api/login")
        .add_cookie(client_cookie(&client))
        .json(&json!({ "email": "unknown@example.com", "password": "whatever" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "Incorrect email or password.");
}

/// Test: wrong password and unknown email give the same answer
#[tokio::test]
async fn test_login_failures_identical() {
    let server = create_test_server();
    let client = new_client(&server).await;
    register_user(&server, &client, "a@b.com", "secret1").await;

    let wrong_password = server
        .post("/api/login")
        .add_cookie(client_cookie(&client))
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .await;
    let unknown_email = server
        .post("/api/login")
        .add_cookie(client_cookie(&client))
        .json(&json!({ "email": "nobody@b.com", "password": "secret1" }))
        .await;

    assert_eq!(wrong_password.status_code(), 401);
    assert_eq!(unknown_email.status_code(), 401);
    assert_eq!(wrong_password.text(), unknown_email.text());

    let response = server
        .get("/api/session")
        .add_cookie(client_cookie(&client))
        .await;
    let body: Value = response.json();
    assert_eq!(body["authenticated"], false);
}

/// Test: correct credentials log in and point at the landing page
#[tokio::test]
async fn test_login_success() {
    let server = create_test_server();
    let client = new_client(&server).await;
    register_user(&server, &client, "a@b.com", "secret1").await;

    let response = server
        .post("/api/login")
        .add_cookie(client_cookie(&client))
        .json(&json!({ "email": "A@B.com", "password": "secret1" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["redirect"], "/analysis");
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["name"], "Test Rider");
}

/// Test: credentials only exist in the browser that registered them
#[tokio::test]
async fn test_credentials_are_per_client() {
    let server = create_test_server();
    let first = new_client(&server).await;
    let second = new_client(&server).await;
    assert_ne!(first, second);

    register_user(&server, &first, "a@b.com", "secret1").await;

    let response = server
        .post("/api/login")
        .add_cookie(client_cookie(&second))
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .await;
    assert_eq!(response.status_code(), 401);
}
