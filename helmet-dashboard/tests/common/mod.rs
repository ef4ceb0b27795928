//! Common test utilities for dashboard integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use helmet_dashboard::routes::{self, CLIENT_COOKIE};
use helmet_dashboard::{AppState, ClientStorage, Config, InMemoryClientStorage};
use serde_json::{json, Value};

/// Configuration for tests: no registration delay
pub fn test_config() -> Config {
    Config {
        registration_delay_ms: 0,
        ..Config::default()
    }
}

/// Create a test server over in-memory storage
pub fn create_test_server() -> TestServer {
    create_test_server_with(InMemoryClientStorage::new())
}

/// Create a test server over the given storage
pub fn create_test_server_with<S: ClientStorage + 'static>(storage: S) -> TestServer {
    let state = Arc::new(AppState::new(storage, test_config()).expect("Failed to build state"));
    let app = routes::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Client cookie for requests made as `client`
pub fn client_cookie(client: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(CLIENT_COOKIE, client.to_string())
}

/// Open a new "browser" and return its client id
pub async fn new_client(server: &TestServer) -> String {
    let response = server.get("/api/session").await;
    assert_eq!(response.status_code(), 200);

    response
        .maybe_cookie(CLIENT_COOKIE)
        .expect("No client cookie")
        .value()
        .to_string()
}

/// Registration form with sensible defaults
pub fn registration(name: &str, email: &str, password: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": password,
        "licenseNumber": "LIC-001",
        "helmetId": "HLM-001",
        "age": "30",
        "bloodType": "O+",
        "phoneNumber": "555-0100",
        "relativePhoneNumber": "555-0199",
    })
}

/// Register a user in `client`'s storage and return the new driver id
pub async fn register_user(server: &TestServer, client: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/api/register")
        .add_cookie(client_cookie(client))
        .json(&registration("Test Rider", email, password))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["id"].as_str().expect("No driver id").to_string()
}

/// Log `client` in with the given credentials
pub async fn login(server: &TestServer, client: &str, email: &str, password: &str) {
    let response = server
        .post("/api/login")
        .add_cookie(client_cookie(client))
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);
}

/// A fresh client that is registered and logged in
pub async fn logged_in_client(server: &TestServer) -> String {
    let client = new_client(server).await;
    register_user(server, &client, "rider@example.com", "secret1").await;
    login(server, &client, "rider@example.com", "secret1").await;
    client
}
