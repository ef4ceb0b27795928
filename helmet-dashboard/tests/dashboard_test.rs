//! Tests for the alerts and analysis views

mod common;

use common::{client_cookie, create_test_server, logged_in_client};
use serde_json::Value;

/// Test: all alerts are listed without filters
#[tokio::test]
async fn test_alerts_unfiltered() {
    let server = create_test_server();
    let client = logged_in_client(&server).await;

    let response = server
        .get("/api/alerts")
        .add_cookie(client_cookie(&client))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["alerts"].as_array().unwrap().len(), 7);
    assert_eq!(body["alerts"][0]["type"], "Blood Pressure");
}

/// Test: severity and search filters combine
#[tokio::test]
async fn test_alerts_filtered() {
    let server = create_test_server();
    let client = logged_in_client(&server).await;

    let response = server
        .get("/api/alerts?search=blood&severity=High")
        .add_cookie(client_cookie(&client))
        .await;
    let body: Value = response.json();
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a["severity"] == "High"));

    let response = server
        .get("/api/alerts?severity=All")
        .add_cookie(client_cookie(&client))
        .await;
    let body: Value = response.json();
    assert_eq!(body["alerts"].as_array().unwrap().len(), 7);
}

/// Test: the analysis range is inclusive and optional
#[tokio::test]
async fn test_analysis_range() {
    let server = create_test_server();
    let client = logged_in_client(&server).await;

    let response = server
        .get("/api/analysis?start=2023-10-03&end=2023-10-05")
        .add_cookie(client_cookie(&client))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["samples"].as_array().unwrap().len(), 3);
    assert_eq!(body["total"], 200 + 278 + 189);
    assert_eq!(body["severity"].as_array().unwrap().len(), 4);

    let response = server
        .get("/api/analysis?start=&end=")
        .add_cookie(client_cookie(&client))
        .await;
    let body: Value = response.json();
    assert_eq!(body["samples"].as_array().unwrap().len(), 12);
}

/// Test: alert and analysis pages render their data
#[tokio::test]
async fn test_pages_render() {
    let server = create_test_server();
    let client = logged_in_client(&server).await;

    let response = server
        .get("/alerts?severity=Crucial")
        .add_cookie(client_cookie(&client))
        .await;
    let html = response.text();
    assert!(html.contains("SOS Button"));
    assert!(!html.contains("Low Battery"));

    let response = server
        .get("/analysis?start=2023-10-12")
        .add_cookie(client_cookie(&client))
        .await;
    let html = response.text();
    assert!(html.contains("2023-10-12"));
    assert!(html.contains("320"));
}
