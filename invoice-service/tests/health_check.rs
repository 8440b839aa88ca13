mod common;

use common::{FailingStore, TestApp};
use invoice_service::services::{init_metrics, record_invoice_operation};
use reqwest::Client;
use std::sync::{Arc, Once};

// Initialize metrics once for all tests
static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "invoice-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn unhealthy_store_is_reported_as_unavailable() {
    let app = TestApp::spawn_with_store(Arc::new(FailingStore)).await;
    let client = Client::new();

    let health = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(health.status(), 503);

    let body: serde_json::Value = health.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "unhealthy");

    let ready = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(ready.status(), 503);
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    ensure_metrics_initialized();
    record_invoice_operation("create", "ok");
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("invoice_operations_total"));
}
