//! End-to-end checks against a server bound to a random port.

mod common;

use brandcraft_service::startup::{build_state, Application};
use reqwest::Client;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let state = build_state(common::test_config()).expect("Failed to build state");
    let app = Application::with_state(state, 0)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "brandcraft-service");
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    brandcraft_service::services::metrics::init_metrics();
    let port = spawn_app().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let text = response.text().await.expect("Failed to read body");
    assert!(!text.is_empty());
}

#[tokio::test]
async fn sentiment_falls_back_end_to_end() {
    let port = spawn_app().await;

    let response = Client::new()
        .post(format!("http://127.0.0.1:{}/api/sentiment", port))
        .json(&serde_json::json!({ "text": "we sell coffee beans online" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["fallback"], true);
    assert_eq!(body["sentiment"]["label"], "neutral");
    assert_eq!(body["sentiment"]["score"], 0.1);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let port = spawn_app().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/does-not-exist", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
