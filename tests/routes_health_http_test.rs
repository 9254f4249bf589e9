// ABOUTME: HTTP integration tests for the health check and landing page routes
// ABOUTME: Both routes work without a session or a reachable provider
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use application_data_api_demo::routes::{HealthRoutes, HomeRoutes};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_health_endpoint_success() {
    let response = AxumTestRequest::get("/health")
        .send(HealthRoutes::routes())
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "application-data-api-demo");
    assert!(body["timestamp"].is_u64());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = AxumTestRequest::get("/nonexistent")
        .send(HealthRoutes::routes())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_landing_page_links_to_auth() {
    let response = AxumTestRequest::get("/").send(HomeRoutes::routes()).await;

    assert_eq!(response.status(), 200);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("text/html"));
    assert!(response.text().contains(r#"href="/auth""#));
}
