// ABOUTME: Integration tests for the authorization code client and the LMS API client
// ABOUTME: Exercises token exchange and API failure handling against wiremock
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use application_data_api_demo::config::{ClientCredentials, LmsApiConfig};
use application_data_api_demo::data_api::DataApiClient;
use application_data_api_demo::errors::ErrorCode;
use application_data_api_demo::oauth2_client::AuthorizationCodeClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn oauth_client(server: &MockServer) -> AuthorizationCodeClient {
    AuthorizationCodeClient::new(
        ClientCredentials {
            client_id: "test-client".into(),
            client_secret: "test-secret".into(),
            auth_url: format!("{}/oauth2/auth", server.uri()),
            token_url: format!("{}/core/connect/token", server.uri()),
            scope: "core:*:*".into(),
        },
        Some(Duration::from_secs(5)),
    )
}

fn api_client(server: &MockServer) -> DataApiClient {
    DataApiClient::new(
        LmsApiConfig {
            host_url: server.uri(),
            version: "1.13".into(),
        },
        Some(Duration::from_secs(5)),
    )
}

#[tokio::test]
async fn test_exchange_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/core/connect/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("code=the-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = oauth_client(&server)
        .exchange_code("the-code", "http://localhost:3000/callback")
        .await
        .unwrap();

    assert_eq!(token.access_token, "tok");
    assert_eq!(token.expires_in, Some(3600));
}

#[tokio::test]
async fn test_exchange_code_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/core/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let err = oauth_client(&server)
        .exchange_code("c", "http://localhost:3000/callback")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(err.message.contains("invalid_client"));
}

#[tokio::test]
async fn test_exchange_code_without_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/core/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let err = oauth_client(&server)
        .exchange_code("c", "http://localhost:3000/callback")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_fetch_users_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d2l/api/lp/1.13/users/"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let body = api_client(&server).fetch_users("tok").await.unwrap();
    assert_eq!(body, json!({"Items": []}));
}

#[tokio::test]
async fn test_fetch_users_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d2l/api/lp/1.13/users/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = api_client(&server).fetch_users("tok").await.unwrap_err();
    assert_eq!(err.status, Some(503));
    assert_eq!(err.body, Some(json!("maintenance")));
    assert!(err.url.ends_with("/d2l/api/lp/1.13/users/"));
}

#[tokio::test]
async fn test_fetch_users_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d2l/api/lp/1.13/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = api_client(&server).fetch_users("tok").await.unwrap_err();
    assert_eq!(err.status, Some(200));
    assert!(err.message.contains("not valid JSON"));
}

#[tokio::test]
async fn test_fetch_users_transport_failure() {
    let server = MockServer::start().await;
    let client = api_client(&server);
    drop(server);

    let err = client.fetch_users("tok").await.unwrap_err();
    assert_eq!(err.status, None);
    assert!(err.message.starts_with("Request failed"));
}
