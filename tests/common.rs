// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds server configuration and resources pointed at a mock provider
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `application_data_api_demo`

use application_data_api_demo::{
    config::ServerConfig, resources::ServerResources, server::build_router, session::Session,
};
use axum::Router;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Client credentials used by every test configuration
pub const TEST_CLIENT_ID: &str = "test-client";
pub const TEST_CLIENT_SECRET: &str = "test-secret";

/// Host header sent by test browsers
pub const TEST_HOST: &str = "localhost:3000";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration with the identity provider and LMS both served by `mock_uri`
pub fn test_config(mock_uri: &str, csv_path: &Path) -> ServerConfig {
    let csv_path = csv_path.display().to_string();
    let vars: HashMap<&str, &str> = HashMap::from([
        ("CLIENT_ID", TEST_CLIENT_ID),
        ("CLIENT_SECRET", TEST_CLIENT_SECRET),
        ("AUTH_SITE", mock_uri),
        ("HOST_URL", mock_uri),
        ("CSV_PATH", csv_path.as_str()),
        ("HTTP_TIMEOUT_SECS", "5"),
    ]);
    ServerConfig::from_lookup(|key: &str| vars.get(key).map(|v| (*v).to_owned()))
        .expect("test configuration is valid")
}

/// Shared resources for a mock-backed server
pub fn test_resources(mock_uri: &str, csv_path: &Path) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(mock_uri, csv_path)))
}

/// Full application router over the given resources
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// Cookie value a browser holds after signing in with `access_token`
pub fn session_cookie_value(access_token: &str) -> String {
    Session::new(access_token)
        .to_cookie_value()
        .expect("session serializes")
}
