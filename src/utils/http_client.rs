// ABOUTME: Shared HTTP client construction for the token endpoint and the LMS API
// ABOUTME: Builds pooled reqwest clients with an optional request timeout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent on every outbound request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for all outbound calls
///
/// Outbound calls have no timeout unless one is configured; a hung upstream
/// holds the corresponding request open.
///
/// # Returns
/// A pooled `reqwest::Client`; falls back to the default client if the builder fails
#[must_use]
pub fn outbound_client(timeout: Option<Duration>) -> Client {
    create_custom_client(|builder| {
        let builder = builder.user_agent(USER_AGENT);
        match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    })
}

/// Create a new HTTP client with custom configuration
///
/// # Arguments
/// * `config_fn` - Function to configure the `ClientBuilder`
///
/// # Returns
/// A new `reqwest::Client`, or the default client if custom client creation fails
pub fn create_custom_client<F>(config_fn: F) -> Client
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    config_fn(ClientBuilder::new())
        .build()
        .unwrap_or_else(|_| Client::new())
}
