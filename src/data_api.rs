// ABOUTME: Client for the Brightspace Learning Platform API called with the session token
// ABOUTME: Issues one bearer-authenticated GET and reports failures as serializable errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Downstream API caller
//!
//! Exactly one request per call: no retry, no backoff, no pagination.

use crate::config::LmsApiConfig;
use crate::logging::AppLogger;
use crate::utils::http_client::outbound_client;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Failure of a downstream API call, rendered verbatim to the user
#[derive(Debug, Clone, Serialize)]
pub struct ApiCallError {
    /// HTTP status, absent for transport failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// What went wrong
    pub message: String,
    /// URL that was called
    pub url: String,
    /// Response body, parsed as JSON when possible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiCallError {
    /// Pretty-printed JSON form shown to the user
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl fmt::Display for ApiCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({status}) calling {}", self.message, self.url),
            None => write!(f, "{} calling {}", self.message, self.url),
        }
    }
}

impl std::error::Error for ApiCallError {}

/// Client for the Learning Platform users listing
pub struct DataApiClient {
    config: LmsApiConfig,
    client: reqwest::Client,
}

impl DataApiClient {
    /// Create a client for the configured LMS
    #[must_use]
    pub fn new(config: LmsApiConfig, timeout: Option<Duration>) -> Self {
        Self {
            config,
            client: outbound_client(timeout),
        }
    }

    /// URL the client calls
    #[must_use]
    pub fn users_url(&self) -> String {
        self.config.users_url()
    }

    /// Fetch the users listing with the given bearer token
    ///
    /// An empty body is treated as an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiCallError`] on transport failure, non-2xx status, or a
    /// body that is not JSON
    #[instrument(skip_all, fields(url = %self.config.users_url()))]
    pub async fn fetch_users(&self, access_token: &str) -> Result<Value, ApiCallError> {
        let url = self.users_url();
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiCallError {
                status: None,
                message: format!("Request failed: {e}"),
                url: url.clone(),
                body: None,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiCallError {
            status: Some(status.as_u16()),
            message: format!("Failed to read response body: {e}"),
            url: url.clone(),
            body: None,
        })?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_api_call(&url, Some(status.as_u16()), elapsed_ms);

        if !status.is_success() {
            return Err(ApiCallError {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_owned(),
                url,
                body: (!text.is_empty()).then(|| {
                    serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
                }),
            });
        }

        parse_body(&text).map_err(|e| ApiCallError {
            status: Some(status.as_u16()),
            message: format!("Response is not valid JSON: {e}"),
            url,
            body: Some(Value::String(text.clone())),
        })
    }
}

/// Parse a response body, treating whitespace-only bodies as `{}`
fn parse_body(text: &str) -> serde_json::Result<Value> {
    if text.trim().is_empty() {
        Ok(Value::Object(serde_json::Map::new()))
    } else {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_defaults_to_object() {
        assert_eq!(parse_body("").unwrap(), json!({}));
        assert_eq!(parse_body("  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_body_parsed() {
        assert_eq!(
            parse_body(r#"{"Items":[{"Id":1}]}"#).unwrap(),
            json!({"Items": [{"Id": 1}]})
        );
        assert!(parse_body("<html>").is_err());
    }

    #[test]
    fn test_error_serialization_omits_missing_fields() {
        let error = ApiCallError {
            status: None,
            message: "Request failed: connection refused".into(),
            url: "https://lms.test/d2l/api/lp/1.13/users/".into(),
            body: None,
        };
        let json: Value = serde_json::from_str(&error.to_pretty_json()).unwrap();
        assert_eq!(
            json,
            json!({
                "message": "Request failed: connection refused",
                "url": "https://lms.test/d2l/api/lp/1.13/users/"
            })
        );
    }
}
