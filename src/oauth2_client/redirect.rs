// ABOUTME: Derives the public origin of a request and the OAuth callback URL from it
// ABOUTME: Honors X-Forwarded-Proto and X-Forwarded-Host from a fronting proxy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::oauth::CALLBACK_PATH;
use crate::errors::{AppError, AppResult};
use axum::http::{header, HeaderMap};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Scheme and host the browser used to reach this server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    /// `http` or `https`
    pub scheme: String,
    /// Host, including the port when not default
    pub host: String,
}

impl RequestOrigin {
    /// Derive the origin from request headers
    ///
    /// Forwarded headers win over the connection's own values; only the first
    /// entry of a comma-separated forwarded list is used.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no host can be determined
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        let scheme = first(FORWARDED_PROTO)
            .map_or_else(|| "http".to_owned(), |proto| proto.to_ascii_lowercase());
        let host = first(FORWARDED_HOST)
            .or_else(|| first(header::HOST.as_str()))
            .ok_or_else(|| AppError::invalid_input("Request has no Host header"))?;

        Ok(Self { scheme, host })
    }

    /// Redirect URI registered for this origin
    #[must_use]
    pub fn callback_url(&self) -> String {
        format!("{}://{}{CALLBACK_PATH}", self.scheme, self.host)
    }
}
