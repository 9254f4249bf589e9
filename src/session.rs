// ABOUTME: Browser session holding the access token in an HttpOnly cookie
// ABOUTME: Serializes the token as {"accessToken": ...} and validates it before use
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Cookie-backed session
//!
//! There is no server-side session store: an authenticated browser is one that
//! presents a session cookie with a non-empty access token.

use crate::constants::cookies::SESSION_COOKIE;
use crate::errors::{AppError, AppResult};
use crate::security::cookies::{get_cookie_value, SecureCookieConfig};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Session state carried by the browser
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token for the downstream API
    pub access_token: String,
}

impl Session {
    /// Create a session for a freshly exchanged token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Encode for use as a cookie value (percent-encoded JSON)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized
    pub fn to_cookie_value(&self) -> AppResult<String> {
        let json = serde_json::to_string(self)?;
        Ok(urlencoding::encode(&json).into_owned())
    }

    /// Decode a cookie value produced by [`Session::to_cookie_value`]
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the value is not a session or carries an empty token
    pub fn from_cookie_value(value: &str) -> AppResult<Self> {
        let json = urlencoding::decode(value)
            .map_err(|e| AppError::auth_invalid(format!("Session cookie is not UTF-8: {e}")))?;
        let session: Self = serde_json::from_str(&json)
            .map_err(|e| AppError::auth_invalid(format!("Session cookie is malformed: {e}")))?;
        if session.access_token.trim().is_empty() {
            return Err(AppError::auth_invalid("Session cookie has no access token"));
        }
        Ok(session)
    }

    /// Read the session from request headers
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no session cookie is present, `AuthInvalid` when it
    /// cannot be decoded
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let value = get_cookie_value(headers, SESSION_COOKIE).ok_or_else(AppError::auth_required)?;
        Self::from_cookie_value(&value)
    }

    /// Build the `Set-Cookie` configuration for this session
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized
    pub fn cookie(&self, secure: bool) -> AppResult<SecureCookieConfig> {
        Ok(SecureCookieConfig::new(SESSION_COOKIE, self.to_cookie_value()?).secure(secure))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
