// ABOUTME: OAuth state generation and validation for CSRF protection of the callback
// ABOUTME: Issues an unpredictable per-request state and compares it in constant time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! CSRF protection for the authorization code callback
//!
//! `/auth` generates a fresh state, stores it in an `HttpOnly` cookie, and sends
//! it to the provider. `/callback` accepts the code only when the provider echoes
//! the same state back.

use crate::constants::oauth::STATE_BYTES;
use crate::errors::{AppError, AppResult};
use rand::RngCore;
use subtle::ConstantTimeEq;

/// An opaque, unpredictable OAuth `state` value
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthState(String);

impl OAuthState {
    /// Generate a new state from a cryptographically secure RNG
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; STATE_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// The encoded state value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the state echoed by the provider against the one issued to this browser
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if either value is missing or they differ
    pub fn validate(issued: Option<&str>, returned: Option<&str>) -> AppResult<()> {
        let issued = issued
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::auth_invalid("No OAuth state was issued to this browser"))?;
        let returned = returned
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::auth_invalid("Callback is missing the state parameter"))?;

        if bool::from(issued.as_bytes().ct_eq(returned.as_bytes())) {
            Ok(())
        } else {
            Err(AppError::auth_invalid("OAuth state mismatch"))
        }
    }
}

impl std::fmt::Debug for OAuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OAuthState([REDACTED])")
    }
}
