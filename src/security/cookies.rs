// ABOUTME: Secure cookie utilities for session and OAuth state cookies
// ABOUTME: Builds Set-Cookie header values and extracts values from the Cookie header
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use axum::http::{header, HeaderMap, HeaderValue};
use tracing::warn;

/// `SameSite` policy of a cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on same-site requests and top-level cross-site navigations
    Lax,
    /// Sent on same-site requests only
    Strict,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::Strict => "Strict",
        }
    }
}

/// Cookie attributes for a single `Set-Cookie` header
///
/// Defaults are `HttpOnly`, `SameSite=Lax`, `Path=/`, session lifetime, and no
/// `Secure` flag. The provider redirects back to the callback with a top-level
/// cross-site navigation, so `Strict` would drop the cookies the flow relies on.
#[derive(Debug, Clone)]
pub struct SecureCookieConfig {
    name: String,
    value: String,
    max_age_secs: Option<u64>,
    http_only: bool,
    secure: bool,
    same_site: SameSite,
    path: String,
}

impl SecureCookieConfig {
    /// Create a cookie with the default attributes
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age_secs: None,
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_owned(),
        }
    }

    /// Set `Max-Age`; omitted means a browser-session cookie
    #[must_use]
    pub fn max_age(mut self, secs: u64) -> Self {
        self.max_age_secs = Some(secs);
        self
    }

    /// Set the `Secure` attribute
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the `SameSite` attribute
    #[must_use]
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Build the `Set-Cookie` header value
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie
    }

    /// Append this cookie to a response header map
    pub fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.build()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %self.name, "Cookie value is not a valid header: {e}"),
        }
    }
}

/// Expire a cookie immediately
pub fn clear_cookie(headers: &mut HeaderMap, name: &str, secure: bool) {
    SecureCookieConfig::new(name, "")
        .max_age(0)
        .secure(secure)
        .append_to(headers);
}

/// Extract a cookie value from the request `Cookie` header(s)
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}
