// ABOUTME: Environment configuration for client credentials, endpoints, and server settings
// ABOUTME: Builds one immutable ServerConfig at start-up from environment variables and .env
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration
//!
//! The configuration is read once when the process starts and is then shared
//! read-only with every request handler through the server resources.

use crate::constants::{lms_api, oauth, server};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment type controlling cookie security
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development over plain HTTP
    #[default]
    Development,
    /// Deployed behind HTTPS; cookies are marked `Secure`
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// OAuth client registration with the identity provider
#[derive(Clone)]
pub struct ClientCredentials {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Scope requested in the authorization redirect
    pub scope: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Downstream Learning Platform API settings
#[derive(Debug, Clone)]
pub struct LmsApiConfig {
    /// LMS base URL (the `HOST_URL` variable)
    pub host_url: String,
    /// Learning Platform API version used in the data path
    pub version: String,
}

impl LmsApiConfig {
    /// Full URL of the users listing
    #[must_use]
    pub fn users_url(&self) -> String {
        format!(
            "{}{}{}{}",
            self.host_url,
            lms_api::BASE_ROUTE,
            self.version,
            lms_api::USERS_COMMAND
        )
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// OAuth client credentials and endpoints
    pub credentials: ClientCredentials,
    /// Downstream API settings
    pub lms_api: LmsApiConfig,
    /// Target file for the CSV export
    pub csv_path: PathBuf,
    /// Optional timeout applied to outbound HTTP calls
    pub http_timeout: Option<Duration>,
}

/// Load a `.env` file into the process environment
///
/// With no `path` the working directory and its parents are searched. Variables
/// already set in the environment take precedence. Runs before logging is
/// initialized so that `RUST_LOG` and `LOG_FORMAT` from the file apply; the
/// caller logs the returned path once a subscriber exists.
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be read or parsed
pub fn load_dotenv(path: Option<&Path>) -> AppResult<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(AppError::config_invalid(format!("Failed to load .env: {e}")).with_source(e))
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Call [`load_dotenv`] first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| AppError::config_missing(key));

        let auth_site = trim_base_url(
            &var("AUTH_SITE").unwrap_or_else(|| oauth::DEFAULT_AUTH_SITE.to_owned()),
        );
        let host_url = trim_base_url(&required("HOST_URL")?);

        let http_port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| AppError::config_invalid(format!("Invalid PORT value: {port}")))?,
            None => server::DEFAULT_PORT,
        };

        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.trim().parse().map_err(|_| {
                AppError::config_invalid(format!("Invalid HTTP_TIMEOUT_SECS value: {secs}"))
            })?)),
            None => None,
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("NODE_ENV"))
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| server::DEFAULT_HOST.to_owned()),
            http_port,
            environment,
            credentials: ClientCredentials {
                client_id: required("CLIENT_ID")?,
                client_secret: required("CLIENT_SECRET")?,
                auth_url: format!("{auth_site}{}", oauth::AUTHORIZE_PATH),
                token_url: format!("{auth_site}{}", oauth::TOKEN_PATH),
                scope: var("OAUTH_SCOPE").unwrap_or_else(|| oauth::DEFAULT_SCOPE.to_owned()),
            },
            lms_api: LmsApiConfig {
                host_url,
                version: var("API_VERSION")
                    .unwrap_or_else(|| lms_api::DEFAULT_VERSION.to_owned()),
            },
            csv_path: PathBuf::from(
                var("CSV_PATH").unwrap_or_else(|| server::DEFAULT_CSV_PATH.to_owned()),
            ),
            http_timeout,
        })
    }

    /// Whether cookies must carry the `Secure` attribute
    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} listen={}:{} client_id={} auth_url={} token_url={} scope={} api={} csv={} timeout={}",
            self.environment,
            self.host,
            self.http_port,
            self.credentials.client_id,
            self.credentials.auth_url,
            self.credentials.token_url,
            self.credentials.scope,
            self.lms_api.users_url(),
            self.csv_path.display(),
            self.http_timeout
                .map_or_else(|| "none".to_owned(), |t| format!("{}s", t.as_secs())),
        )
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}
