// ABOUTME: Application constants for OAuth endpoints, cookies, API paths, and defaults
// ABOUTME: Groups fixed protocol values by domain so routes and clients share one source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants organized by domain

/// Identity provider endpoints and authorization request values
pub mod oauth {
    /// Default identity provider base URL
    pub const DEFAULT_AUTH_SITE: &str = "https://auth.brightspace.com";

    /// Authorization endpoint path, relative to the auth site
    pub const AUTHORIZE_PATH: &str = "/oauth2/auth";

    /// Token endpoint path, relative to the auth site
    pub const TOKEN_PATH: &str = "/core/connect/token";

    /// Scope requested from the provider
    pub const DEFAULT_SCOPE: &str = "core:*:*";

    /// Response type for the authorization code grant
    pub const RESPONSE_TYPE_CODE: &str = "code";

    /// Grant type sent to the token endpoint
    pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

    /// Path the provider redirects back to
    pub const CALLBACK_PATH: &str = "/callback";

    /// Random bytes in a generated state value (hex encoded to twice this length)
    pub const STATE_BYTES: usize = 32;

    /// Lifetime of the state cookie in seconds
    pub const STATE_COOKIE_MAX_AGE_SECS: u64 = 600;
}

/// Cookie names
pub mod cookies {
    /// Cookie holding the serialized session
    pub const SESSION_COOKIE: &str = "application-data-api-demo";

    /// Cookie holding the pending authorization state
    pub const STATE_COOKIE: &str = "oauth-state";
}

/// Brightspace Learning Platform API
pub mod lms_api {
    /// Base route of the Learning Platform API
    pub const BASE_ROUTE: &str = "/d2l/api/lp/";

    /// Default Learning Platform API version
    pub const DEFAULT_VERSION: &str = "1.13";

    /// Users listing command
    pub const USERS_COMMAND: &str = "/users/";
}

/// Server defaults
pub mod server {
    /// Default HTTP port
    pub const DEFAULT_PORT: u16 = 3000;

    /// Default listen address
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default CSV export file name, relative to the working directory
    pub const DEFAULT_CSV_PATH: &str = "csvFile.csv";

    /// Service name reported in logs and health checks
    pub const SERVICE_NAME: &str = "application-data-api-demo";
}

/// Route paths served by the demo
pub mod routes {
    /// Landing page
    pub const HOME: &str = "/";
    /// Starts the authorization redirect
    pub const AUTH: &str = "/auth";
    /// Receives the authorization code
    pub const CALLBACK: &str = super::oauth::CALLBACK_PATH;
    /// Calls the downstream API with the session token
    pub const DATA: &str = "/data";
    /// Liveness check
    pub const HEALTH: &str = "/health";
}
