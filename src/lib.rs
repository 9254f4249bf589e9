// ABOUTME: Main library entry point for the Brightspace Data API demo
// ABOUTME: OAuth 2.0 authorization code flow, one authenticated API call, and CSV export
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Application Data API Demo
//!
//! A small web server that signs a browser in against the Brightspace identity
//! provider with the OAuth 2.0 authorization code grant, keeps the access token
//! in an HttpOnly cookie, and uses it to call the Learning Platform users API.
//!
//! ## Flow
//!
//! 1. `GET /` shows a sign-in link
//! 2. `GET /auth` redirects to the provider with a fresh `state`
//! 3. `GET /callback` checks `state`, exchanges the code, sets the session cookie
//! 4. `GET /data` calls the API, renders the JSON, and exports it to CSV in the
//!    background
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use application_data_api_demo::config::ServerConfig;
//! use application_data_api_demo::resources::ServerResources;
//! use application_data_api_demo::errors::AppResult;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     application_data_api_demo::server::run(Arc::new(ServerResources::new(config))).await
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Protocol constants, cookie names, and defaults
pub mod constants;

/// Learning Platform API client
pub mod data_api;

/// Error types and HTTP mapping
pub mod errors;

/// CSV export of API payloads
pub mod export;

/// Structured logging setup
pub mod logging;

/// OAuth 2.0 authorization code client
pub mod oauth2_client;

/// Shared handler resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Cookie and state helpers
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Cookie-backed session
pub mod session;

/// HTML page rendering
pub mod templates;

/// HTTP client and HTML helpers
pub mod utils;
