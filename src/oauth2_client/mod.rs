// ABOUTME: OAuth 2.0 authorization code client for the Brightspace identity provider
// ABOUTME: Builds the authorization redirect and exchanges codes for access tokens
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! The demo acts as a confidential OAuth 2.0 client of a single identity
//! provider. The flow has three legs:
//! - redirect the browser to the authorization endpoint (`/auth`)
//! - exchange the returned code for an access token (`/callback`)
//! - call the LMS API with the token (`/data`, see [`crate::data_api`])

/// Core OAuth 2.0 client implementation
pub mod client;
/// Callback URL derivation from the incoming request
pub mod redirect;

pub use client::{AuthorizationCodeClient, TokenResponse};
pub use redirect::RequestOrigin;
