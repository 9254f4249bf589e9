// ABOUTME: Configuration module for the demo server settings
// ABOUTME: Re-exports the environment-sourced ServerConfig and its parts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module

/// Environment and server configuration
pub mod environment;

pub use environment::{load_dotenv, ClientCredentials, Environment, LmsApiConfig, ServerConfig};
