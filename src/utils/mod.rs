// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains shared HTTP client construction and HTML escaping helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// HTML escaping for server-rendered templates
pub mod html;
/// HTTP client configuration and helpers
pub mod http_client;
