// ABOUTME: Security utilities for browser-facing state: cookies and OAuth CSRF state
// ABOUTME: Groups cookie construction/parsing and anti-forgery state generation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Security utilities

/// `Set-Cookie` construction and `Cookie` header parsing
pub mod cookies;

/// Per-request OAuth `state` values for CSRF protection
pub mod csrf;
