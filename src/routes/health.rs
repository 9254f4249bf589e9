// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports liveness with the service name and version
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Health check route
//!
//! The probe never touches the identity provider or the LMS, so it stays green
//! while either is unreachable.

use crate::constants::{routes, server::SERVICE_NAME};
use std::time::{SystemTime, UNIX_EPOCH};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> axum::Router {
        use axum::{routing::get, Json, Router};

        async fn health_handler() -> Json<serde_json::Value> {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs());
            Json(serde_json::json!({
                "status": "healthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": timestamp
            }))
        }

        Router::new().route(routes::HEALTH, get(health_handler))
    }
}
