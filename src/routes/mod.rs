// ABOUTME: Route module organization for the demo's HTTP endpoints
// ABOUTME: Each domain exposes a routes() constructor merged by the server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! HTTP routes
//!
//! | Method | Path        | Purpose                                   |
//! |--------|-------------|-------------------------------------------|
//! | GET    | `/`         | Landing page with the sign-in link        |
//! | GET    | `/auth`     | Redirect to the identity provider         |
//! | GET    | `/callback` | Token exchange, sets the session cookie   |
//! | GET    | `/data`     | Calls the API, renders and exports result |
//! | GET    | `/health`   | Liveness probe                            |

/// Authorization redirect and callback routes
pub mod auth;
/// Authenticated data page
pub mod data;
/// Health check route
pub mod health;
/// Landing page
pub mod home;

pub use auth::{AuthRoutes, CallbackQuery};
pub use data::DataRoutes;
pub use health::HealthRoutes;
pub use home::HomeRoutes;

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

/// `302 Found` redirect carrying any additional headers (usually `Set-Cookie`)
pub(crate) fn redirect_found(location: &str, mut headers: HeaderMap) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
            (StatusCode::FOUND, headers).into_response()
        }
        Err(e) => {
            error!("Redirect target is not a valid header value: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
