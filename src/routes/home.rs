// ABOUTME: Landing page route
// ABOUTME: Serves the static page linking to the authorization redirect
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::routes;
use crate::templates::TemplateRenderer;
use axum::{response::Html, routing::get, Router};

/// Landing page routes
pub struct HomeRoutes;

impl HomeRoutes {
    /// Create the landing page route
    pub fn routes() -> Router {
        Router::new().route(routes::HOME, get(Self::handle_index))
    }

    async fn handle_index() -> Html<String> {
        Html(TemplateRenderer::render_index())
    }
}
