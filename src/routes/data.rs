// ABOUTME: Authenticated data page calling the Learning Platform users API
// ABOUTME: Renders the JSON response and hands it to the background CSV exporter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::redirect_found;
use crate::constants::cookies::SESSION_COOKIE;
use crate::constants::routes;
use crate::errors::ErrorCode;
use crate::resources::ServerResources;
use crate::security::cookies::clear_cookie;
use crate::session::Session;
use crate::templates::TemplateRenderer;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Data page routes
pub struct DataRoutes;

impl DataRoutes {
    /// Create the `/data` route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::DATA, get(Self::handle_data))
            .with_state(resources)
    }

    /// Call the API with the session token and render the result
    ///
    /// Browsers without a usable session are sent back to `/`. API failures are
    /// shown as a preformatted error; the export never affects the response.
    async fn handle_data(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        let session = match Session::from_headers(&headers) {
            Ok(session) => session,
            Err(e) => {
                debug!("No usable session: {e}");
                let mut response_headers = HeaderMap::new();
                if e.code == ErrorCode::AuthInvalid {
                    clear_cookie(
                        &mut response_headers,
                        SESSION_COOKIE,
                        resources.config.secure_cookies(),
                    );
                }
                return redirect_found(routes::HOME, response_headers);
            }
        };

        match resources.data_api.fetch_users(&session.access_token).await {
            Ok(payload) => {
                let pretty = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string());
                resources.exporter.spawn_export(payload);
                Html(TemplateRenderer::render_data(&pretty)).into_response()
            }
            Err(e) => {
                warn!("Learning Platform API call failed: {e}");
                Html(TemplateRenderer::render_error(
                    "Learning Platform API call failed",
                    &e.to_pretty_json(),
                ))
                .into_response()
            }
        }
    }
}
