// ABOUTME: Authorization redirect and callback routes for the OAuth 2.0 code grant
// ABOUTME: Issues per-request state, exchanges the code, and stores the token in a cookie
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Authorization code flow routes
//!
//! `GET /auth` binds a fresh random state to the browser with a short-lived
//! cookie and redirects to the provider. `GET /callback` accepts the code only
//! when the returned state matches that cookie, exchanges it for a token, and
//! redirects to `/data` with the session cookie set. Every callback failure
//! lands back on `/` without a session cookie.

use super::redirect_found;
use crate::constants::cookies::STATE_COOKIE;
use crate::constants::oauth::STATE_COOKIE_MAX_AGE_SECS;
use crate::constants::routes;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::oauth2_client::RequestOrigin;
use crate::resources::ServerResources;
use crate::security::cookies::{clear_cookie, get_cookie_value, SecureCookieConfig};
use crate::security::csrf::OAuthState;
use crate::session::Session;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Query parameters the provider appends to the callback URL
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code
    pub code: Option<String>,
    /// State echoed back from the authorization request
    pub state: Option<String>,
    /// RFC 6749 error code when the user or provider denied the request
    pub error: Option<String>,
    /// Human readable error detail
    pub error_description: Option<String>,
}

/// Authorization flow routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the `/auth` and `/callback` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::AUTH, get(Self::handle_authorize))
            .route(routes::CALLBACK, get(Self::handle_callback))
            .with_state(resources)
    }

    /// Redirect the browser to the provider's authorization endpoint
    async fn handle_authorize(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let origin = RequestOrigin::from_headers(&headers)?;
        let state = OAuthState::generate();
        let authorization_url = resources
            .oauth_client
            .authorization_url(&origin.callback_url(), state.as_str())?;

        let mut response_headers = HeaderMap::new();
        SecureCookieConfig::new(STATE_COOKIE, state.as_str())
            .max_age(STATE_COOKIE_MAX_AGE_SECS)
            .secure(resources.config.secure_cookies())
            .append_to(&mut response_headers);

        AppLogger::log_oauth_event("authorization_redirect", true, Some(&origin.callback_url()));
        Ok(redirect_found(&authorization_url, response_headers))
    }

    /// Complete the flow and start a session
    ///
    /// An unparseable query string, such as a repeated `code`, is a failed
    /// exchange like any other.
    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<CallbackQuery>, QueryRejection>,
    ) -> Response {
        let secure = resources.config.secure_cookies();
        let mut response_headers = HeaderMap::new();
        // State is single use whatever the outcome
        clear_cookie(&mut response_headers, STATE_COOKIE, secure);

        let query = match query {
            Ok(Query(query)) => query,
            Err(rejection) => {
                AppLogger::log_oauth_event("token_exchange", false, Some(&rejection.body_text()));
                return redirect_found(routes::HOME, response_headers);
            }
        };

        let session = match Self::complete_authorization(&resources, &headers, &query).await {
            Ok(session) => session,
            Err(e) => {
                AppLogger::log_oauth_event("token_exchange", false, Some(&e.to_string()));
                return redirect_found(routes::HOME, response_headers);
            }
        };

        match session.cookie(secure) {
            Ok(cookie) => {
                cookie.append_to(&mut response_headers);
                AppLogger::log_oauth_event("token_exchange", true, None);
                redirect_found(routes::DATA, response_headers)
            }
            Err(e) => {
                warn!("Failed to encode session cookie: {e}");
                redirect_found(routes::HOME, response_headers)
            }
        }
    }

    /// Validate the callback and exchange the code for a session
    async fn complete_authorization(
        resources: &ServerResources,
        headers: &HeaderMap,
        query: &CallbackQuery,
    ) -> AppResult<Session> {
        if let Some(error) = &query.error {
            let detail = query
                .error_description
                .as_deref()
                .map_or_else(|| error.clone(), |d| format!("{error}: {d}"));
            return Err(AppError::external_auth_failed(format!(
                "Provider returned an error: {detail}"
            )));
        }

        OAuthState::validate(
            get_cookie_value(headers, STATE_COOKIE).as_deref(),
            query.state.as_deref(),
        )?;

        let code = query
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::invalid_input("Callback is missing the authorization code"))?;

        let redirect_uri = RequestOrigin::from_headers(headers)?.callback_url();
        let token = resources
            .oauth_client
            .exchange_code(code, &redirect_uri)
            .await?;
        info!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in.unwrap_or(0),
            "Access token obtained"
        );

        Ok(Session::new(token.access_token))
    }
}
