// ABOUTME: OAuth2 authorization code client for the identity provider
// ABOUTME: Builds authorization URLs and performs the server-to-server token exchange
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::ClientCredentials;
use crate::constants::oauth::{GRANT_TYPE_AUTHORIZATION_CODE, RESPONSE_TYPE_CODE};
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::outbound_client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// OAuth 2.0 token response from the provider
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token issued by the authorization server
    pub access_token: String,
    /// The type of token (usually "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token; received but never stored
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Space-separated list of granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}

/// RFC 6749 section 5.2 error body
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// OAuth 2.0 client for the authorization code grant
pub struct AuthorizationCodeClient {
    credentials: ClientCredentials,
    client: reqwest::Client,
}

impl AuthorizationCodeClient {
    /// Create a new client for the given credentials
    #[must_use]
    pub fn new(credentials: ClientCredentials, timeout: Option<Duration>) -> Self {
        Self {
            credentials,
            client: outbound_client(timeout),
        }
    }

    /// Get authorization URL
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a valid URL
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> AppResult<String> {
        let mut url = Url::parse(&self.credentials.auth_url).map_err(|e| {
            AppError::config_invalid(format!(
                "Invalid authorization endpoint {}: {e}",
                self.credentials.auth_url
            ))
        })?;

        url.query_pairs_mut()
            .append_pair("response_type", RESPONSE_TYPE_CODE)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("scope", &self.credentials.scope)
            .append_pair("state", state);

        Ok(url.into())
    }

    /// Exchange authorization code for tokens
    ///
    /// The client authenticates with HTTP Basic and sends the grant as form data.
    /// `redirect_uri` must be the value sent in the authorization request.
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the provider rejects the grant or answers
    /// without an access token, and `ExternalServiceError` on transport failure
    #[instrument(skip_all, fields(token_url = %self.credentials.token_url))]
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<TokenResponse> {
        let params = [
            ("grant_type", GRANT_TYPE_AUTHORIZATION_CODE),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ];

        let response = self
            .client
            .post(&self.credentials.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(http.status = status.as_u16(), "Token endpoint responded");

        if !status.is_success() {
            let detail = serde_json::from_str::<TokenErrorResponse>(&body).map_or_else(
                |_| body.clone(),
                |e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                },
            );
            return Err(AppError::external_auth_failed(format!(
                "Token endpoint returned {status}: {detail}"
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_auth_failed(format!("Token response is not usable: {e}"))
        })?;
        if token.access_token.is_empty() {
            return Err(AppError::external_auth_failed(
                "Token response contains an empty access_token",
            ));
        }
        Ok(token)
    }
}
