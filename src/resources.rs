// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Owns the configuration, outbound clients, and the CSV exporter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::ServerConfig;
use crate::data_api::DataApiClient;
use crate::export::CsvExporter;
use crate::oauth2_client::AuthorizationCodeClient;

/// Resources shared across handlers behind an `Arc`
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// Identity provider client
    pub oauth_client: AuthorizationCodeClient,
    /// Learning Platform API client
    pub data_api: DataApiClient,
    /// Background CSV writer
    pub exporter: CsvExporter,
}

impl ServerResources {
    /// Build all resources from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let oauth_client =
            AuthorizationCodeClient::new(config.credentials.clone(), config.http_timeout);
        let data_api = DataApiClient::new(config.lms_api.clone(), config.http_timeout);
        let exporter = CsvExporter::new(config.csv_path.clone());
        Self {
            config,
            oauth_client,
            data_api,
            exporter,
        }
    }
}
