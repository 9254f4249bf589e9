// ABOUTME: Server binary for the Brightspace Data API demo
// ABOUTME: Loads configuration, initializes logging, and serves the OAuth demo pages
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Application Data API Demo Binary
//!
//! Starts the HTTP server that walks a browser through the authorization code
//! flow and then calls the Learning Platform users API with the issued token.

use anyhow::Result;
use application_data_api_demo::{
    config::{load_dotenv, ServerConfig},
    logging, resources::ServerResources, server,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "application-data-api-demo")]
#[command(about = "Brightspace Data API demo - OAuth 2.0 sign-in and one authenticated API call")]
pub struct Args {
    /// Override the HTTP port (PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Override the listen address (HOST)
    #[arg(long)]
    host: Option<String>,

    /// Override the CSV export path (CSV_PATH)
    #[arg(long)]
    csv_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env must be in the environment before the subscriber reads RUST_LOG
    let dotenv = load_dotenv(None)?;
    logging::init_from_env()?;
    match dotenv {
        Some(path) => info!("Loaded environment overrides from {}", path.display()),
        None => debug!("No .env file found"),
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(csv_path) = args.csv_path {
        config.csv_path = csv_path;
    }

    info!("Starting Application Data API demo");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::new(config));
    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
