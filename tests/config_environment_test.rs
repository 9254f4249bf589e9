// ABOUTME: Integration tests for loading ServerConfig from the process environment
// ABOUTME: Serialized because they mutate process-wide environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use application_data_api_demo::config::{load_dotenv, Environment, ServerConfig};
use application_data_api_demo::errors::ErrorCode;
use application_data_api_demo::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: [&str; 7] = [
    "CLIENT_ID",
    "CLIENT_SECRET",
    "HOST_URL",
    "AUTH_SITE",
    "PORT",
    "NODE_ENV",
    "ENVIRONMENT",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("invalid"),
        Environment::Development
    ); // Default fallback
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    clear_vars();
    env::set_var("CLIENT_ID", "env-client");
    env::set_var("CLIENT_SECRET", "env-secret");
    env::set_var("HOST_URL", "https://school.example.edu");
    env::set_var("PORT", "4000");
    env::set_var("NODE_ENV", "production");

    let config = ServerConfig::from_env().unwrap();
    clear_vars();

    assert_eq!(config.credentials.client_id, "env-client");
    assert_eq!(config.http_port, 4000);
    assert!(config.secure_cookies());
    assert_eq!(
        config.lms_api.users_url(),
        "https://school.example.edu/d2l/api/lp/1.13/users/"
    );
}

#[test]
#[serial]
fn test_from_env_requires_host_url() {
    clear_vars();
    env::set_var("CLIENT_ID", "env-client");
    env::set_var("CLIENT_SECRET", "env-secret");

    let err = ServerConfig::from_env().unwrap_err();
    clear_vars();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("HOST_URL"));
}

#[test]
#[serial]
fn test_dotenv_settings_reach_logging_config() {
    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    let dir = tempfile::tempdir().unwrap();
    let dotenv_path = dir.path().join(".env");
    std::fs::write(&dotenv_path, "RUST_LOG=debug\nLOG_FORMAT=json\n").unwrap();

    let loaded = load_dotenv(Some(&dotenv_path)).unwrap();
    let logging = LoggingConfig::from_env();
    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");

    assert_eq!(loaded, Some(dotenv_path));
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.format, LogFormat::Json);
}

#[test]
#[serial]
fn test_dotenv_does_not_override_process_environment() {
    env::set_var("LOG_FORMAT", "compact");
    let dir = tempfile::tempdir().unwrap();
    let dotenv_path = dir.path().join(".env");
    std::fs::write(&dotenv_path, "LOG_FORMAT=json\n").unwrap();

    load_dotenv(Some(&dotenv_path)).unwrap();
    let format = LoggingConfig::from_env().format;
    env::remove_var("LOG_FORMAT");

    assert_eq!(format, LogFormat::Compact);
}

#[test]
#[serial]
fn test_missing_dotenv_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_dotenv(Some(&dir.path().join(".env"))).unwrap();
    assert_eq!(loaded, None);
}
