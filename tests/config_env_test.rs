//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use loan_docs_client::config::{Config, LogFormat, DEFAULT_BASE_URL};
use loan_docs_client::error::AppError;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: [&str; 5] = [
    "BACKEND_BASE_URL",
    "REQUEST_TIMEOUT_MS",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "EXPORT_DIR",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.request.timeout_ms, None);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.export.dir, PathBuf::from("."));
}

#[test]
#[serial]
fn test_config_from_env_custom_base_url() {
    clear_env();
    env::set_var("BACKEND_BASE_URL", "https://underwriting.example.com/");

    let config = Config::from_env().unwrap();
    assert_eq!(config.backend.base_url, "https://underwriting.example.com");

    clear_env();
}

#[test]
#[serial]
fn test_config_from_env_invalid_base_url() {
    clear_env();
    env::set_var("BACKEND_BASE_URL", "localhost:8000");

    let result = Config::from_env();
    assert!(matches!(result, Err(AppError::Config { .. })));

    clear_env();
}

#[test]
#[serial]
fn test_config_from_env_timeout() {
    clear_env();
    env::set_var("REQUEST_TIMEOUT_MS", "45000");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.timeout_ms, Some(45000));

    env::set_var("REQUEST_TIMEOUT_MS", "0");
    let config = Config::from_env().unwrap();
    assert_eq!(config.request.timeout_ms, None);

    env::set_var("REQUEST_TIMEOUT_MS", "fast");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_config_from_env_logging_and_export() {
    clear_env();
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("EXPORT_DIR", "/tmp/reports");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.export.dir, PathBuf::from("/tmp/reports"));

    clear_env();
}
