//! Configuration loading and management
//!
//! This module handles loading configuration from files and environment variables.

use std::path::Path;

use tracing::{debug, info};

use super::types::Config;
use crate::error::ConfigError;

/// Load configuration from a JSON file
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    debug!("Loading configuration from {:?}", path);

    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path)?;

    let config: Config = serde_json::from_str(&contents)
        .map_err(|e| ConfigError::ParseError(format!("Failed to parse JSON: {e} at {path:?}")))?;

    config.validate()?;

    info!(
        "Configuration loaded: listen={}, answer={}, ttl={}s",
        config.listen.address, config.answer.address, config.answer.ttl_secs
    );

    Ok(config)
}

/// Load configuration from a JSON string
///
/// # Errors
///
/// Returns `ConfigError` if parsing or validation fails.
pub fn load_config_str(json: &str) -> Result<Config, ConfigError> {
    let config: Config =
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.validate()?;

    Ok(config)
}

/// Load configuration with environment variable overrides
///
/// Environment variables:
/// - `AUTHDNS_LISTEN_ADDR`: Override listen address
/// - `AUTHDNS_LOG_LEVEL`: Override log level
/// - `AUTHDNS_ANSWER_ADDR`: Override the fixed answer address
/// - `AUTHDNS_TTL_SECS`: Override the answer TTL
///
/// # Errors
///
/// Returns `ConfigError` if loading or parsing fails.
pub fn load_config_with_env(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config = load_config(path)?;
    apply_env_overrides(config)
}

/// Apply `AUTHDNS_*` environment overrides to an already-loaded configuration
///
/// # Errors
///
/// Returns `ConfigError::EnvError` if an override carries an unusable value.
pub fn apply_env_overrides(mut config: Config) -> Result<Config, ConfigError> {
    if let Ok(addr) = std::env::var("AUTHDNS_LISTEN_ADDR") {
        config.listen.address = addr.parse().map_err(|_| ConfigError::EnvError {
            name: "AUTHDNS_LISTEN_ADDR".into(),
            reason: format!("Invalid socket address: {addr}"),
        })?;
        debug!("Listen address overridden to {}", config.listen.address);
    }

    if let Ok(level) = std::env::var("AUTHDNS_LOG_LEVEL") {
        config.log.level = level;
        debug!("Log level overridden to {}", config.log.level);
    }

    if let Ok(addr) = std::env::var("AUTHDNS_ANSWER_ADDR") {
        config.answer.address = addr.parse().map_err(|_| ConfigError::EnvError {
            name: "AUTHDNS_ANSWER_ADDR".into(),
            reason: format!("Invalid IPv4 address: {addr}"),
        })?;
        debug!("Answer address overridden to {}", config.answer.address);
    }

    if let Ok(ttl) = std::env::var("AUTHDNS_TTL_SECS") {
        config.answer.ttl_secs = ttl.parse().map_err(|_| ConfigError::EnvError {
            name: "AUTHDNS_TTL_SECS".into(),
            reason: format!("Invalid number: {ttl}"),
        })?;
        debug!("Answer TTL overridden to {}s", config.answer.ttl_secs);
    }

    // Re-validate after overrides
    config.validate()?;

    Ok(config)
}

/// Create a default configuration file at the given path
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be written.
pub fn create_default_config(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let config = Config::default_config();
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| ConfigError::ParseError(format!("Failed to serialize config: {e}")))?;

    std::fs::write(path, json)?;
    Ok(())
}
