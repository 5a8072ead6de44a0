//! Crate-level error types
//!
//! Codec failures have their own taxonomy in [`crate::codec::error`]; this
//! module covers the two outer layers: configuration loading and the UDP
//! server loop.

use std::io;

use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was checked
        path: String,
    },

    /// The configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// The configuration is syntactically valid but semantically wrong
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// An environment-variable override carried an unusable value
    #[error("invalid environment override {name}: {reason}")]
    EnvError {
        /// Name of the environment variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Underlying I/O failure while reading or writing the file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from the UDP server loop
///
/// Per-datagram codec failures never surface here; they are logged and the
/// datagram is dropped. `ServerError` covers the socket itself.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket-level failure
    #[error("network error: {reason}")]
    Network {
        /// Description of the failure
        reason: String,
        /// The underlying I/O error, if available
        #[source]
        source: Option<io::Error>,
    },
}

impl ServerError {
    /// Create a network error from an I/O error
    pub fn network_io(reason: impl Into<String>, source: io::Error) -> Self {
        Self::Network {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Create a network error without an underlying I/O error
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
            source: None,
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        Self::Network {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}

/// Type alias for Result with [`ServerError`]
pub type ServerResult<T> = std::result::Result<T, ServerError>;
