//! Configuration types for authdns
//!
//! This module defines all configuration structures used by the responder.
//! Configuration is loaded from JSON files and can be validated at startup.

use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::codec::{ResponsePolicy, CLASS_IN, HEADER_LEN, TYPE_A};
use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listen configuration for the UDP socket
    #[serde(default)]
    pub listen: ListenConfig,

    /// Fixed-answer policy
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen.validate()?;
        self.log.validate()?;
        Ok(())
    }

    /// Create a minimal default configuration
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            listen: ListenConfig::default(),
            answer: AnswerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Listen configuration for the UDP inbound
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    /// Listen address (e.g., "127.0.0.1:2053")
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,

    /// Receive buffer size in bytes
    ///
    /// 512 is the conventional DNS message bound over UDP without EDNS.
    #[serde(default = "default_recv_buffer_len")]
    pub recv_buffer_len: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
            recv_buffer_len: default_recv_buffer_len(),
        }
    }
}

impl ListenConfig {
    /// Validate listen configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recv_buffer_len < HEADER_LEN {
            return Err(ConfigError::ValidationError(format!(
                "recv_buffer_len must be at least {HEADER_LEN} bytes"
            )));
        }
        if self.recv_buffer_len > 65535 {
            return Err(ConfigError::ValidationError(
                "recv_buffer_len must not exceed 65535 bytes".into(),
            ));
        }
        Ok(())
    }
}

/// The fixed answer substituted into every response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerConfig {
    /// IPv4 address returned as RDATA
    #[serde(default = "default_answer_address")]
    pub address: Ipv4Addr,

    /// TTL in seconds for the returned record
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u32,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            address: default_answer_address(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl AnswerConfig {
    /// Build the response policy the assembler consumes
    ///
    /// Record type and class are pinned to A/IN; address and TTL come from
    /// this configuration.
    #[must_use]
    pub fn policy(&self) -> ResponsePolicy {
        ResponsePolicy {
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl: self.ttl_secs,
            address: self.address,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format ("text" or "json")
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Include the event target in log lines
    #[serde(default = "default_true")]
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            target: default_true(),
        }
    }
}

impl LogConfig {
    /// Validate logging configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format != "text" && self.format != "json" {
            return Err(ConfigError::ValidationError(format!(
                "log format must be \"text\" or \"json\", got {:?}",
                self.format
            )));
        }
        Ok(())
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 2053))
}

fn default_recv_buffer_len() -> usize {
    512
}

fn default_answer_address() -> Ipv4Addr {
    Ipv4Addr::new(8, 8, 8, 8)
}

fn default_ttl_secs() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_true() -> bool {
    true
}
