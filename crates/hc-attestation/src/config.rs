//! # Attestation Configuration
//!
//! Configuration for the attestation service and its logging.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::{Network, BLOCKS_PER_EPOCH};

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting holds an unusable value.
    #[error("Invalid configuration: {field} {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error), used when
    /// `RUST_LOG` is not set.
    pub level: String,

    /// Emit JSON formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Attestation service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationConfig {
    /// Largest batch accepted by a single segment.
    pub max_batch_size: usize,

    /// Network whose consensus rules the header validator applies.
    pub network: Network,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            max_batch_size: BLOCKS_PER_EPOCH as usize,
            network: Network::Mainnet,
            logging: LoggingConfig::default(),
        }
    }
}

impl AttestationConfig {
    /// Create a config for testing (small batches, regtest, debug logs).
    pub fn for_testing() -> Self {
        Self {
            max_batch_size: 16,
            network: Network::Regtest,
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: false,
            },
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HC_MAX_BATCH_SIZE`: Largest batch per segment (default: 2016)
    /// - `HC_NETWORK`: `mainnet` or `regtest` (default: mainnet)
    /// - `HC_LOG_LEVEL`: Log level (default: info)
    /// - `HC_JSON_LOGS`: Enable JSON logs (default: false)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_batch_size: env::var("HC_MAX_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_batch_size),

            network: env::var("HC_NETWORK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.network),

            logging: LoggingConfig {
                level: env::var("HC_LOG_LEVEL").unwrap_or(defaults.logging.level),
                json: env::var("HC_JSON_LOGS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(defaults.logging.json),
            },
        }
    }

    /// Check the configuration for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_batch_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
