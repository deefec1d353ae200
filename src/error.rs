//! Error types for the phrasebook telemetry client.
//!
//! None of these ever reach a caller of `TelemetryLogger::log`; they surface only on
//! construction-side paths (config loading, store access) and in the CLI.

use thiserror::Error;

/// Session store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Invalid stored value for key {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors for configuration, transport and CLI paths
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for TelemetryError {
    fn from(err: config::ConfigError) -> Self {
        TelemetryError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TelemetryError::TransportError(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            TelemetryError::TransportError(format!("Connection error: {}", err))
        } else {
            TelemetryError::TransportError(format!("HTTP error: {}", err))
        }
    }
}
