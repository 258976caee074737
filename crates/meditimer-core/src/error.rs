//! Core error types for meditimer-core.
//!
//! Store errors distinguish I/O failures (retryable by the caller) from
//! corrupt on-disk data (unrecoverable for that read).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for meditimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session log persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed. Not retried
    /// automatically; the caller decides whether to retry or keep
    /// showing the previous derived values.
    #[error("Failed to access session log at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored content does not parse into the expected shape.
    #[error("Session log at {path} is corrupt: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
