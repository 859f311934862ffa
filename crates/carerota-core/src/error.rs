//! Core error types for carerota-core.
//!
//! This module defines the error hierarchy using thiserror for better
//! error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for carerota-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Time string parsing errors
    #[error("Time parse error: {0}")]
    TimeParse(#[from] TimeParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared-document store errors
    #[error("Store error: {0}")]
    Store(#[from] crate::sync::StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised when an `HH:MM` string fails to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Not two colon-separated fields
    #[error("Invalid time format '{0}': expected HH:MM")]
    Malformed(String),

    /// Hour or minute field is not a number
    #[error("Invalid time field '{field}' in '{input}'")]
    NotANumber { input: String, field: String },

    /// Hour outside 0..=23
    #[error("Hour {hour} out of range in '{input}'")]
    HourOutOfRange { input: String, hour: u32 },

    /// Minute outside 0..=59
    #[error("Minute {minute} out of range in '{input}'")]
    MinuteOutOfRange { input: String, minute: u32 },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
