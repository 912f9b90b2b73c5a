//! Domain error types

use thiserror::Error;

/// Error when a recording file stem cannot be used
#[derive(Debug, Clone, Error)]
#[error("Invalid file stem: \"{input}\". Use a non-empty name without path separators, dots or a trailing digit (e.g., Record, Memo)")]
pub struct InvalidStemError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
