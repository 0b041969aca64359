//! Error types for the person registry.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur while reading or writing a registry file.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The header line is missing or cannot be turned into separators
    #[error("Invalid registry header: {0}")]
    Format(String),

    /// A data line could not be turned into a person
    #[error("Could not create a person from line '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation was cancelled before it finished
    #[error("Operation cancelled")]
    Cancelled,
}

impl CodecError {
    /// Whether the error only affects a single line of input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CodecError::Parse { .. })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Requests rejected by the registry service before any work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No file path was supplied for a load or save
    #[error("No registry file path provided, can't {0}")]
    MissingPath(&'static str),

    /// No person name was supplied
    #[error("Person name is not provided, can't {0}")]
    MissingName(&'static str),

    /// The named person does not exist
    #[error("Person named '{0}' is not in the registry")]
    UnknownPerson(String),

    /// A background file task ended abnormally
    #[error("File task failed: {0}")]
    TaskFailed(String),
}

/// Convenience type alias for Results with CodecError
pub type CodecResult<T> = Result<T, CodecError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
