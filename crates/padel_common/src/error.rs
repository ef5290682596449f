// --- File: crates/padel_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all padel crates.
///
/// Each crate keeps its own error enum and converts into this one at the
/// crate boundary.
#[derive(Error, Debug)]
pub enum PadelError {
    /// A timestamp, clock, date or other input could not be parsed
    #[error("Failed to parse: {0}")]
    Parse(String),

    /// A venue alias, booking id or slot could not be located
    #[error("Not found: {0}")]
    NotFound(String),

    /// Several candidates matched and the caller has to narrow the choice
    #[error("{message} (candidates: {})", candidates.join(", "))]
    Ambiguous {
        message: String,
        candidates: Vec<String>,
    },

    /// The entity already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Local storage failed; fatal for the current operation
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for PadelError {
    fn from(err: serde_json::Error) -> Self {
        PadelError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for PadelError {
    fn from(err: std::io::Error) -> Self {
        PadelError::Storage(err.to_string())
    }
}

// Utility functions for error handling
pub fn parse_error<T: fmt::Display>(message: T) -> PadelError {
    PadelError::Parse(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> PadelError {
    PadelError::Config(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> PadelError {
    PadelError::Validation(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> PadelError {
    PadelError::NotFound(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> PadelError {
    PadelError::Conflict(message.to_string())
}

pub fn ambiguous<T: fmt::Display>(message: T, candidates: Vec<String>) -> PadelError {
    PadelError::Ambiguous {
        message: message.to_string(),
        candidates,
    }
}
