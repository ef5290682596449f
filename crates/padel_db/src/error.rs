//! Error types for the storage layer

use padel_common::{config_error, conflict, not_found, PadelError};
use thiserror::Error;

/// Errors that can occur when working with local storage
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error while creating or migrating the schema
    #[error("Database schema error: {0}")]
    SchemaError(String),

    /// Strict insert hit an existing identifier
    #[error("Booking {0:?} already exists")]
    Duplicate(String),

    /// A keyed record was not located
    #[error("{0} not found")]
    NotFound(String),

    /// A keyed record already exists
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Reading or writing a JSON document failed
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DbError> for PadelError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(id) => conflict(format!("booking {:?} already exists", id)),
            DbError::AlreadyExists(what) => conflict(format!("{} already exists", what)),
            DbError::NotFound(what) => not_found(what),
            DbError::ConfigError(message) | DbError::UrlError(message) => config_error(message),
            other => PadelError::Storage(other.to_string()),
        }
    }
}
