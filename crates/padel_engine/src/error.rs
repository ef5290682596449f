// --- File: crates/padel_engine/src/error.rs ---

use padel_common::{ambiguous, not_found, parse_error, validation_error, PadelError};
use padel_db::DbError;
use thiserror::Error;

/// Errors raised by the engine.
///
/// Messages are user-facing: the CLI prints them as they are.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A timestamp, clock, date or range could not be parsed
    #[error("{0}")]
    Parse(String),

    /// No slot matched the requested time, duration and court
    #[error("slot not available for {0}")]
    SlotNotAvailable(String),

    #[error("{0}")]
    NotFound(String),

    /// Several candidates remain and the caller has to pick one
    #[error("{message}")]
    Ambiguous {
        message: String,
        candidates: Vec<String>,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    /// The remote booking service failed
    #[error("{0}")]
    Remote(String),

    #[error(transparent)]
    Store(#[from] DbError),
}

impl EngineError {
    pub fn parse(message: impl Into<String>) -> Self {
        EngineError::Parse(message.into())
    }

    pub fn remote<E: std::error::Error>(err: E) -> Self {
        EngineError::Remote(err.to_string())
    }
}

impl From<EngineError> for PadelError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Parse(message) => parse_error(message),
            EngineError::SlotNotAvailable(_) | EngineError::NotFound(_) => not_found(&err),
            EngineError::Ambiguous {
                message,
                candidates,
            } => ambiguous(message, candidates),
            EngineError::Validation(message) => validation_error(message),
            EngineError::Auth(message) => PadelError::Auth(message),
            EngineError::Remote(message) => PadelError::Http(message),
            EngineError::Store(db) => db.into(),
        }
    }
}
