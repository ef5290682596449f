// --- File: crates/padel_playtomic/src/error.rs ---

use padel_common::{config_error, not_found, parse_error, PadelError};
use thiserror::Error;

/// Errors that can occur when talking to the remote booking service.
#[derive(Error, Debug)]
pub enum PlaytomicError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("request failed: {status}: {body}")]
    ApiError { status: String, body: String },

    /// The geocoder answered with a non-2xx status
    #[error("geocode failed: {status}: {body}")]
    GeocodeError { status: String, body: String },

    #[error("no results for {0:?}")]
    NoGeocodeResults(String),

    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(String),

    #[error("login failed: missing access_token")]
    MissingAccessToken,

    #[error("payment intent missing id")]
    MissingPaymentIntentId,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<PlaytomicError> for PadelError {
    fn from(err: PlaytomicError) -> Self {
        match err {
            PlaytomicError::MissingAccessToken => PadelError::Auth(err.to_string()),
            PlaytomicError::NoGeocodeResults(_) => not_found(&err),
            PlaytomicError::ParseError(_) | PlaytomicError::InvalidResponse(_) => parse_error(&err),
            PlaytomicError::UrlError(_) => config_error(&err),
            other => PadelError::Http(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_status_and_body() {
        let err = PlaytomicError::ApiError {
            status: "404 Not Found".to_string(),
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "request failed: 404 Not Found: missing");
        assert!(matches!(PadelError::from(err), PadelError::Http(_)));
    }

    #[test]
    fn geocode_miss_is_not_found() {
        let err = PlaytomicError::NoGeocodeResults("Atlantis".to_string());
        assert_eq!(err.to_string(), "no results for \"Atlantis\"");
        assert!(matches!(PadelError::from(err), PadelError::NotFound(_)));
    }

    #[test]
    fn missing_token_is_auth_failure() {
        let err: PadelError = PlaytomicError::MissingAccessToken.into();
        assert!(matches!(err, PadelError::Auth(_)));
    }
}
