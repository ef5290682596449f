//! Command handlers. Each handler validates its flags, calls into the
//! engine, and hands the result to [`crate::output`].

pub mod auth;
pub mod book;
pub mod bookings;
pub mod search;
pub mod venues;

use anyhow::{bail, Result};
use padel_engine::CourtFilter;

/// Maps the mutually exclusive `--outdoor` / `--all` flags.
pub fn court_filter(outdoor: bool, all: bool) -> Result<CourtFilter> {
    if outdoor && all {
        bail!("use either --outdoor or --all, not both");
    }
    Ok(CourtFilter::from_flags(outdoor, all))
}

/// Treats an empty flag value as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
