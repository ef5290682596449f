//! Repository for booking records
//!
//! Bookings are keyed by a stable identifier: the remote match id for
//! synced and CLI-booked entries, a locally generated token otherwise.

use crate::error::DbError;

pub use padel_common::models::{Booking, BookingSource};

/// Selection applied by [`BookingRepository::list`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookingFilter {
    /// Every stored booking
    #[default]
    All,
    /// Inclusive local-date range; either bound may be open
    Range {
        from: Option<String>,
        to: Option<String>,
    },
    /// Bookings strictly before `now`
    Past(NowMarker),
    /// Bookings at or after `now`
    Upcoming(NowMarker),
}

/// The caller's notion of "now", as a local date and an `HH:MM` time.
///
/// An empty `time` keeps every booking on `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowMarker {
    pub date: String,
    pub time: String,
}

impl NowMarker {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

impl BookingFilter {
    /// Builds a range filter, collapsing to [`BookingFilter::All`] when both
    /// bounds are absent.
    pub fn range(from: Option<String>, to: Option<String>) -> Self {
        if from.is_none() && to.is_none() {
            BookingFilter::All
        } else {
            BookingFilter::Range { from, to }
        }
    }

    /// Whether a booking read back from the date query survives the
    /// time-of-day split on the current date.
    pub fn keeps(&self, booking: &Booking) -> bool {
        let (now, past) = match self {
            BookingFilter::Past(now) => (now, true),
            BookingFilter::Upcoming(now) => (now, false),
            _ => return true,
        };
        if booking.date != now.date || now.time.is_empty() {
            return true;
        }
        if past {
            booking.time.as_str() < now.time.as_str()
        } else {
            booking.time.as_str() >= now.time.as_str()
        }
    }
}

/// Repository for booking records
pub trait BookingRepository {
    /// Create the bookings table and index, and add columns introduced
    /// after the table was first created.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a booking.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Duplicate`] if the identifier already exists.
    fn insert(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a booking unless its identifier already exists.
    ///
    /// # Returns
    ///
    /// `true` if the row was written, `false` if an existing row was kept
    fn insert_if_absent(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Remove a booking by identifier.
    ///
    /// # Returns
    ///
    /// `true` if a booking was deleted, `false` if none had that identifier
    fn remove(&self, id: &str) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// List bookings ordered by local date then time.
    fn list(
        &self,
        filter: &BookingFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;
}
