// --- File: crates/padel_engine/src/lib.rs ---
//! Availability and booking engine for the padel tools.
//!
//! Remote slots and matches arrive in UTC; everything shown to the user or
//! compared against user input is in the venue's own zone, resolved by
//! [`TimeZoneResolver`] and converted by [`TimeNormalizer`].

pub mod booking_flow;
#[cfg(test)]
mod booking_flow_test;
pub mod bookings;
pub mod catalog;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod payment;
pub mod reconcile;
pub mod search;
#[cfg(test)]
mod search_test;
pub mod selector;
pub mod stats;
pub mod time;
#[cfg(test)]
mod time_proptest;
pub mod timezone;

pub use booking_flow::{book_court, require_login, BookRequest, BookingReceipt};
pub use bookings::{
    build_manual_booking, ensure_booking_timezone, new_booking_id, parse_price_amount,
    ManualBookingInput, VenueLookup,
};
pub use catalog::{CatalogQuery, CourtFilter, SlotCatalog};
pub use error::EngineError;
pub use reconcile::{sync_remote_bookings, SyncReconciler, SyncReport, SyncRequest};
pub use search::{
    AvailabilityOutput, AvailabilityQuery, ClubSummary, CourtSearch, SearchQuery, SearchResult,
    VenueSelection,
};
pub use selector::{select_slot, SlotRequest};
pub use stats::{format_eur, BookingStats};
pub use time::{TimeNormalizer, TimeWindow};
pub use timezone::TimeZoneResolver;
