// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Domain models shared by every crate
pub mod services; // Async service plumbing

// Re-export error types and utilities for easier access
pub use error::{
    ambiguous, config_error, conflict, not_found, parse_error, validation_error, PadelError,
};

pub use logging::init_with_level;

pub use models::{Booking, BookingSource, NormalizedSlot, Venue};
pub use services::BoxFuture;
