//! Repository modules for database access

pub mod booking;
pub mod booking_factory;
pub mod booking_sql;

pub use booking::{Booking, BookingFilter, BookingRepository, BookingSource, NowMarker};
pub use booking_factory::BookingRepositoryFactory;
pub use booking_sql::SqlBookingRepository;
