//! Local storage for the padel tools
//!
//! - a SQLite booking store behind the [`BookingRepository`] trait, reached
//!   through SQLx's `Any` driver
//! - the JSON venue registry
//! - the JSON credential file written by `auth login`
//!
//! Every store is rooted at the directory resolved in
//! [`padel_config::StorageConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use padel_config::StorageConfig;
//! use padel_db::{BookingFilter, BookingRepository, DbClientFactory};
//!
//! async fn upcoming() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DbClientFactory::new()
//!         .open_bookings(&StorageConfig::default())
//!         .await?;
//!     let bookings = store.list(&BookingFilter::All).await?;
//!     println!("{} bookings", bookings.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod venues;

pub use client::DbClient;
pub use credentials::{CredentialStore, Credentials};
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;
pub use venues::{find_venue_by_alias, VenueRegistry};

pub use repositories::{
    Booking, BookingFilter, BookingRepository, BookingRepositoryFactory, BookingSource, NowMarker,
    SqlBookingRepository,
};
