//! Factory for opening the booking store

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::{BookingRepository, BookingRepositoryFactory, SqlBookingRepository};
use crate::repository::RepositoryFactory;
use padel_config::StorageConfig;
use std::path::Path;
use tracing::debug;

/// Factory for database clients and the repositories built on them
#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a database client from the storage configuration.
    pub async fn from_storage_config(&self, storage: &StorageConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from storage configuration");
        DbClient::from_config(storage).await
    }

    /// Open the booking store for the configured directory, with its schema
    /// initialised and migrated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created or migrated.
    pub async fn open_bookings(
        &self,
        storage: &StorageConfig,
    ) -> Result<SqlBookingRepository, DbError> {
        let client = self.from_storage_config(storage).await?;
        Self::with_schema(client).await
    }

    /// Open the booking store in a SQLite file at an explicit path.
    pub async fn open_bookings_at(&self, path: &Path) -> Result<SqlBookingRepository, DbError> {
        let client = DbClient::from_path(path).await?;
        Self::with_schema(client).await
    }

    async fn with_schema(client: DbClient) -> Result<SqlBookingRepository, DbError> {
        let repository = BookingRepositoryFactory::new().create_repository(client);
        repository.init_schema().await?;
        Ok(repository)
    }
}
