//! Factory for creating booking repositories

use crate::repositories::booking_sql::SqlBookingRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating booking repositories
#[derive(Debug, Clone, Default)]
pub struct BookingRepositoryFactory;

impl BookingRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlBookingRepository, DbClient> for BookingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlBookingRepository {
        SqlBookingRepository::new(db_client)
    }
}
