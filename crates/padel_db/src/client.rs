//! Database client for the booking store
//!
//! Wraps an SQLx `Any` pool pointed at a SQLite file inside the
//! configuration directory.

use crate::error::DbError;
use padel_config::{sqlite_url, StorageConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database client for the booking store
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Open the booking database described by the storage configuration.
    ///
    /// The configuration directory is created when missing.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The configuration directory cannot be created
    /// * The database connection fails
    pub async fn from_config(storage: &StorageConfig) -> Result<Self, DbError> {
        let dir = storage.root_dir();
        std::fs::create_dir_all(&dir).map_err(|e| {
            error!("Failed to create config directory {}: {}", dir.display(), e);
            DbError::ConfigError(format!("create config dir {}: {}", dir.display(), e))
        })?;

        Self::from_url(&storage.bookings_url()).await
    }

    /// Open a SQLite database file at an explicit path.
    pub async fn from_path(path: &Path) -> Result<Self, DbError> {
        Self::from_url(&sqlite_url(path)).await
    }

    /// Create a new database client from a database URL
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty or invalid
    /// * The database connection fails
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    async fn create_pool(db_url: &str) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        #[cfg(feature = "sqlite")]
        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        // AnyConnectOptions cannot set create_if_missing, so the file is created up front.
        if let Some(db_path) = db_url
            .strip_prefix("sqlite://")
            .or_else(|| db_url.strip_prefix("sqlite:"))
        {
            if !db_path.contains(":memory:") && !db_path.is_empty() {
                let path = Path::new(db_path);
                if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                    if !dir.exists() {
                        debug!("Creating directory for SQLite database: {:?}", dir);
                        std::fs::create_dir_all(dir).map_err(|e| {
                            error!("Failed to create directory for SQLite database: {}", e);
                            DbError::PoolError(format!("Failed to create directory: {}", e))
                        })?;
                    }
                }

                if !path.exists() {
                    debug!("Creating empty SQLite database file: {}", db_path);
                    std::fs::File::create(path).map_err(|e| {
                        error!("Failed to create SQLite database file: {}", e);
                        DbError::PoolError(format!("Failed to create database file: {}", e))
                    })?;
                }
            }
        }

        let options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;
        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to create database pool: {}", e);
            DbError::PoolError(e.to_string())
        })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows
    ///
    /// # Returns
    ///
    /// The number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}
