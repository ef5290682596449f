//! SQL implementation of the booking repository
//!
//! Dedup on the idempotent path relies on SQLite's `INSERT OR IGNORE`, so
//! the existence check and the write happen in one statement.

use crate::error::DbError;
use crate::repositories::booking::{Booking, BookingFilter, BookingRepository, BookingSource};
use crate::DbClient;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Row};
use tracing::{debug, error, info};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        venue_alias TEXT,
        venue_name TEXT,
        venue_id TEXT,
        court TEXT,
        date TEXT,
        time TEXT,
        start_utc TEXT,
        venue_timezone TEXT,
        duration INTEGER,
        price REAL,
        players TEXT,
        booked_by TEXT,
        booked_at TEXT,
        source TEXT
    )
"#;

const CREATE_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(date)";

/// Columns added after the first released schema.
const LATE_COLUMNS: [&str; 2] = ["start_utc", "venue_timezone"];

const INSERT_COLUMNS: &str = "id, venue_alias, venue_name, venue_id, court, date, time, \
     start_utc, venue_timezone, duration, price, booked_at, source";

const INSERT_VALUES: &str = "$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13";

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn client(&self) -> &DbClient {
        &self.db_client
    }

    async fn existing_columns(&self) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query("SELECT name FROM pragma_table_info('bookings')")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to inspect bookings table: {}", e);
                DbError::SchemaError(format!("inspect bookings table: {}", e))
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| row.try_get::<String, _>("name").ok())
            .collect())
    }

    async fn write(&self, booking: &Booking, or_ignore: bool) -> Result<u64, sqlx::Error> {
        let verb = if or_ignore {
            "INSERT OR IGNORE"
        } else {
            "INSERT"
        };
        let query = format!(
            "{} INTO bookings ({}) VALUES ({})",
            verb, INSERT_COLUMNS, INSERT_VALUES
        );

        sqlx::query(&query)
            .bind(&booking.id)
            .bind(&booking.venue_alias)
            .bind(&booking.venue_name)
            .bind(&booking.venue_id)
            .bind(&booking.court)
            .bind(&booking.date)
            .bind(&booking.time)
            .bind(&booking.start_utc)
            .bind(&booking.venue_timezone)
            .bind(booking.duration)
            .bind(booking.price)
            .bind(&booking.booked_at)
            .bind(booking.source.as_str())
            .execute(self.db_client.pool())
            .await
            .map(|result| result.rows_affected())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() || db_err.message().contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}

/// Maps a row to a booking. Only the columns that rows from older schemas
/// may leave NULL are optional; any other decode failure is an error.
fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let source: Option<String> = row.try_get("source")?;
    Ok(Booking {
        id: row.try_get("id")?,
        venue_alias: row.try_get("venue_alias")?,
        venue_name: row.try_get("venue_name")?,
        venue_id: row.try_get("venue_id")?,
        court: row.try_get("court")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        start_utc: row.try_get::<Option<String>, _>("start_utc")?.unwrap_or_default(),
        venue_timezone: row
            .try_get::<Option<String>, _>("venue_timezone")?
            .unwrap_or_default(),
        duration: row.try_get("duration")?,
        price: row.try_get::<Option<f64>, _>("price")?.unwrap_or(0.0),
        booked_at: row.try_get("booked_at")?,
        source: source
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(BookingSource::Manual),
    })
}

/// Builds the date-level part of a listing query.
fn date_conditions(filter: &BookingFilter) -> Vec<(&'static str, String)> {
    match filter {
        BookingFilter::All => Vec::new(),
        BookingFilter::Range { from, to } => {
            let mut conds = Vec::new();
            if let Some(from) = from {
                conds.push(("date >=", from.clone()));
            }
            if let Some(to) = to {
                conds.push(("date <=", to.clone()));
            }
            conds
        }
        BookingFilter::Past(now) => vec![("date <=", now.date.clone())],
        BookingFilter::Upcoming(now) => vec![("date >=", now.date.clone())],
    }
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bookings schema");

        self.db_client
            .execute(CREATE_TABLE)
            .await
            .map_err(|e| DbError::SchemaError(format!("create bookings table: {}", e)))?;
        self.db_client
            .execute(CREATE_DATE_INDEX)
            .await
            .map_err(|e| DbError::SchemaError(format!("create bookings index: {}", e)))?;

        let existing = self.existing_columns().await?;
        for column in LATE_COLUMNS {
            if existing.iter().any(|name| name == column) {
                continue;
            }
            info!("Adding bookings column {}", column);
            self.db_client
                .execute(&format!("ALTER TABLE bookings ADD COLUMN {} TEXT", column))
                .await
                .map_err(|e| {
                    error!("Failed to add bookings column {}: {}", column, e);
                    DbError::SchemaError(format!("add bookings column {}: {}", column, e))
                })?;
        }

        info!("Bookings schema initialized successfully");
        Ok(())
    }

    async fn insert(&self, booking: &Booking) -> Result<(), DbError> {
        debug!("Inserting booking {}", booking.id);

        self.write(booking, false).await.map_err(|e| {
            if is_unique_violation(&e) {
                DbError::Duplicate(booking.id.clone())
            } else {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            }
        })?;
        Ok(())
    }

    async fn insert_if_absent(&self, booking: &Booking) -> Result<bool, DbError> {
        debug!("Inserting booking {} unless present", booking.id);

        let affected = self.write(booking, true).await.map_err(|e| {
            error!("Failed to insert booking: {}", e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(affected > 0)
    }

    async fn remove(&self, id: &str) -> Result<bool, DbError> {
        debug!("Removing booking {}", id);

        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, DbError> {
        debug!("Listing bookings with filter {:?}", filter);

        let conds = date_conditions(filter);
        let mut query = format!("SELECT {} FROM bookings", INSERT_COLUMNS);
        if !conds.is_empty() {
            let clauses: Vec<String> = conds
                .iter()
                .enumerate()
                .map(|(i, (op, _))| format!("{} ${}", op, i + 1))
                .collect();
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY date, time");

        let mut statement: Query<'_, Any, AnyArguments<'_>> = sqlx::query(&query);
        for (_, value) in &conds {
            statement = statement.bind(value);
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in &rows {
            let booking = booking_from_row(row).map_err(|e| {
                error!("Failed to decode booking row: {}", e);
                e
            })?;
            if filter.keeps(&booking) {
                bookings.push(booking);
            }
        }
        Ok(bookings)
    }
}
