use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use padel_config::AppConfig;
use padel_db::{CredentialStore, Credentials, DbClientFactory, SqlBookingRepository, VenueRegistry};
use padel_engine::{require_login, TimeNormalizer, TimeZoneResolver, VenueLookup};
use padel_playtomic::PlaytomicClient;
use tracing::warn;

/// Everything a command needs, built once from the loaded configuration.
///
/// Stores are rooted at the configured directory and the default venue
/// zone is threaded into the resolver here, so commands never read
/// configuration on their own.
pub struct AppState {
    pub config: AppConfig,
    pub normalizer: TimeNormalizer,
    pub venues: VenueRegistry,
    pub credentials: CredentialStore,
    factory: DbClientFactory,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let normalizer = TimeNormalizer::new(TimeZoneResolver::new(&config.storage.default_timezone));
        let venues = VenueRegistry::from_config(&config.storage);
        let credentials = CredentialStore::from_config(&config.storage);
        Self {
            config,
            normalizer,
            venues,
            credentials,
            factory: DbClientFactory::new(),
        }
    }

    /// An anonymous client for the public catalogue.
    pub fn client(&self) -> Result<PlaytomicClient> {
        Ok(PlaytomicClient::new(self.config.api.clone())?)
    }

    /// A client carrying the stored access token, with the credentials it came from.
    pub fn authenticated_client(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(PlaytomicClient, Credentials)> {
        let credentials = require_login(self.credentials.load()?, now)?;
        let mut client = self.client()?;
        client.set_access_token(credentials.access_token.clone());
        Ok((client, credentials))
    }

    pub async fn open_bookings(&self) -> Result<SqlBookingRepository> {
        Ok(self.factory.open_bookings(&self.config.storage).await?)
    }

    /// Pause between consecutive per-venue requests.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config.search.request_delay_ms)
    }

    /// Saved venues indexed for the booking time-zone backfill. An unreadable
    /// registry only loses the backfill, so it is logged and treated as empty.
    pub fn venue_lookup(&self) -> VenueLookup {
        match self.venues.load() {
            Ok(venues) => VenueLookup::new(&venues),
            Err(e) => {
                warn!("Ignoring unreadable venue registry {}: {}", self.venues.path().display(), e);
                VenueLookup::new(&[])
            }
        }
    }
}
