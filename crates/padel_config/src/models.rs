// --- File: crates/padel_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Zone used whenever a venue reports no usable IANA name.
pub const DEFAULT_VENUE_TIMEZONE: &str = "Europe/Madrid";

/// Canonical name of a configured default zone. A name that is not a known
/// IANA zone is replaced by [`DEFAULT_VENUE_TIMEZONE`].
pub fn default_timezone_name(configured: &str) -> String {
    match configured.trim().parse::<chrono_tz::Tz>() {
        Ok(zone) => zone.name().to_string(),
        Err(_) => {
            warn!(
                "Configured default time zone {:?} is not a valid IANA name, using {}",
                configured, DEFAULT_VENUE_TIMEZONE
            );
            DEFAULT_VENUE_TIMEZONE.to_string()
        }
    }
}

pub const VENUES_FILE: &str = "venues.json";
pub const BOOKINGS_FILE: &str = "bookings.db";
pub const CREDENTIALS_FILE: &str = "credentials.json";

// --- Storage Config ---
// The directory is resolved once by `load_config` and threaded into every store.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub config_dir: Option<PathBuf>,
    pub default_timezone: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_dir: None,
            default_timezone: DEFAULT_VENUE_TIMEZONE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Root directory for all persisted files. Falls back to the per-user
    /// location when no directory was resolved.
    pub fn root_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(crate::resolve_config_dir)
    }

    pub fn venues_path(&self) -> PathBuf {
        self.root_dir().join(VENUES_FILE)
    }

    pub fn bookings_path(&self) -> PathBuf {
        self.root_dir().join(BOOKINGS_FILE)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.root_dir().join(CREDENTIALS_FILE)
    }

    /// SQLite URL for the booking store.
    pub fn bookings_url(&self) -> String {
        sqlite_url(&self.bookings_path())
    }
}

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

// --- Remote API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub public_base_url: String,
    pub api_base_url: String,
    pub auth_base_url: String,
    pub geocode_url: String,
    pub user_agent: String,
    pub requested_with: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            public_base_url: "https://api.playtomic.io/v1".to_string(),
            api_base_url: "https://api.playtomic.io/v1".to_string(),
            auth_base_url: "https://api.playtomic.io/v3".to_string(),
            geocode_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "padel-cli/0.1".to_string(),
            requested_with: "com.playtomic.web".to_string(),
            timeout_secs: 15,
        }
    }
}

// --- Search / Booking defaults ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_location: Option<String>,
    pub default_duration: u32,
    pub default_players: u32,
    pub radius_meters: u32,
    pub request_delay_ms: u64,
    pub sync_page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_location: None,
            default_duration: 90,
            default_players: 4,
            radius_meters: 50_000,
            request_delay_ms: 150,
            sync_page_size: 50,
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// --- Top-level Application Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}
