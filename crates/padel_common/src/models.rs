// --- File: crates/padel_common/src/models.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A saved venue, keyed locally by a user-chosen alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub indoor: bool,
    /// IANA zone name; empty until the registry fills in its default.
    #[serde(default)]
    pub timezone: String,
}

impl Venue {
    /// Case-insensitive alias comparison.
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.alias.to_lowercase() == alias.trim().to_lowercase()
    }
}

/// Where a booking record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    /// Entered by hand with `bookings add`
    #[default]
    Manual,
    /// Booked through this tool
    CliBooked,
    /// Imported from the remote account
    #[serde(rename = "playtomic_sync")]
    RemoteSynced,
}

impl BookingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingSource::Manual => "manual",
            BookingSource::CliBooked => "cli_booked",
            BookingSource::RemoteSynced => "playtomic_sync",
        }
    }
}

impl fmt::Display for BookingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(BookingSource::Manual),
            "cli_booked" => Ok(BookingSource::CliBooked),
            "playtomic_sync" => Ok(BookingSource::RemoteSynced),
            other => Err(format!("unknown booking source {:?}", other)),
        }
    }
}

/// A booking record as held by the booking store.
///
/// `date` and `time` are venue-local; `start_utc` is the canonical RFC 3339
/// instant and may be empty for rows written before it existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub venue_alias: String,
    pub venue_name: String,
    pub venue_id: String,
    pub court: String,
    pub date: String,
    pub time: String,
    pub start_utc: String,
    pub venue_timezone: String,
    pub duration: i64,
    pub price: f64,
    pub booked_at: String,
    pub source: BookingSource,
}

/// A bookable slot after normalisation into the venue's local timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSlot {
    pub court: String,
    pub date: String,
    pub time: String,
    /// Empty when the remote start could not be parsed; such slots are for
    /// display only.
    pub start_utc: String,
    pub venue_timezone: String,
    pub duration: i64,
    pub price: String,
    pub indoor: bool,
    pub resource_id: String,
}

impl NormalizedSlot {
    /// Whether the local fields were derived from a parsed instant.
    pub fn is_normalized(&self) -> bool {
        !self.start_utc.is_empty()
    }
}
