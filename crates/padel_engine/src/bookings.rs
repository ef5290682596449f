// --- File: crates/padel_engine/src/bookings.rs ---
//! Helpers for building and repairing booking records.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use padel_common::{Booking, BookingSource, Venue};
use tracing::debug;

use crate::error::EngineError;
use crate::time::{canonical, parse_clock, parse_date_input, TimeNormalizer, DATE_FORMAT};

/// Generates an id for a booking the remote service did not name:
/// `bk_<unix seconds>_<12 hex chars>`.
pub fn new_booking_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("bk_{}_{}", now.timestamp(), &random[..12])
}

/// Reads the leading number of a price label such as `"12,50 EUR"`.
/// Anything unparseable is `0.0`.
pub fn parse_price_amount(input: &str) -> f64 {
    input
        .split_whitespace()
        .next()
        .map(|amount| amount.replace(',', "."))
        .and_then(|amount| amount.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Saved venues indexed by remote id and by lowercase alias.
#[derive(Debug, Clone, Default)]
pub struct VenueLookup {
    by_id: HashMap<String, Venue>,
    by_alias: HashMap<String, Venue>,
}

impl VenueLookup {
    pub fn new(venues: &[Venue]) -> Self {
        let mut lookup = Self::default();
        for venue in venues {
            lookup.by_id.insert(venue.id.clone(), venue.clone());
            if !venue.alias.is_empty() {
                lookup
                    .by_alias
                    .insert(venue.alias.to_lowercase(), venue.clone());
            }
        }
        lookup
    }

    pub fn by_id(&self, id: &str) -> Option<&Venue> {
        self.by_id.get(id)
    }

    pub fn by_alias(&self, alias: &str) -> Option<&Venue> {
        self.by_alias.get(&alias.to_lowercase())
    }
}

/// Fills in the zone and canonical instant of a stored booking.
///
/// An empty zone is taken from the saved venue (by id, then alias) and
/// normalised. An empty instant is rebuilt from the stored date and time:
/// synced rows stored them in UTC, every other source in venue-local time.
/// Whenever an instant is available the local date and time are
/// re-derived from it.
pub fn ensure_booking_timezone(
    booking: &mut Booking,
    venues: &VenueLookup,
    normalizer: &TimeNormalizer,
) {
    if booking.venue_timezone.is_empty() {
        let from_registry = venues
            .by_id(&booking.venue_id)
            .map(|venue| venue.timezone.as_str())
            .filter(|zone| !zone.is_empty())
            .or_else(|| {
                (!booking.venue_alias.is_empty())
                    .then(|| venues.by_alias(&booking.venue_alias))
                    .flatten()
                    .map(|venue| venue.timezone.as_str())
                    .filter(|zone| !zone.is_empty())
            });
        if let Some(zone) = from_registry {
            booking.venue_timezone = zone.to_string();
        }
    }
    booking.venue_timezone = normalizer.zones().normalize(&booking.venue_timezone);

    if booking.start_utc.is_empty() && !booking.date.is_empty() && !booking.time.is_empty() {
        let rebuilt = match booking.source {
            BookingSource::RemoteSynced => NaiveDateTime::parse_from_str(
                &format!("{} {}", booking.date, booking.time),
                "%Y-%m-%d %H:%M",
            )
            .ok()
            .map(|naive| canonical(Utc.from_utc_datetime(&naive))),
            _ => normalizer
                .local_to_utc(&booking.date, &booking.time, &booking.venue_timezone)
                .ok(),
        };
        if let Some(start_utc) = rebuilt {
            debug!("Rebuilt start instant {} for booking {}", start_utc, booking.id);
            booking.start_utc = start_utc;
        }
    }

    if !booking.start_utc.is_empty() {
        if let Some(stamp) = normalizer.utc_to_local(&booking.start_utc, &booking.venue_timezone) {
            booking.date = stamp.date;
            booking.time = stamp.time;
        }
    }
}

/// A booking entered by hand for a saved venue.
#[derive(Debug, Clone)]
pub struct ManualBookingInput {
    /// `today`, `tomorrow` or `YYYY-MM-DD`, read in the venue zone
    pub date: String,
    /// `HH:MM`, venue-local
    pub time: String,
    pub court: String,
    pub price: f64,
    /// Minutes; zero or negative means 90
    pub duration: i64,
}

/// Default booking length in minutes.
pub const DEFAULT_DURATION: i64 = 90;

/// Validates a manual entry and turns it into a booking record.
pub fn build_manual_booking(
    input: &ManualBookingInput,
    venue: &Venue,
    normalizer: &TimeNormalizer,
    now: DateTime<Utc>,
) -> Result<Booking, EngineError> {
    if input.court.trim().is_empty() {
        return Err(EngineError::Validation("court is required".to_string()));
    }
    if input.price <= 0.0 {
        return Err(EngineError::Validation(
            "price must be greater than 0".to_string(),
        ));
    }
    parse_clock(&input.time)?;

    let timezone = normalizer.zones().normalize(&venue.timezone);
    let today = normalizer.local_today(now, &timezone);
    let date = parse_date_input(&input.date, today)?
        .format(DATE_FORMAT)
        .to_string();
    let start_utc = normalizer.local_to_utc(&date, &input.time, &timezone)?;

    Ok(Booking {
        id: new_booking_id(now),
        venue_alias: venue.alias.clone(),
        venue_name: venue.name.clone(),
        venue_id: venue.id.clone(),
        court: input.court.clone(),
        date,
        time: input.time.clone(),
        start_utc,
        venue_timezone: timezone,
        duration: if input.duration > 0 {
            input.duration
        } else {
            DEFAULT_DURATION
        },
        price: input.price,
        booked_at: canonical(now),
        source: BookingSource::Manual,
    })
}
