// --- File: crates/padel_engine/src/stats.rs ---
//! Aggregates shown by `bookings stats`.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use padel_common::Booking;
use serde::Serialize;

use crate::time::{format_minutes, slot_minutes, DATE_FORMAT};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingStats {
    pub total_bookings: usize,
    pub total_spent: f64,
    pub favourite_venue: String,
    pub favourite_venue_count: usize,
    pub usual_time: String,
    pub last_played: String,
}

impl BookingStats {
    /// Computes the statistics; `now` is the wall clock the local dates are
    /// compared against for `last_played`.
    pub fn compute(bookings: &[Booking], now: NaiveDateTime) -> Self {
        let (favourite_venue, favourite_venue_count) = favourite_venue(bookings);
        Self {
            total_bookings: bookings.len(),
            total_spent: bookings.iter().map(|booking| booking.price).sum(),
            favourite_venue,
            favourite_venue_count,
            usual_time: usual_time(bookings),
            last_played: last_played(bookings, now),
        }
    }
}

/// Most booked venue keyed by alias (name when the alias is empty).
/// Ties go to the lexicographically smallest key; the name is shown when known.
fn favourite_venue(bookings: &[Booking]) -> (String, usize) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut names: HashMap<&str, &str> = HashMap::new();
    for booking in bookings {
        let key = if booking.venue_alias.is_empty() {
            booking.venue_name.as_str()
        } else {
            booking.venue_alias.as_str()
        };
        *counts.entry(key).or_default() += 1;
        if !booking.venue_name.is_empty() {
            names.insert(key, booking.venue_name.as_str());
        }
    }

    let mut top: Option<(&str, usize)> = None;
    for (key, count) in counts {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((key, count));
        }
    }

    match top {
        Some((key, count)) if !key.is_empty() => {
            let label = names.get(key).copied().unwrap_or(key);
            (label.to_string(), count)
        }
        _ => (NOT_AVAILABLE.to_string(), 0),
    }
}

fn usual_time(bookings: &[Booking]) -> String {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in bookings.iter().filter_map(booking_time_label) {
        *counts.entry(label).or_default() += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for (label, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `<Weekday> HH:MM-HH:MM`, or `<Weekday> HH:MM` without a duration.
pub fn booking_time_label(booking: &Booking) -> Option<String> {
    if booking.date.is_empty() || booking.time.is_empty() {
        return None;
    }
    let start = NaiveDateTime::parse_from_str(
        &format!("{} {}", booking.date, booking.time),
        "%Y-%m-%d %H:%M",
    )
    .ok()?;
    let weekday = start.format("%A");

    if booking.duration <= 0 {
        return Some(format!("{} {}", weekday, booking.time));
    }
    Some(match slot_minutes(&booking.time) {
        Some(minutes) => {
            let end = u32::try_from(booking.duration)
                .map(|duration| minutes.saturating_add(duration))
                .unwrap_or(minutes);
            format!("{} {}-{}", weekday, booking.time, format_minutes(end))
        }
        None => format!("{} {}", weekday, booking.time),
    })
}

/// Latest booking date not after `now`; a missing time counts as midnight.
fn last_played(bookings: &[Booking], now: NaiveDateTime) -> String {
    bookings
        .iter()
        .filter(|booking| !booking.date.is_empty())
        .filter_map(|booking| {
            let time = if booking.time.is_empty() {
                "00:00"
            } else {
                booking.time.as_str()
            };
            NaiveDateTime::parse_from_str(&format!("{} {}", booking.date, time), "%Y-%m-%d %H:%M")
                .ok()
        })
        .filter(|played| *played <= now)
        .max()
        .map(|played| played.date().format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `EUR 12.50`
pub fn format_eur(amount: f64) -> String {
    format!("EUR {:.2}", amount)
}

/// `Sat 1 Jun` style label for a local date.
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}
