// --- File: crates/padel_engine/src/time.rs ---
//! Conversions between remote UTC timestamps, venue-local date/time pairs
//! and the canonical UTC instant used as a storage key.
//!
//! Zone rules are always evaluated at the date being converted, so a slot
//! on the day after a DST change gets the new offset regardless of when the
//! query runs.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;

use crate::error::EngineError;
use crate::timezone::TimeZoneResolver;

/// Layout of the canonical UTC instant, e.g. `2024-03-30T21:00:00Z`.
pub const CANONICAL_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Naive layouts read as UTC, tried after RFC 3339.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A venue-local date and time with the UTC instant they were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStamp {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Canonical UTC instant
    pub start_utc: String,
}

/// Inclusive local time-of-day window in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.start && minutes <= self.end
    }
}

/// Converts between remote UTC values and venue-local time.
#[derive(Debug, Clone, Default)]
pub struct TimeNormalizer {
    zones: TimeZoneResolver,
}

impl TimeNormalizer {
    pub fn new(zones: TimeZoneResolver) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &TimeZoneResolver {
        &self.zones
    }

    /// Converts a combined remote timestamp into venue-local time.
    ///
    /// Returns `None` when no known layout matches.
    pub fn utc_to_local(&self, raw: &str, timezone: &str) -> Option<LocalStamp> {
        let instant = parse_remote_datetime(raw)?;
        Some(self.stamp(instant, timezone))
    }

    /// Converts a split UTC date and `HH:MM` / `HH:MM:SS` time into
    /// venue-local time.
    pub fn utc_date_time_to_local(
        &self,
        date: &str,
        time: &str,
        timezone: &str,
    ) -> Option<LocalStamp> {
        if date.is_empty() || time.is_empty() {
            return None;
        }
        let time = if time.len() == 5 {
            format!("{}:00", time)
        } else {
            time.to_string()
        };
        let naive =
            NaiveDateTime::parse_from_str(&format!("{}T{}", date, time), "%Y-%m-%dT%H:%M:%S")
                .ok()?;
        Some(self.stamp(Utc.from_utc_datetime(&naive), timezone))
    }

    /// Converts a local `YYYY-MM-DD` date and `HH:MM` time to the canonical
    /// UTC instant, using the zone rules valid on that date.
    pub fn local_to_utc(&self, date: &str, time: &str, timezone: &str) -> Result<String, EngineError> {
        let naive = NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M")
            .map_err(|_| {
                EngineError::parse(format!(
                    "invalid local time {:?} (expected YYYY-MM-DD HH:MM)",
                    format!("{} {}", date, time)
                ))
            })?;
        let instant = local_instant(self.zones.resolve(timezone), naive);
        Ok(canonical(instant))
    }

    /// The UTC instant of a local date at `minutes` past midnight.
    pub fn local_minutes_to_utc(
        &self,
        date: NaiveDate,
        minutes: u32,
        timezone: &str,
    ) -> DateTime<Utc> {
        let naive = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(minutes));
        local_instant(self.zones.resolve(timezone), naive)
    }

    /// UTC instants of local 00:00:00 and 23:59:59 on `date`.
    pub fn local_day_bounds(&self, date: NaiveDate, timezone: &str) -> (DateTime<Utc>, DateTime<Utc>) {
        let zone = self.zones.resolve(timezone);
        let start = local_instant(zone, date.and_time(NaiveTime::MIN));
        let end = local_instant(
            zone,
            date.and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
        );
        (start, end)
    }

    /// The venue-local calendar date at `now`.
    pub fn local_today(&self, now: DateTime<Utc>, timezone: &str) -> NaiveDate {
        now.with_timezone(&self.zones.resolve(timezone)).date_naive()
    }

    fn stamp(&self, instant: DateTime<Utc>, timezone: &str) -> LocalStamp {
        let local = instant.with_timezone(&self.zones.resolve(timezone));
        LocalStamp {
            date: local.format(DATE_FORMAT).to_string(),
            time: local.format(CLOCK_FORMAT).to_string(),
            start_utc: canonical(instant),
        }
    }
}

/// Resolves a local wall-clock time to an instant.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times in a
/// spring-forward gap are read with the offset in force before the gap.
fn local_instant(zone: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Formats an instant in canonical form, dropping sub-second precision.
pub fn canonical(instant: DateTime<Utc>) -> String {
    instant.format(CANONICAL_UTC_FORMAT).to_string()
}

/// Parses a remote timestamp: RFC 3339 with any offset, or a naive
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` read as UTC.
pub fn parse_remote_datetime(input: &str) -> Option<DateTime<Utc>> {
    if input.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Re-renders a remote timestamp in canonical UTC form.
pub fn canonical_utc(input: &str) -> Option<String> {
    parse_remote_datetime(input).map(canonical)
}

/// First ten characters of a raw timestamp, for display only.
pub fn date_label(raw: &str) -> String {
    raw.chars().take(10).collect()
}

/// `HH:MM` prefix of a raw clock value, for display only.
pub fn time_label(raw: &str) -> String {
    raw.chars().take(5).collect()
}

/// Characters 11..16 of a raw timestamp (`HH:MM` of `YYYY-MM-DDTHH:MM...`).
pub fn clock_label(raw: &str) -> String {
    if raw.chars().count() >= 16 {
        raw.chars().skip(11).take(5).collect()
    } else {
        String::new()
    }
}

/// Parses a strict `HH:MM` clock into minutes since midnight.
pub fn parse_clock(input: &str) -> Result<u32, EngineError> {
    NaiveTime::parse_from_str(input, CLOCK_FORMAT)
        .map(minutes_of)
        .map_err(|_| EngineError::parse(format!("invalid time {:?} (expected HH:MM)", input)))
}

/// Minutes since midnight of an `HH:MM` or `HH:MM:SS` slot time.
pub fn slot_minutes(input: &str) -> Option<u32> {
    let layout = if input.matches(':').count() == 2 {
        "%H:%M:%S"
    } else {
        CLOCK_FORMAT
    };
    NaiveTime::parse_from_str(input, layout).ok().map(minutes_of)
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses `HH:MM-HH:MM` into an inclusive window; the end must be after the start.
pub fn parse_time_range(input: &str) -> Result<TimeWindow, EngineError> {
    let parts: Vec<&str> = input.split('-').collect();
    if parts.len() != 2 {
        return Err(EngineError::parse(format!(
            "invalid time range {:?} (expected HH:MM-HH:MM)",
            input
        )));
    }
    let start = parse_clock(parts[0].trim())?;
    let end = parse_clock(parts[1].trim())?;
    if end <= start {
        return Err(EngineError::parse("time range end must be after start"));
    }
    Ok(TimeWindow { start, end })
}

/// Parses `today`, `tomorrow` or `YYYY-MM-DD` relative to `today`.
pub fn parse_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, EngineError> {
    if input.is_empty() {
        return Err(EngineError::parse("date is required"));
    }
    match input.to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| EngineError::parse("date out of range")),
        _ => NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
            EngineError::parse(format!("invalid date {:?} (expected YYYY-MM-DD)", input))
        }),
    }
}

/// The coming Saturday and the Sunday after it. On a Saturday that is
/// today and tomorrow; on a Sunday it is the following weekend.
pub fn next_weekend_dates(today: NaiveDate) -> [NaiveDate; 2] {
    let weekday = i64::from(today.weekday().number_from_monday());
    let days_until_saturday = (6 - weekday + 7) % 7;
    let saturday = today + Duration::days(days_until_saturday);
    [saturday, saturday + Duration::days(1)]
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
