//! Output formatting for CLI commands.
//!
//! Every command renders in one of three modes: an aligned table, a compact
//! single-line form, or pretty-printed JSON on stdout.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};
use padel_common::{Booking, Venue};
use padel_engine::search::SlotView;
use padel_engine::{
    format_eur, AvailabilityOutput, BookingReceipt, BookingStats, ClubSummary, SearchResult,
    SyncReport,
};
use serde::Serialize;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Table,
    Compact,
    Json,
}

impl OutputMode {
    /// Maps the global `--json` / `--compact` flags.
    pub fn from_flags(json: bool, compact: bool) -> Result<Self> {
        match (json, compact) {
            (true, true) => bail!("choose either --json or --compact"),
            (true, false) => Ok(OutputMode::Json),
            (false, true) => Ok(OutputMode::Compact),
            (false, false) => Ok(OutputMode::Table),
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }

    fn is_compact(self) -> bool {
        self == OutputMode::Compact
    }
}

/// Print any serializable value as indented JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces. The last column is never
/// padded.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Option<&[&str]>) -> Self {
        let mut table = Table::default();
        if let Some(header) = header {
            table.push(header.iter().map(|cell| cell.to_string()).collect());
        }
        table
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                widths[index] = widths[index].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            for (index, cell) in row.iter().enumerate() {
                out.push_str(cell);
                if index < last {
                    let pad = widths[index] + 2 - cell.chars().count();
                    out.extend(std::iter::repeat(' ').take(pad));
                }
            }
            out.push('\n');
        }
        out
    }
}

fn header(mode: OutputMode, columns: &[&'static str]) -> Option<Vec<&'static str>> {
    (!mode.is_compact()).then(|| columns.to_vec())
}

pub fn print_clubs(clubs: &[ClubSummary], mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(clubs);
    }
    let columns = header(mode, &["ID", "NAME", "ADDRESS"]);
    let mut table = Table::new(columns.as_deref());
    for club in clubs {
        table.push(vec![club.id.clone(), club.name.clone(), club.address.clone()]);
    }
    print!("{}", table.render());
    Ok(())
}

pub fn print_availability(output: &AvailabilityOutput, mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(output);
    }
    print!("{}", render_availability(output, mode.is_compact()));
    Ok(())
}

pub fn render_availability(output: &AvailabilityOutput, compact: bool) -> String {
    let mut out = format!("{} ({})\nDate: {}\n", output.club_name, output.club_id, output.date);
    if output.slots.is_empty() {
        out.push_str("No available slots.\n");
        return out;
    }

    if compact {
        let parts: Vec<String> = times_by_court(&output.slots)
            .into_iter()
            .map(|(court, times)| format!("{}: {}", court, times.join(" ")))
            .collect();
        out.push_str(&parts.join(" | "));
        out.push('\n');
        return out;
    }

    let mut table = Table::new(Some(&["COURT", "TIME", "DURATION", "PRICE"]));
    for slot in &output.slots {
        table.push(vec![
            slot.court.clone(),
            slot.time.clone(),
            format!("{}m", slot.duration),
            slot.price.clone(),
        ]);
    }
    out.push_str(&table.render());
    out
}

pub fn print_search(results: &[SearchResult], mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(results);
    }
    print!("{}", render_search(results, mode.is_compact()));
    Ok(())
}

pub fn render_search(results: &[SearchResult], compact: bool) -> String {
    let several = results.len() > 1;
    let mut out = String::new();
    for result in results {
        if several {
            out.push_str(&result.date);
            out.push('\n');
        }

        if compact {
            out.push_str(&render_compact_search(result));
            out.push('\n');
            if several {
                out.push('\n');
            }
            continue;
        }

        for club in &result.clubs {
            out.push_str(&club.club_name);
            out.push('\n');
            if club.slots.is_empty() {
                out.push_str("  No available slots.\n");
                continue;
            }
            for (court, times) in times_by_court(&club.slots) {
                out.push_str(&format!("  {}: {}\n", court, times.join("  ")));
            }
            out.push('\n');
        }
    }
    out
}

/// One line per date: every time offered anywhere, marked per club.
pub fn render_compact_search(result: &SearchResult) -> String {
    let all_times: BTreeSet<&str> = result
        .clubs
        .iter()
        .flat_map(|club| club.slots.iter().map(|slot| slot.time.as_str()))
        .collect();

    let parts: Vec<String> = result
        .clubs
        .iter()
        .map(|club| {
            if all_times.is_empty() {
                return format!("{}: no slots", club.club_name);
            }
            let offered: BTreeSet<&str> =
                club.slots.iter().map(|slot| slot.time.as_str()).collect();
            let labels: Vec<String> = all_times
                .iter()
                .map(|time| {
                    let mark = if offered.contains(time) { '✓' } else { '✗' };
                    format!("{} {}", time, mark)
                })
                .collect();
            format!("{}: {}", club.club_name, labels.join(" "))
        })
        .collect();
    parts.join(" | ")
}

fn times_by_court(slots: &[SlotView]) -> BTreeMap<&str, Vec<&str>> {
    let mut by_court: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for slot in slots {
        by_court
            .entry(slot.court.as_str())
            .or_default()
            .insert(slot.time.as_str());
    }
    by_court
        .into_iter()
        .map(|(court, times)| (court, times.into_iter().collect()))
        .collect()
}

pub fn print_receipt(receipt: &BookingReceipt, mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(&receipt.booking);
    }
    let booking = &receipt.booking;
    println!(
        "Booked: {} {} {}",
        receipt.venue_name, booking.time, receipt.date_label
    );
    println!(
        "{} | {}min | {}",
        booking.court, booking.duration, receipt.price_label
    );
    println!("Booking ID: {}", booking.id);
    Ok(())
}

pub fn print_venues(venues: &[Venue], mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(venues);
    }
    if venues.is_empty() {
        println!("No venues saved.");
        return Ok(());
    }
    let columns = header(mode, &["ALIAS", "NAME", "INDOOR", "TIMEZONE"]);
    let mut table = Table::new(columns.as_deref());
    for venue in venues {
        table.push(vec![
            venue.alias.clone(),
            venue.name.clone(),
            if venue.indoor { "yes" } else { "no" }.to_string(),
            venue.timezone.clone(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

pub fn print_bookings(bookings: &[Booking], mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(bookings);
    }
    if bookings.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }
    let columns = header(mode, &["DATE", "TIME", "VENUE", "COURT", "PRICE"]);
    let mut table = Table::new(columns.as_deref());
    for booking in bookings {
        table.push(vec![
            booking.date.clone(),
            booking.time.clone(),
            booking.venue_name.clone(),
            booking.court.clone(),
            format_eur(booking.price),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

pub fn print_stats(stats: &BookingStats, mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(stats);
    }
    println!("Total bookings: {}", stats.total_bookings);
    println!("Total spent: {}", format_eur(stats.total_spent));
    println!(
        "Favourite venue: {} ({} bookings)",
        stats.favourite_venue, stats.favourite_venue_count
    );
    println!("Usual time: {}", stats.usual_time);
    println!("Last played: {}", stats.last_played);
    Ok(())
}

/// Sync counters as exposed in JSON output.
#[derive(Debug, Serialize)]
struct SyncSummary {
    synced: usize,
    skipped: usize,
    total_in_account: usize,
}

impl From<&SyncReport> for SyncSummary {
    fn from(report: &SyncReport) -> Self {
        Self {
            synced: report.added,
            skipped: report.skipped,
            total_in_account: report.total,
        }
    }
}

pub fn print_sync_report(report: &SyncReport, mode: OutputMode) -> Result<()> {
    if mode.is_json() {
        return print_json(&SyncSummary::from(report));
    }
    println!(
        "Sync complete. Added {}, skipped {} (total {}).",
        report.added, report.skipped, report.total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_engine::search::ClubSlots;

    fn slot(court: &str, time: &str) -> SlotView {
        SlotView {
            court: court.to_string(),
            time: time.to_string(),
            start_utc: String::new(),
            venue_timezone: "Europe/Madrid".to_string(),
            duration: 90,
            available: true,
            price: "30 EUR".to_string(),
            indoor: true,
            resource_id: String::new(),
        }
    }

    fn club(name: &str, slots: Vec<SlotView>) -> ClubSlots {
        ClubSlots {
            club_id: format!("id-{}", name),
            club_name: name.to_string(),
            slots,
        }
    }

    #[test]
    fn json_and_compact_are_exclusive() {
        assert!(OutputMode::from_flags(true, true).is_err());
        assert_eq!(OutputMode::from_flags(true, false).unwrap(), OutputMode::Json);
        assert_eq!(OutputMode::from_flags(false, true).unwrap(), OutputMode::Compact);
        assert_eq!(OutputMode::from_flags(false, false).unwrap(), OutputMode::Table);
    }

    #[test]
    fn table_pads_all_but_the_last_column() {
        let mut table = Table::new(Some(&["ID", "NAME", "ADDRESS"]));
        table.push(vec!["t-1".into(), "Central Padel".into(), "Calle Mayor 1".into()]);
        assert_eq!(
            table.render(),
            "ID   NAME           ADDRESS\nt-1  Central Padel  Calle Mayor 1\n"
        );
    }

    #[test]
    fn compact_availability_groups_times_per_court() {
        let output = AvailabilityOutput {
            club_id: "t-1".to_string(),
            club_name: "Central".to_string(),
            date: "2024-06-15".to_string(),
            slots: vec![
                slot("Court 2", "19:00"),
                slot("Court 1", "20:30"),
                slot("Court 1", "19:00"),
                slot("Court 1", "19:00"),
            ],
        };
        assert_eq!(
            render_availability(&output, true),
            "Central (t-1)\nDate: 2024-06-15\nCourt 1: 19:00 20:30 | Court 2: 19:00\n"
        );
    }

    #[test]
    fn empty_availability_says_so() {
        let output = AvailabilityOutput {
            club_id: "t-1".to_string(),
            club_name: "Central".to_string(),
            date: "2024-06-15".to_string(),
            slots: Vec::new(),
        };
        assert!(render_availability(&output, false).ends_with("No available slots.\n"));
    }

    #[test]
    fn compact_search_marks_times_per_club() {
        let result = SearchResult {
            date: "2024-06-15".to_string(),
            clubs: vec![
                club("Alpha", vec![slot("Court 1", "10:00")]),
                club("Zeta", vec![slot("Court 1", "09:00"), slot("Court 2", "10:00")]),
            ],
        };
        assert_eq!(
            render_compact_search(&result),
            "Alpha: 09:00 ✗ 10:00 ✓ | Zeta: 09:00 ✓ 10:00 ✓"
        );
    }

    #[test]
    fn compact_search_without_any_slot() {
        let result = SearchResult {
            date: "2024-06-15".to_string(),
            clubs: vec![club("Alpha", Vec::new())],
        };
        assert_eq!(render_compact_search(&result), "Alpha: no slots");
    }

    #[test]
    fn weekend_search_prints_dates_and_clubs() {
        let results = vec![
            SearchResult {
                date: "2024-06-15".to_string(),
                clubs: vec![club("Alpha", vec![slot("Court 1", "18:00"), slot("Court 1", "10:00")])],
            },
            SearchResult {
                date: "2024-06-16".to_string(),
                clubs: vec![club("Alpha", Vec::new())],
            },
        ];
        assert_eq!(
            render_search(&results, false),
            "2024-06-15\nAlpha\n  Court 1: 10:00  18:00\n\n2024-06-16\nAlpha\n  No available slots.\n"
        );
    }

    #[test]
    fn sync_summary_uses_account_keys() {
        let report = SyncReport {
            total: 3,
            added: 2,
            skipped: 1,
        };
        let value = serde_json::to_value(SyncSummary::from(&report)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"synced": 2, "skipped": 1, "total_in_account": 3})
        );
    }
}
