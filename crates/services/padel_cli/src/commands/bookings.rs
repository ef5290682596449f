//! Local booking history: list, manual entry, removal, stats and remote sync.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::Subcommand;
use padel_db::{BookingFilter, BookingRepository, NowMarker};
use padel_engine::time::{parse_date_input, DATE_FORMAT};
use padel_engine::{
    build_manual_booking, ensure_booking_timezone, sync_remote_bookings, BookingStats,
    ManualBookingInput, SyncReconciler, SyncRequest,
};
use tracing::debug;

use super::non_empty;
use crate::app_state::AppState;
use crate::output::{self, OutputMode};

/// Manage bookings history
#[derive(Subcommand, Debug)]
pub enum BookingsCommand {
    /// List bookings; upcoming ones unless --past or a date range is given
    List {
        /// List past bookings
        #[arg(long)]
        past: bool,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add a booking by hand
    Add {
        /// Saved venue alias
        #[arg(long)]
        venue: String,
        /// Date (YYYY-MM-DD, today or tomorrow)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM), venue-local
        #[arg(long)]
        time: String,
        /// Court name
        #[arg(long)]
        court: String,
        /// Price paid
        #[arg(long)]
        price: f64,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Remove a booking
    Remove {
        /// Booking ID
        id: String,
    },
    /// Show booking stats
    Stats,
    /// Sync bookings from the remote account
    Sync {
        /// Only sync bookings on/after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Number of matches to fetch
        #[arg(long)]
        size: Option<u32>,
    },
}

pub async fn run_bookings(state: &AppState, action: BookingsCommand, mode: OutputMode) -> Result<()> {
    match action {
        BookingsCommand::List { past, from, to } => {
            let filter = list_filter(
                past,
                non_empty(from).as_deref(),
                non_empty(to).as_deref(),
                Local::now().naive_local(),
            )?;
            let store = state.open_bookings().await?;
            let mut bookings = store.list(&filter).await?;
            let venues = state.venue_lookup();
            for booking in &mut bookings {
                ensure_booking_timezone(booking, &venues, &state.normalizer);
            }
            output::print_bookings(&bookings, mode)
        }
        BookingsCommand::Add {
            venue,
            date,
            time,
            court,
            price,
            duration,
        } => {
            let venue = state.venues.find(&venue)?;
            let input = ManualBookingInput {
                date,
                time,
                court,
                price,
                duration: duration.unwrap_or_else(|| i64::from(state.config.search.default_duration)),
            };
            let booking = build_manual_booking(&input, &venue, &state.normalizer, Utc::now())?;
            let store = state.open_bookings().await?;
            store.insert(&booking).await?;

            if mode.is_json() {
                return output::print_json(&booking);
            }
            println!(
                "Added booking {} at {} on {} {}.",
                booking.id, booking.venue_name, booking.date, booking.time
            );
            Ok(())
        }
        BookingsCommand::Remove { id } => {
            let id = id.trim();
            let store = state.open_bookings().await?;
            if !store.remove(id).await? {
                bail!("booking {:?} not found", id);
            }
            println!("Removed booking {}.", id);
            Ok(())
        }
        BookingsCommand::Stats => {
            let store = state.open_bookings().await?;
            let mut bookings = store.list(&BookingFilter::All).await?;
            let venues = state.venue_lookup();
            for booking in &mut bookings {
                ensure_booking_timezone(booking, &venues, &state.normalizer);
            }
            if bookings.is_empty() {
                println!("No bookings found.");
                return Ok(());
            }
            let stats = BookingStats::compute(&bookings, Local::now().naive_local());
            output::print_stats(&stats, mode)
        }
        BookingsCommand::Sync { from, size } => {
            let now = Utc::now();
            let (client, credentials) = state.authenticated_client(now)?;
            let cutoff = non_empty(from)
                .map(|from| parse_date_input(&from, Local::now().date_naive()))
                .transpose()?
                .and_then(utc_midnight);
            let page_size = size
                .filter(|size| *size > 0)
                .unwrap_or(state.config.search.sync_page_size);

            let venues = state.venues.load()?;
            let store = state.open_bookings().await?;
            let reconciler = SyncReconciler::new(&store, &state.normalizer, &venues);
            debug!("Syncing {} remote matches for {}", page_size, credentials.email);
            let report = sync_remote_bookings(
                &client,
                &reconciler,
                &SyncRequest {
                    page_size,
                    owner_id: credentials.user_id.clone(),
                    cutoff,
                },
            )
            .await?;
            output::print_sync_report(&report, mode)
        }
    }
}

/// Selection for `bookings list`. Without a date range the listing splits
/// at the current local date and minute.
fn list_filter(
    past: bool,
    from: Option<&str>,
    to: Option<&str>,
    now: NaiveDateTime,
) -> Result<BookingFilter> {
    let today = now.date();
    let from = from
        .map(|input| parse_date_input(input, today))
        .transpose()?
        .map(|date| date.format(DATE_FORMAT).to_string());
    let to = to
        .map(|input| parse_date_input(input, today))
        .transpose()?
        .map(|date| date.format(DATE_FORMAT).to_string());

    if let (Some(from), Some(to)) = (&from, &to) {
        if from > to {
            bail!("--from must be on or before --to");
        }
    }
    if from.is_none() && to.is_none() {
        let marker = NowMarker::new(
            today.format(DATE_FORMAT).to_string(),
            now.format("%H:%M").to_string(),
        );
        return Ok(if past {
            BookingFilter::Past(marker)
        } else {
            BookingFilter::Upcoming(marker)
        });
    }
    Ok(BookingFilter::range(from, to))
}

fn utc_midnight(date: NaiveDate) -> Option<chrono::DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}
