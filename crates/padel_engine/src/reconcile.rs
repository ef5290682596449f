// --- File: crates/padel_engine/src/reconcile.rs ---
//! Imports remote matches into the booking store without duplicating them.

use std::collections::HashMap;
use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use padel_common::{Booking, BookingSource, Venue};
use padel_db::BookingRepository;
use padel_playtomic::{CourtService, Match};
use serde::Serialize;
use tracing::{debug, info};

use crate::bookings::parse_price_amount;
use crate::error::EngineError;
use crate::time::{clock_label, date_label, parse_remote_datetime, TimeNormalizer};

/// Sort order requested from the remote account history.
pub const REMOTE_SORT: &str = "start_date,DESC";

/// Counters of one or more sync runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Remote records seen, including those before the cutoff
    pub total: usize,
    pub added: usize,
    /// Records whose id was already stored
    pub skipped: usize,
}

impl AddAssign for SyncReport {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.added += other.added;
        self.skipped += other.skipped;
    }
}

/// Merges remote match records into a booking store.
pub struct SyncReconciler<'a, R> {
    store: &'a R,
    normalizer: &'a TimeNormalizer,
    venues_by_id: HashMap<String, Venue>,
}

impl<'a, R: BookingRepository + Sync> SyncReconciler<'a, R> {
    /// `venues` is the local registry; its zones override remote ones.
    pub fn new(store: &'a R, normalizer: &'a TimeNormalizer, venues: &[Venue]) -> Self {
        Self {
            store,
            normalizer,
            venues_by_id: venues
                .iter()
                .map(|venue| (venue.id.clone(), venue.clone()))
                .collect(),
        }
    }

    /// Inserts every match not yet stored.
    ///
    /// Matches starting strictly before `cutoff` count towards the total but
    /// are neither added nor skipped.
    pub async fn reconcile(
        &self,
        matches: &[Match],
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<SyncReport, EngineError> {
        let mut report = SyncReport::default();

        for remote in matches {
            report.total += 1;
            if let (Some(start), Some(cutoff)) = (parse_remote_datetime(&remote.start_date), cutoff)
            {
                if start < cutoff {
                    debug!("Match {} starts before the cutoff, ignoring", remote.match_id);
                    continue;
                }
            }

            let booking = self.to_booking(remote);
            if self.store.insert_if_absent(&booking).await? {
                report.added += 1;
            } else {
                report.skipped += 1;
            }
        }

        info!(
            "Sync complete: {} added, {} skipped, {} total",
            report.added, report.skipped, report.total
        );
        Ok(report)
    }

    /// Maps a remote match onto a booking record in its venue's zone.
    pub fn to_booking(&self, remote: &Match) -> Booking {
        let saved = self.venues_by_id.get(&remote.tenant.tenant_id);
        let timezone = self.normalizer.zones().venue_zone(
            saved.map(|venue| venue.timezone.as_str()).unwrap_or_default(),
            &remote.tenant.address.timezone,
        );

        let (date, time, start_utc) = match self.normalizer.utc_to_local(&remote.start_date, &timezone)
        {
            Some(stamp) => (stamp.date, stamp.time, stamp.start_utc),
            None => (
                date_label(&remote.start_date),
                clock_label(&remote.start_date),
                String::new(),
            ),
        };

        let venue_alias = saved.map(|venue| venue.alias.clone()).unwrap_or_default();
        let venue_name = if remote.tenant.tenant_name.is_empty() {
            venue_alias.clone()
        } else {
            remote.tenant.tenant_name.clone()
        };

        Booking {
            id: remote.match_id.clone(),
            venue_alias,
            venue_name,
            venue_id: remote.tenant.tenant_id.clone(),
            court: remote.resource_name.clone(),
            date,
            time,
            start_utc,
            venue_timezone: timezone,
            duration: match_duration(&remote.start_date, &remote.end_date),
            price: parse_price_amount(&remote.price),
            booked_at: remote.created_at.clone(),
            source: BookingSource::RemoteSynced,
        }
    }
}

/// Whole minutes between two remote timestamps; zero when either fails to
/// parse or the end precedes the start.
pub fn match_duration(start: &str, end: &str) -> i64 {
    match (parse_remote_datetime(start), parse_remote_datetime(end)) {
        (Some(start), Some(end)) if end >= start => (end - start).num_minutes(),
        _ => 0,
    }
}

/// What to pull from the remote account.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub page_size: u32,
    pub owner_id: String,
    pub cutoff: Option<DateTime<Utc>>,
}

/// Fetches the account's matches and reconciles them into the store.
pub async fn sync_remote_bookings<S, R>(
    service: &S,
    reconciler: &SyncReconciler<'_, R>,
    request: &SyncRequest,
) -> Result<SyncReport, EngineError>
where
    S: CourtService,
    R: BookingRepository + Sync,
{
    let matches = service
        .fetch_remote_bookings(request.page_size, REMOTE_SORT, &request.owner_id)
        .await
        .map_err(EngineError::remote)?;
    debug!("Fetched {} remote matches", matches.len());
    reconciler.reconcile(&matches, request.cutoff).await
}
