// --- File: crates/padel_engine/src/search.rs ---
//! Club listing, single-venue availability and multi-venue search.
//!
//! Venues are always queried one after another with a fixed pause between
//! requests.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use padel_common::{NormalizedSlot, Venue};
use padel_playtomic::{CourtService, Resource, Tenant};
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{resource_directory, CatalogQuery, CourtFilter, SlotCatalog};
use crate::error::EngineError;
use crate::time::{parse_date_input, TimeNormalizer, TimeWindow, DATE_FORMAT};

/// A slot as rendered to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub court: String,
    pub time: String,
    pub start_utc: String,
    pub venue_timezone: String,
    pub duration: i64,
    pub available: bool,
    pub price: String,
    pub indoor: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
}

impl From<NormalizedSlot> for SlotView {
    fn from(slot: NormalizedSlot) -> Self {
        Self {
            court: slot.court,
            time: slot.time,
            start_utc: slot.start_utc,
            venue_timezone: slot.venue_timezone,
            duration: slot.duration,
            available: true,
            price: slot.price,
            indoor: slot.indoor,
            resource_id: slot.resource_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityOutput {
    pub club_id: String,
    pub club_name: String,
    pub date: String,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSlots {
    pub club_id: String,
    pub club_name: String,
    pub slots: Vec<SlotView>,
}

/// Search results for one local date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub date: String,
    pub clubs: Vec<ClubSlots>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Which venues a search covers.
#[derive(Debug, Clone)]
pub enum VenueSelection {
    /// A single remote club id
    ClubId(String),
    /// Saved venues, already resolved from their aliases
    Saved(Vec<Venue>),
    /// Clubs around a place name or a literal `lat,lon`
    Near { location: String, radius: u32 },
}

/// One single-venue availability query.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub club_id: String,
    /// Zone saved for the venue; empty uses the remote one
    pub venue_timezone: String,
    /// `today`, `tomorrow` or `YYYY-MM-DD`, read in the venue zone
    pub date: String,
    pub filter: CourtFilter,
    pub now: DateTime<Utc>,
}

/// A multi-venue search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub venues: VenueSelection,
    pub dates: Vec<NaiveDate>,
    pub window: Option<TimeWindow>,
    pub filter: CourtFilter,
}

struct SearchTenant {
    tenant: Tenant,
    timezone: String,
}

/// Parses a literal `lat,lon` pair.
pub fn parse_coordinate(input: &str) -> Option<(f64, f64)> {
    let (lat, lon) = input.split_once(',')?;
    if lon.contains(',') {
        return None;
    }
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

/// Splits a comma-separated alias list, dropping blanks.
pub fn split_aliases(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-only queries against the remote service.
pub struct CourtSearch<'a, S> {
    service: &'a S,
    normalizer: &'a TimeNormalizer,
    delay: Duration,
}

impl<'a, S: CourtService> CourtSearch<'a, S> {
    pub fn new(service: &'a S, normalizer: &'a TimeNormalizer, delay: Duration) -> Self {
        Self {
            service,
            normalizer,
            delay,
        }
    }

    /// A literal coordinate, or the first geocoding hit.
    pub async fn resolve_location(&self, location: &str) -> Result<(f64, f64), EngineError> {
        if let Some(point) = parse_coordinate(location) {
            return Ok(point);
        }
        self.service
            .geocode(location)
            .await
            .map_err(EngineError::remote)
    }

    /// Clubs around a location, sorted by name.
    pub async fn list_clubs(
        &self,
        location: &str,
        radius: u32,
    ) -> Result<Vec<ClubSummary>, EngineError> {
        let mut tenants = self.tenants_near(location, radius).await?;
        tenants.sort_by(|a, b| a.tenant_name.cmp(&b.tenant_name));
        Ok(tenants
            .into_iter()
            .map(|tenant| ClubSummary {
                address: tenant.address_line(),
                id: tenant.tenant_id,
                name: tenant.tenant_name,
            })
            .collect())
    }

    /// Availability of one club on one local date.
    pub async fn availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityOutput, EngineError> {
        let tenant = self
            .service
            .fetch_venue(&query.club_id)
            .await
            .map_err(EngineError::remote)?;
        let resources = self.resources_or_embedded(&tenant).await;

        let timezone = self
            .normalizer
            .zones()
            .venue_zone(&query.venue_timezone, &tenant.address.timezone);
        let today = self.normalizer.local_today(query.now, &timezone);
        let target = parse_date_input(&query.date, today)?;

        let catalog = self
            .catalog_for(&query.club_id, &resources, target, &timezone, query.filter, None)
            .await?;

        Ok(AvailabilityOutput {
            club_id: query.club_id.clone(),
            club_name: tenant.tenant_name,
            date: target.format(DATE_FORMAT).to_string(),
            slots: catalog.into_slots().into_iter().map(SlotView::from).collect(),
        })
    }

    /// Searches every selected venue on every date, venues in name order.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, EngineError> {
        let mut tenants = self.resolve_tenants(&query.venues).await?;
        tenants.sort_by(|a, b| a.tenant.tenant_name.cmp(&b.tenant.tenant_name));

        let mut results = Vec::with_capacity(query.dates.len());
        for date in &query.dates {
            let mut clubs = Vec::with_capacity(tenants.len());
            for (index, entry) in tenants.iter().enumerate() {
                let resources = self.resources_or_embedded(&entry.tenant).await;
                let catalog = self
                    .catalog_for(
                        &entry.tenant.tenant_id,
                        &resources,
                        *date,
                        &entry.timezone,
                        query.filter,
                        query.window,
                    )
                    .await?;
                clubs.push(ClubSlots {
                    club_id: entry.tenant.tenant_id.clone(),
                    club_name: entry.tenant.tenant_name.clone(),
                    slots: catalog.into_slots().into_iter().map(SlotView::from).collect(),
                });
                if index + 1 < tenants.len() {
                    self.pause().await;
                }
            }
            results.push(SearchResult {
                date: date.format(DATE_FORMAT).to_string(),
                clubs,
            });
        }
        Ok(results)
    }

    async fn resolve_tenants(
        &self,
        selection: &VenueSelection,
    ) -> Result<Vec<SearchTenant>, EngineError> {
        let zones = self.normalizer.zones();
        match selection {
            VenueSelection::ClubId(club_id) => {
                let tenant = self
                    .service
                    .fetch_venue(club_id)
                    .await
                    .map_err(EngineError::remote)?;
                Ok(vec![SearchTenant {
                    timezone: zones.normalize(&tenant.address.timezone),
                    tenant,
                }])
            }
            VenueSelection::Saved(venues) => {
                let mut tenants = Vec::with_capacity(venues.len());
                for (index, venue) in venues.iter().enumerate() {
                    let tenant = self
                        .service
                        .fetch_venue(&venue.id)
                        .await
                        .map_err(EngineError::remote)?;
                    tenants.push(SearchTenant {
                        timezone: zones.venue_zone(&venue.timezone, &tenant.address.timezone),
                        tenant,
                    });
                    if index + 1 < venues.len() {
                        self.pause().await;
                    }
                }
                Ok(tenants)
            }
            VenueSelection::Near { location, radius } => Ok(self
                .tenants_near(location, *radius)
                .await?
                .into_iter()
                .map(|tenant| SearchTenant {
                    timezone: zones.normalize(&tenant.address.timezone),
                    tenant,
                })
                .collect()),
        }
    }

    async fn tenants_near(&self, location: &str, radius: u32) -> Result<Vec<Tenant>, EngineError> {
        let (lat, lon) = self.resolve_location(location).await?;
        debug!("Searching clubs within {}m of {:.6},{:.6}", radius, lat, lon);
        self.service
            .fetch_venues(lat, lon, radius)
            .await
            .map_err(EngineError::remote)
    }

    /// Fetches the day's availability and normalises it.
    async fn catalog_for(
        &self,
        club_id: &str,
        resources: &[Resource],
        target: NaiveDate,
        timezone: &str,
        filter: CourtFilter,
        window: Option<TimeWindow>,
    ) -> Result<SlotCatalog, EngineError> {
        let (start, end) = self.normalizer.local_day_bounds(target, timezone);
        let availability = self
            .service
            .fetch_availability(club_id, start, end)
            .await
            .map_err(EngineError::remote)?;

        let query = CatalogQuery::for_date(target.format(DATE_FORMAT).to_string(), timezone)
            .with_filter(filter)
            .with_window(window);
        Ok(SlotCatalog::build(
            self.normalizer,
            &availability,
            &resource_directory(resources),
            &query,
        ))
    }

    /// The resource list endpoint carries the indoor flags; the venue's own
    /// list is used when it fails.
    async fn resources_or_embedded(&self, tenant: &Tenant) -> Vec<Resource> {
        match self.service.fetch_resources(&tenant.tenant_id).await {
            Ok(resources) => resources,
            Err(err) => {
                warn!(
                    "Could not fetch resources for {}, using venue data: {}",
                    tenant.tenant_id, err
                );
                tenant.resources.clone()
            }
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
