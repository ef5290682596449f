// --- File: crates/padel_engine/src/catalog.rs ---
//! Flattening of remote availability into venue-local bookable slots.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use padel_common::NormalizedSlot;
use padel_playtomic::{AvailabilityResource, Resource};
use tracing::debug;

use crate::time::{slot_minutes, time_label, TimeNormalizer, TimeWindow};

/// Indoor/outdoor selection applied to resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourtFilter {
    #[default]
    IndoorOnly,
    OutdoorOnly,
    All,
}

impl CourtFilter {
    /// Maps the mutually exclusive `--outdoor` / `--all` flags.
    pub fn from_flags(outdoor: bool, all: bool) -> Self {
        if all {
            CourtFilter::All
        } else if outdoor {
            CourtFilter::OutdoorOnly
        } else {
            CourtFilter::IndoorOnly
        }
    }

    pub fn admits(&self, indoor: bool) -> bool {
        match self {
            CourtFilter::IndoorOnly => indoor,
            CourtFilter::OutdoorOnly => !indoor,
            CourtFilter::All => true,
        }
    }
}

/// What the catalog knows about a resource besides its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMeta {
    pub name: String,
    pub indoor: bool,
}

/// Resource id to metadata.
pub fn resource_directory(resources: &[Resource]) -> HashMap<String, ResourceMeta> {
    resources
        .iter()
        .map(|resource| {
            (
                resource.resource_id.clone(),
                ResourceMeta {
                    name: resource.name.clone(),
                    indoor: resource.is_indoor(),
                },
            )
        })
        .collect()
}

/// Parameters of one catalog build.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    /// Local `YYYY-MM-DD`; slots on other local dates are dropped.
    pub target_date: Option<String>,
    /// Venue zone name; normalised before use.
    pub timezone: String,
    pub filter: CourtFilter,
    /// Inclusive local time-of-day window.
    pub window: Option<TimeWindow>,
}

impl CatalogQuery {
    pub fn for_date(target_date: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            target_date: Some(target_date.into()),
            timezone: timezone.into(),
            filter: CourtFilter::default(),
            window: None,
        }
    }

    pub fn with_filter(mut self, filter: CourtFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_window(mut self, window: Option<TimeWindow>) -> Self {
        self.window = window;
        self
    }
}

/// Normalised, filtered and sorted slots of one venue for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotCatalog {
    slots: Vec<NormalizedSlot>,
}

impl SlotCatalog {
    /// Builds the catalog.
    ///
    /// Each slot's local date is re-derived from its UTC date and time; the
    /// resource's `start_date` is only the UTC day marker. A slot whose
    /// timestamp cannot be parsed keeps its raw `HH:MM` label for display
    /// and has an empty `start_utc`; such slots never pass a time window.
    pub fn build(
        normalizer: &TimeNormalizer,
        availability: &[AvailabilityResource],
        directory: &HashMap<String, ResourceMeta>,
        query: &CatalogQuery,
    ) -> Self {
        let timezone = normalizer.zones().normalize(&query.timezone);
        let mut slots = Vec::new();

        for resource in availability {
            let meta = directory.get(&resource.resource_id);
            let court = meta
                .map(|meta| meta.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or(resource.resource_id.as_str())
                .to_string();
            let indoor = meta.map(|meta| meta.indoor).unwrap_or(true);
            if !query.filter.admits(indoor) {
                continue;
            }

            let day_marker = utc_day_marker(&resource.start_date);
            for slot in &resource.slots {
                let stamp = normalizer.utc_date_time_to_local(day_marker, &slot.start_time, &timezone);
                if let (Some(stamp), Some(target)) = (&stamp, &query.target_date) {
                    if &stamp.date != target {
                        continue;
                    }
                }
                if let Some(window) = &query.window {
                    let in_window = stamp
                        .as_ref()
                        .and_then(|stamp| slot_minutes(&stamp.time))
                        .map(|minutes| window.contains(minutes))
                        .unwrap_or(false);
                    if !in_window {
                        continue;
                    }
                }

                let (date, time, start_utc) = match stamp {
                    Some(stamp) => (stamp.date, stamp.time, stamp.start_utc),
                    None => {
                        debug!(
                            "Unparseable slot {:?} on {:?} for {}",
                            slot.start_time, resource.start_date, resource.resource_id
                        );
                        (
                            query.target_date.clone().unwrap_or_default(),
                            time_label(&slot.start_time),
                            String::new(),
                        )
                    }
                };

                slots.push(NormalizedSlot {
                    court: court.clone(),
                    date,
                    time,
                    start_utc,
                    venue_timezone: timezone.clone(),
                    duration: slot.duration,
                    price: slot.price.clone(),
                    indoor,
                    resource_id: resource.resource_id.clone(),
                });
            }
        }

        slots.sort_by(|a, b| a.court.cmp(&b.court).then_with(|| a.time.cmp(&b.time)));
        debug!("Catalog holds {} slots", slots.len());
        Self { slots }
    }

    pub fn slots(&self) -> &[NormalizedSlot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<NormalizedSlot> {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Distinct local times across all courts, sorted.
    pub fn display_times(&self) -> Vec<String> {
        unique_sorted(self.slots.iter().map(|slot| slot.time.clone()))
    }

    /// Distinct local times per court, courts in name order.
    pub fn times_by_court(&self) -> BTreeMap<String, Vec<String>> {
        group_times_by_court(&self.slots)
    }
}

impl From<Vec<NormalizedSlot>> for SlotCatalog {
    fn from(slots: Vec<NormalizedSlot>) -> Self {
        Self { slots }
    }
}

/// Distinct values in ascending order.
pub fn unique_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct local times per court, courts in name order.
pub fn group_times_by_court(slots: &[NormalizedSlot]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for slot in slots {
        grouped
            .entry(slot.court.clone())
            .or_default()
            .insert(slot.time.clone());
    }
    grouped
        .into_iter()
        .map(|(court, times)| (court, times.into_iter().collect()))
        .collect()
}

/// `YYYY-MM-DD` part of a resource `start_date` that may carry a time.
fn utc_day_marker(start_date: &str) -> &str {
    if start_date.contains('T') && start_date.len() >= 10 {
        start_date.get(..10).unwrap_or(start_date)
    } else {
        start_date
    }
}
