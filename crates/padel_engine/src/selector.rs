// --- File: crates/padel_engine/src/selector.rs ---
//! Picks exactly one slot for a booking request.

use padel_common::NormalizedSlot;
use tracing::debug;

use crate::catalog::SlotCatalog;
use crate::error::EngineError;
use crate::time::slot_minutes;

/// What the user asked to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    /// Local start, minutes since midnight
    pub minutes: u32,
    /// Required duration; zero or negative accepts any
    pub duration: i64,
    /// Court name, matched case-insensitively
    pub court: Option<String>,
}

impl SlotRequest {
    pub fn new(minutes: u32, duration: i64) -> Self {
        Self {
            minutes,
            duration,
            court: None,
        }
    }

    pub fn on_court(mut self, court: Option<&str>) -> Self {
        self.court = court
            .map(str::trim)
            .filter(|court| !court.is_empty())
            .map(str::to_string);
        self
    }
}

/// Selects the slot matching `request` from a single-date catalog.
///
/// Several candidates can match when the remote data names two resources
/// alike; the first by court name wins, in catalog order among equal names.
/// Slots without a parsed UTC instant are never selected.
pub fn select_slot<'c>(
    catalog: &'c SlotCatalog,
    request: &SlotRequest,
) -> Result<&'c NormalizedSlot, EngineError> {
    let wanted_court = request.court.as_deref().map(str::to_lowercase);

    let mut candidates: Vec<&NormalizedSlot> = catalog
        .slots()
        .iter()
        .filter(|slot| slot.is_normalized())
        .filter(|slot| match &wanted_court {
            Some(court) => slot.court.to_lowercase() == *court,
            None => true,
        })
        .filter(|slot| slot_minutes(&slot.time) == Some(request.minutes))
        .filter(|slot| request.duration <= 0 || slot.duration == request.duration)
        .collect();

    debug!(
        "{} candidate slot(s) for {} min, {} min duration",
        candidates.len(),
        request.minutes,
        request.duration
    );

    candidates.sort_by(|a, b| a.court.cmp(&b.court));
    candidates.into_iter().next().ok_or_else(|| {
        EngineError::SlotNotAvailable(match &request.court {
            Some(court) => format!("court {}", court),
            None => "requested time".to_string(),
        })
    })
}
