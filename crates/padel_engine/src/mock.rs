// --- File: crates/padel_engine/src/mock.rs ---
//! In-memory [`CourtService`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use padel_common::BoxFuture;
use padel_playtomic::{
    AvailabilityResource, ConfirmationResponse, CourtService, Match, PaymentIntentRequest,
    PaymentIntentResponse, PaymentIntentUpdateRequest, PaymentMethodEntry, Resource, Tenant,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockServiceError {
    #[error("request failed: 404 Not Found: {0}")]
    NotFound(String),
}

/// Canned remote data plus a log of the calls made against it.
#[derive(Default)]
pub struct MockCourtService {
    pub tenants: HashMap<String, Tenant>,
    /// Venues missing here make `fetch_resources` fail
    pub resources: HashMap<String, Vec<Resource>>,
    pub availability: HashMap<String, Vec<AvailabilityResource>>,
    pub nearby: Vec<Tenant>,
    pub geocoded: Option<(f64, f64)>,
    pub matches: Vec<Match>,
    pub payment_methods: Vec<PaymentMethodEntry>,
    pub confirmation: ConfirmationResponse,
    calls: Mutex<Vec<String>>,
    intents: Mutex<Vec<PaymentIntentRequest>>,
    selected_methods: Mutex<Vec<String>>,
}

impl MockCourtService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenants.insert(tenant.tenant_id.clone(), tenant);
        self
    }

    pub fn with_availability(mut self, venue_id: &str, bundles: Vec<AvailabilityResource>) -> Self {
        self.availability.insert(venue_id.to_string(), bundles);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn intents(&self) -> Vec<PaymentIntentRequest> {
        self.intents.lock().unwrap().clone()
    }

    pub fn selected_methods(&self) -> Vec<String> {
        self.selected_methods.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CourtService for MockCourtService {
    type Error = MockServiceError;

    fn fetch_venue(&self, venue_id: &str) -> BoxFuture<'_, Tenant, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            self.record(format!("venue {}", venue_id));
            self.tenants
                .get(&venue_id)
                .cloned()
                .ok_or(MockServiceError::NotFound(venue_id))
        })
    }

    fn fetch_resources(&self, venue_id: &str) -> BoxFuture<'_, Vec<Resource>, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            self.record(format!("resources {}", venue_id));
            self.resources
                .get(&venue_id)
                .cloned()
                .ok_or(MockServiceError::NotFound(venue_id))
        })
    }

    fn fetch_availability(
        &self,
        venue_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<AvailabilityResource>, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            self.record(format!(
                "availability {} {} {}",
                venue_id,
                start.to_rfc3339(),
                end.to_rfc3339()
            ));
            Ok(self.availability.get(&venue_id).cloned().unwrap_or_default())
        })
    }

    fn fetch_venues(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
    ) -> BoxFuture<'_, Vec<Tenant>, Self::Error> {
        Box::pin(async move {
            self.record(format!("venues {} {} {}", lat, lon, radius));
            Ok(self.nearby.clone())
        })
    }

    fn geocode(&self, query: &str) -> BoxFuture<'_, (f64, f64), Self::Error> {
        let query = query.to_string();
        Box::pin(async move {
            self.record(format!("geocode {}", query));
            self.geocoded.ok_or(MockServiceError::NotFound(query))
        })
    }

    fn fetch_remote_bookings(
        &self,
        page_size: u32,
        sort: &str,
        owner_id: &str,
    ) -> BoxFuture<'_, Vec<Match>, Self::Error> {
        let call = format!("matches {} {} {}", page_size, sort, owner_id);
        Box::pin(async move {
            self.record(call);
            Ok(self.matches.clone())
        })
    }

    fn create_payment_intent(
        &self,
        payload: PaymentIntentRequest,
    ) -> BoxFuture<'_, PaymentIntentResponse, Self::Error> {
        Box::pin(async move {
            self.record("create intent".to_string());
            self.intents.lock().unwrap().push(payload);
            Ok(PaymentIntentResponse {
                payment_intent_id: "pi-1".to_string(),
                available_payment_methods: self.payment_methods.clone(),
            })
        })
    }

    fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        payload: PaymentIntentUpdateRequest,
    ) -> BoxFuture<'_, (), Self::Error> {
        let call = format!("update intent {}", payment_intent_id);
        Box::pin(async move {
            self.record(call);
            self.selected_methods
                .lock()
                .unwrap()
                .push(payload.selected_payment_method);
            Ok(())
        })
    }

    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, ConfirmationResponse, Self::Error> {
        let call = format!("confirm intent {}", payment_intent_id);
        Box::pin(async move {
            self.record(call);
            Ok(self.confirmation.clone())
        })
    }
}
