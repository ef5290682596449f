// --- File: crates/padel_playtomic/src/service.rs ---
//! The remote-service seam used by the booking engine.
//!
//! The engine only depends on [`CourtService`], so search, booking and sync
//! can run against a hand-written mock in tests.

use chrono::{DateTime, Utc};
use padel_common::BoxFuture;

use crate::client::PlaytomicClient;
use crate::error::PlaytomicError;
use crate::models::{
    AvailabilityResource, ConfirmationResponse, Match, PaymentIntentRequest,
    PaymentIntentResponse, PaymentIntentUpdateRequest, Resource, Tenant,
};

/// Operations the engine needs from the remote booking service.
pub trait CourtService: Send + Sync {
    /// Error type returned by the service.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Venue metadata, including the embedded time zone and resources.
    fn fetch_venue(&self, venue_id: &str) -> BoxFuture<'_, Tenant, Self::Error>;

    fn fetch_resources(&self, venue_id: &str) -> BoxFuture<'_, Vec<Resource>, Self::Error>;

    /// Availability bundles for slots starting between two UTC instants.
    fn fetch_availability(
        &self,
        venue_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<AvailabilityResource>, Self::Error>;

    /// Venues within `radius` metres of a point.
    fn fetch_venues(&self, lat: f64, lon: f64, radius: u32)
        -> BoxFuture<'_, Vec<Tenant>, Self::Error>;

    fn geocode(&self, query: &str) -> BoxFuture<'_, (f64, f64), Self::Error>;

    /// One page of the owner's matches.
    fn fetch_remote_bookings(
        &self,
        page_size: u32,
        sort: &str,
        owner_id: &str,
    ) -> BoxFuture<'_, Vec<Match>, Self::Error>;

    fn create_payment_intent(
        &self,
        payload: PaymentIntentRequest,
    ) -> BoxFuture<'_, PaymentIntentResponse, Self::Error>;

    fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        payload: PaymentIntentUpdateRequest,
    ) -> BoxFuture<'_, (), Self::Error>;

    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, ConfirmationResponse, Self::Error>;
}

impl CourtService for PlaytomicClient {
    type Error = PlaytomicError;

    fn fetch_venue(&self, venue_id: &str) -> BoxFuture<'_, Tenant, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move { self.get_tenant(&venue_id).await })
    }

    fn fetch_resources(&self, venue_id: &str) -> BoxFuture<'_, Vec<Resource>, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move { self.get_resources(&venue_id).await })
    }

    fn fetch_availability(
        &self,
        venue_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<AvailabilityResource>, Self::Error> {
        let venue_id = venue_id.to_string();
        Box::pin(async move { self.get_availability(&venue_id, start, end).await })
    }

    fn fetch_venues(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
    ) -> BoxFuture<'_, Vec<Tenant>, Self::Error> {
        Box::pin(async move { self.get_tenants(lat, lon, radius).await })
    }

    fn geocode(&self, query: &str) -> BoxFuture<'_, (f64, f64), Self::Error> {
        let query = query.to_string();
        Box::pin(async move { PlaytomicClient::geocode(self, &query).await })
    }

    fn fetch_remote_bookings(
        &self,
        page_size: u32,
        sort: &str,
        owner_id: &str,
    ) -> BoxFuture<'_, Vec<Match>, Self::Error> {
        let sort = sort.to_string();
        let owner_id = owner_id.to_string();
        Box::pin(async move { self.get_matches(page_size, &sort, &owner_id).await })
    }

    fn create_payment_intent(
        &self,
        payload: PaymentIntentRequest,
    ) -> BoxFuture<'_, PaymentIntentResponse, Self::Error> {
        Box::pin(async move { PlaytomicClient::create_payment_intent(self, &payload).await })
    }

    fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        payload: PaymentIntentUpdateRequest,
    ) -> BoxFuture<'_, (), Self::Error> {
        let payment_intent_id = payment_intent_id.to_string();
        Box::pin(async move {
            PlaytomicClient::update_payment_intent(self, &payment_intent_id, &payload).await
        })
    }

    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, ConfirmationResponse, Self::Error> {
        let payment_intent_id = payment_intent_id.to_string();
        Box::pin(async move {
            PlaytomicClient::confirm_payment_intent(self, &payment_intent_id).await
        })
    }
}
