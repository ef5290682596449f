// --- File: crates/padel_playtomic/src/lib.rs ---
//! Remote collaborator for the padel tools.
//!
//! [`PlaytomicClient`] speaks HTTP to the booking service; [`CourtService`]
//! is the trait the engine is written against.

pub mod client;
pub mod error;
pub mod models;
pub mod service;

pub use client::PlaytomicClient;
pub use error::PlaytomicError;
pub use models::{
    Address, AuthResponse, AvailabilityResource, ConfirmationIds, ConfirmationResponse,
    Coordinate, Match, PaymentIntentRequest, PaymentIntentResponse, PaymentIntentUpdateRequest,
    PaymentMethodEntry, Resource, ResourceProperties, Slot, Tenant,
    ALLOWED_PAYMENT_METHOD_TYPES,
};
pub use service::CourtService;
