// --- File: crates/padel_playtomic/src/models.rs ---
//! Wire models for the remote booking service.
//!
//! Every field carries `#[serde(default)]` so that partial payloads decode.
//! The open-ended parts of the payment flow (payment-method lists and
//! confirmation bodies) are decoded into small typed shapes here instead of
//! being passed around as raw JSON maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payment method types offered when creating a payment intent.
pub const ALLOWED_PAYMENT_METHOD_TYPES: [&str; 10] = [
    "OFFER",
    "CASH",
    "MERCHANT_WALLET",
    "DIRECT",
    "SWISH",
    "IDEAL",
    "BANCONTACT",
    "PAYTRAIL",
    "CREDIT_CARD",
    "QUICK_PAY",
];

/// Sport identifier sent with every venue and availability query.
pub const SPORT_ID: &str = "PADEL";

// --- Venues ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tenant {
    pub tenant_id: String,
    pub tenant_name: String,
    pub address: Address,
    pub resources: Vec<Resource>,
}

impl Tenant {
    /// "street, city, country", skipping empty parts.
    pub fn address_line(&self) -> String {
        [&self.address.street, &self.address.city, &self.address.country]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
    #[serde(rename = "postal_code")]
    pub zip: String,
    pub coordinate: Coordinate,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Resource {
    pub resource_id: String,
    pub name: String,
    pub properties: ResourceProperties,
}

impl Resource {
    pub fn is_indoor(&self) -> bool {
        self.properties.resource_type == "indoor"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceProperties {
    /// "indoor" or "outdoor"
    pub resource_type: String,
    /// "single" or "double"
    pub resource_size: String,
    pub resource_feature: String,
}

// --- Availability ---

/// One resource's availability for a single reported day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AvailabilityResource {
    pub resource_id: String,
    pub start_date: String,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Slot {
    pub start_time: String,
    pub duration: i64,
    pub price: String,
}

// --- Matches ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Match {
    pub match_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub resource_id: String,
    pub resource_name: String,
    pub price: String,
    pub created_at: String,
    pub tenant: Tenant,
}

// --- Auth ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthResponse {
    pub access_token: String,
    pub access_token_expiration: String,
    pub refresh_token: String,
    pub refresh_token_expiration: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

// --- Geocoding ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GeocodeHit {
    pub lat: String,
    pub lon: String,
}

// --- Payment intents ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentRequest {
    pub allowed_payment_method_types: Vec<String>,
    pub user_id: String,
    pub cart: PaymentIntentCart,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentCart {
    pub requested_item: PaymentIntentItem,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentItem {
    pub cart_item_type: String,
    pub cart_item_voucher_id: Option<String>,
    pub cart_item_data: PaymentIntentItemData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentItemData {
    pub supports_split_payment: bool,
    pub number_of_players: u32,
    pub tenant_id: String,
    pub resource_id: String,
    /// UTC start, `YYYY-MM-DDTHH:MM:SS` without offset.
    pub start: String,
    pub duration: i64,
    pub match_registrations: Vec<MatchRegistration>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRegistration {
    pub user_id: String,
    pub pay_now: bool,
}

impl PaymentIntentRequest {
    /// Cart for a single court reservation paid up front by `user_id`.
    pub fn customer_match(
        user_id: &str,
        tenant_id: &str,
        resource_id: &str,
        start: DateTime<Utc>,
        duration: i64,
        players: u32,
    ) -> Self {
        Self {
            allowed_payment_method_types: ALLOWED_PAYMENT_METHOD_TYPES
                .iter()
                .map(|method| method.to_string())
                .collect(),
            user_id: user_id.to_string(),
            cart: PaymentIntentCart {
                requested_item: PaymentIntentItem {
                    cart_item_type: "CUSTOMER_MATCH".to_string(),
                    cart_item_voucher_id: None,
                    cart_item_data: PaymentIntentItemData {
                        supports_split_payment: true,
                        number_of_players: players,
                        tenant_id: tenant_id.to_string(),
                        resource_id: resource_id.to_string(),
                        start: start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                        duration,
                        match_registrations: vec![MatchRegistration {
                            user_id: user_id.to_string(),
                            pay_now: true,
                        }],
                    },
                },
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentIntentResponse {
    pub payment_intent_id: String,
    pub available_payment_methods: Vec<PaymentMethodEntry>,
}

/// An entry of `available_payment_methods`. The service sends either a bare
/// code or an object describing the method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PaymentMethodEntry {
    Code(String),
    Described(PaymentMethodDescriptor),
    Other(Value),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodDescriptor {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
}

impl PaymentMethodEntry {
    /// The method code, preferring `type` over `code` for described entries.
    pub fn code(&self) -> Option<&str> {
        match self {
            PaymentMethodEntry::Code(code) if !code.is_empty() => Some(code),
            PaymentMethodEntry::Described(descriptor) => descriptor
                .kind
                .as_deref()
                .or(descriptor.code.as_deref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentUpdateRequest {
    pub selected_payment_method: String,
}

/// Body of a payment-intent confirmation. Only the identifier fields are
/// modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationResponse {
    #[serde(flatten)]
    pub ids: ConfirmationIds,
    #[serde(rename = "match", default, deserialize_with = "lenient_ids")]
    pub match_ref: Option<ConfirmationIds>,
    #[serde(default, deserialize_with = "lenient_ids")]
    pub reservation: Option<ConfirmationIds>,
    #[serde(default, deserialize_with = "lenient_ids")]
    pub booking: Option<ConfirmationIds>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationIds {
    #[serde(default, deserialize_with = "lenient_string")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reservation_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub booking_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
}

impl ConfirmationIds {
    /// First non-empty id in `match_id`, `reservation_id`, `booking_id`, `id` order.
    pub fn first(&self) -> Option<&str> {
        [
            &self.match_id,
            &self.reservation_id,
            &self.booking_id,
            &self.id,
        ]
        .into_iter()
        .find_map(|value| value.as_deref())
    }
}

/// Keeps non-empty strings, maps every other JSON value to `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

fn lenient_ids<'de, D>(deserializer: D) -> Result<Option<ConfirmationIds>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}
