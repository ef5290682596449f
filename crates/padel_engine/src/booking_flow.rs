// --- File: crates/padel_engine/src/booking_flow.rs ---
//! Books a court through the remote payment-intent flow and records it.

use chrono::{DateTime, Utc};
use padel_common::{Booking, BookingSource, Venue};
use padel_db::{BookingRepository, Credentials};
use padel_playtomic::{CourtService, PaymentIntentRequest, PaymentIntentUpdateRequest};
use tracing::{debug, info};

use crate::bookings::{new_booking_id, parse_price_amount, DEFAULT_DURATION};
use crate::catalog::{resource_directory, CatalogQuery, CourtFilter, SlotCatalog};
use crate::error::EngineError;
use crate::payment::{choose_payment_method, extract_booking_id, extract_payment_methods};
use crate::selector::{select_slot, SlotRequest};
use crate::stats::{format_eur, short_date_label};
use crate::time::{canonical, parse_clock, parse_date_input, TimeNormalizer, DATE_FORMAT};

/// Default party size sent with a booking.
pub const DEFAULT_PLAYERS: u32 = 4;

/// Returns the stored credentials when they hold a live access token.
pub fn require_login(
    credentials: Option<Credentials>,
    now: DateTime<Utc>,
) -> Result<Credentials, EngineError> {
    let credentials = credentials
        .filter(Credentials::is_logged_in)
        .ok_or_else(|| EngineError::Auth("not logged in. Run 'padel auth login' first".to_string()))?;
    if credentials.access_token_expired(now) {
        return Err(EngineError::Auth(
            "token expired. Run 'padel auth login' to re-authenticate".to_string(),
        ));
    }
    Ok(credentials)
}

/// What the user asked to book.
#[derive(Debug, Clone)]
pub struct BookRequest {
    pub venue: Venue,
    /// `today`, `tomorrow` or `YYYY-MM-DD`, read in the venue zone
    pub date: String,
    /// `HH:MM`, venue-local
    pub time: String,
    /// Minutes; zero or negative means 90
    pub duration: i64,
    pub court: Option<String>,
    /// Zero means four
    pub players: u32,
    pub payment_method: Option<String>,
}

/// Outcome of a successful booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub venue_name: String,
    /// `Sat 1 Jun`
    pub date_label: String,
    /// The slot's price label, or the parsed amount in euros
    pub price_label: String,
    pub payment_method: Option<String>,
}

/// Runs the booking flow for a logged-in user.
pub async fn book_court<S, R>(
    service: &S,
    store: &R,
    normalizer: &TimeNormalizer,
    credentials: &Credentials,
    request: &BookRequest,
    now: DateTime<Utc>,
) -> Result<BookingReceipt, EngineError>
where
    S: CourtService,
    R: BookingRepository + Sync,
{
    let duration = if request.duration > 0 {
        request.duration
    } else {
        DEFAULT_DURATION
    };
    let players = if request.players > 0 {
        request.players
    } else {
        DEFAULT_PLAYERS
    };
    let minutes = parse_clock(&request.time)?;
    let venue = &request.venue;

    let tenant = service
        .fetch_venue(&venue.id)
        .await
        .map_err(EngineError::remote)?;
    let timezone = normalizer
        .zones()
        .venue_zone(&venue.timezone, &tenant.address.timezone);
    let target = parse_date_input(&request.date, normalizer.local_today(now, &timezone))?;
    let target_label = target.format(DATE_FORMAT).to_string();

    let (day_start, day_end) = normalizer.local_day_bounds(target, &timezone);
    let availability = service
        .fetch_availability(&venue.id, day_start, day_end)
        .await
        .map_err(EngineError::remote)?;
    let catalog = SlotCatalog::build(
        normalizer,
        &availability,
        &resource_directory(&tenant.resources),
        &CatalogQuery::for_date(target_label.clone(), timezone.clone()).with_filter(CourtFilter::All),
    );

    let slot = select_slot(
        &catalog,
        &SlotRequest::new(minutes, duration).on_court(request.court.as_deref()),
    )?
    .clone();
    debug!("Selected {} at {} on {}", slot.court, slot.time, target_label);

    let start = normalizer.local_minutes_to_utc(target, minutes, &timezone);
    let intent = service
        .create_payment_intent(PaymentIntentRequest::customer_match(
            &credentials.user_id,
            &venue.id,
            &slot.resource_id,
            start,
            duration,
            players,
        ))
        .await
        .map_err(EngineError::remote)?;

    let methods = extract_payment_methods(&intent.available_payment_methods);
    let selected = choose_payment_method(&methods, request.payment_method.as_deref())?;
    if let Some(method) = &selected {
        service
            .update_payment_intent(
                &intent.payment_intent_id,
                PaymentIntentUpdateRequest {
                    selected_payment_method: method.clone(),
                },
            )
            .await
            .map_err(EngineError::remote)?;
    }

    let confirmation = service
        .confirm_payment_intent(&intent.payment_intent_id)
        .await
        .map_err(EngineError::remote)?;
    let booking_id = extract_booking_id(&confirmation).unwrap_or_else(|| new_booking_id(now));

    let booking = Booking {
        id: booking_id,
        venue_alias: venue.alias.clone(),
        venue_name: tenant.tenant_name.clone(),
        venue_id: venue.id.clone(),
        court: slot.court.clone(),
        date: target_label,
        time: request.time.clone(),
        start_utc: canonical(start),
        venue_timezone: timezone,
        duration,
        price: parse_price_amount(&slot.price),
        booked_at: canonical(now),
        source: BookingSource::CliBooked,
    };
    store.insert(&booking).await?;
    info!("Booked {} at {} ({})", booking.court, booking.time, booking.id);

    let price_label = if slot.price.is_empty() {
        format_eur(booking.price)
    } else {
        slot.price.clone()
    };
    Ok(BookingReceipt {
        venue_name: tenant.tenant_name,
        date_label: short_date_label(target),
        price_label,
        payment_method: selected,
        booking,
    })
}
