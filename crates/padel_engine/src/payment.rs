// --- File: crates/padel_engine/src/payment.rs ---
//! Payment method selection and confirmation parsing for the book flow.

use padel_playtomic::{ConfirmationResponse, PaymentMethodEntry};

use crate::catalog::unique_sorted;
use crate::error::EngineError;

/// Methods tried in order when the user did not ask for one.
pub const PREFERRED_PAYMENT_METHODS: [&str; 10] = [
    "CASH",
    "MERCHANT_WALLET",
    "OFFER",
    "DIRECT",
    "CREDIT_CARD",
    "IDEAL",
    "BANCONTACT",
    "PAYTRAIL",
    "SWISH",
    "QUICK_PAY",
];

/// Distinct method codes offered by a payment intent, sorted.
pub fn extract_payment_methods(entries: &[PaymentMethodEntry]) -> Vec<String> {
    unique_sorted(
        entries
            .iter()
            .filter_map(PaymentMethodEntry::code)
            .filter(|code| !code.is_empty())
            .map(str::to_string),
    )
}

/// Picks the method to select on the intent.
///
/// `Ok(None)` means nothing was offered and the intent is confirmed as is.
pub fn choose_payment_method(
    available: &[String],
    requested: Option<&str>,
) -> Result<Option<String>, EngineError> {
    if let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) {
        return available
            .iter()
            .find(|method| method.eq_ignore_ascii_case(requested))
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                EngineError::NotFound(format!(
                    "payment method {:?} not available. Available: {}",
                    requested,
                    available.join(", ")
                ))
            });
    }

    if available.is_empty() {
        return Ok(None);
    }
    for preferred in PREFERRED_PAYMENT_METHODS {
        if let Some(method) = available
            .iter()
            .find(|method| method.eq_ignore_ascii_case(preferred))
        {
            return Ok(Some(method.clone()));
        }
    }
    if let [only] = available {
        return Ok(Some(only.clone()));
    }
    Err(EngineError::Ambiguous {
        message: format!(
            "multiple payment methods available ({}). Use --payment-method",
            available.join(", ")
        ),
        candidates: available.to_vec(),
    })
}

/// The remote id of a confirmed booking, if the response carries one.
pub fn extract_booking_id(response: &ConfirmationResponse) -> Option<String> {
    std::iter::once(Some(&response.ids))
        .chain([
            response.match_ref.as_ref(),
            response.reservation.as_ref(),
            response.booking.as_ref(),
        ])
        .flatten()
        .find_map(|ids| ids.first())
        .map(str::to_string)
}
