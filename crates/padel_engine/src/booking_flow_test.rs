#[cfg(test)]
mod tests {
    use crate::booking_flow::{book_court, BookRequest};
    use crate::error::EngineError;
    use crate::mock::MockCourtService;
    use crate::time::TimeNormalizer;
    use crate::timezone::TimeZoneResolver;
    use chrono::{DateTime, TimeZone, Utc};
    use padel_common::{BookingSource, Venue};
    use padel_db::{BookingFilter, BookingRepository, Credentials, DbClientFactory, DbError};
    use padel_playtomic::{
        Address, AvailabilityResource, Resource, ResourceProperties, Slot, Tenant,
    };
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn resource(id: &str, name: &str, kind: &str) -> Resource {
        Resource {
            resource_id: id.to_string(),
            name: name.to_string(),
            properties: ResourceProperties {
                resource_type: kind.to_string(),
                ..ResourceProperties::default()
            },
        }
    }

    fn bundle(resource_id: &str, start_times: &[&str]) -> AvailabilityResource {
        AvailabilityResource {
            resource_id: resource_id.to_string(),
            start_date: "2024-06-15".to_string(),
            slots: start_times
                .iter()
                .map(|start| Slot {
                    start_time: start.to_string(),
                    duration: 90,
                    price: "36 EUR".to_string(),
                })
                .collect(),
        }
    }

    fn service() -> MockCourtService {
        let tenant = Tenant {
            tenant_id: "t-central".to_string(),
            tenant_name: "Central Padel".to_string(),
            address: Address {
                timezone: "Europe/Madrid".to_string(),
                ..Address::default()
            },
            resources: vec![
                resource("r-2", "Court 2", "outdoor"),
                resource("r-1", "Court 1", "indoor"),
            ],
        };
        MockCourtService::new().with_tenant(tenant).with_availability(
            "t-central",
            vec![
                bundle("r-2", &["17:00:00", "18:30:00"]),
                bundle("r-1", &["17:00:00"]),
            ],
        )
    }

    fn venue() -> Venue {
        Venue {
            id: "t-central".to_string(),
            alias: "central".to_string(),
            name: "Central Padel".to_string(),
            indoor: true,
            timezone: String::new(),
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            access_token: "token".to_string(),
            access_token_expiration: "2030-01-01T00:00:00".to_string(),
            user_id: "u-1".to_string(),
            ..Credentials::default()
        }
    }

    fn request(time: &str, court: Option<&str>) -> BookRequest {
        BookRequest {
            venue: venue(),
            date: "2024-06-15".to_string(),
            time: time.to_string(),
            duration: 90,
            court: court.map(str::to_string),
            players: 0,
            payment_method: None,
        }
    }

    fn normalizer() -> TimeNormalizer {
        TimeNormalizer::new(TimeZoneResolver::new("Europe/Madrid"))
    }

    #[tokio::test]
    async fn books_first_court_by_name_and_records_it() {
        let dir = TempDir::new().unwrap();
        let store = DbClientFactory::new()
            .open_bookings_at(&dir.path().join("bookings.db"))
            .await
            .unwrap();
        let mut service = service();
        service.payment_methods =
            serde_json::from_str(r#"["SWISH", {"type": "CASH"}]"#).unwrap();
        service.confirmation = serde_json::from_str(r#"{"match_id": "m-77"}"#).unwrap();

        let receipt = book_court(
            &service,
            &store,
            &normalizer(),
            &credentials(),
            &request("19:00", None),
            now(),
        )
        .await
        .unwrap();

        assert_eq!(receipt.booking.id, "m-77");
        assert_eq!(receipt.booking.court, "Court 1");
        assert_eq!(receipt.booking.start_utc, "2024-06-15T17:00:00Z");
        assert_eq!(receipt.booking.venue_timezone, "Europe/Madrid");
        assert_eq!(receipt.booking.price, 36.0);
        assert_eq!(receipt.booking.source, BookingSource::CliBooked);
        assert_eq!(receipt.date_label, "Sat 15 Jun");
        assert_eq!(receipt.price_label, "36 EUR");
        assert_eq!(receipt.payment_method.as_deref(), Some("CASH"));

        let intents = service.intents();
        assert_eq!(intents.len(), 1);
        let item = &intents[0].cart.requested_item.cart_item_data;
        assert_eq!(item.resource_id, "r-1");
        assert_eq!(item.start, "2024-06-15T17:00:00");
        assert_eq!(item.number_of_players, 4);
        assert_eq!(service.selected_methods(), vec!["CASH".to_string()]);

        let stored = store.list(&BookingFilter::All).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "m-77");
    }

    #[tokio::test]
    async fn repeated_confirmation_id_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let store = DbClientFactory::new()
            .open_bookings_at(&dir.path().join("bookings.db"))
            .await
            .unwrap();
        let mut service = service();
        service.confirmation = serde_json::from_str(r#"{"booking": {"id": "b-1"}}"#).unwrap();

        let first = book_court(
            &service,
            &store,
            &normalizer(),
            &credentials(),
            &request("19:00", Some("court 2")),
            now(),
        )
        .await
        .unwrap();
        assert_eq!(first.booking.court, "Court 2");
        assert!(service.selected_methods().is_empty());

        let err = book_court(
            &service,
            &store,
            &normalizer(),
            &credentials(),
            &request("19:00", None),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EngineError::Store(DbError::Duplicate(_))));
    }

    #[tokio::test]
    async fn unavailable_slot_stops_before_payment() {
        let dir = TempDir::new().unwrap();
        let store = DbClientFactory::new()
            .open_bookings_at(&dir.path().join("bookings.db"))
            .await
            .unwrap();
        let service = service();

        let err = book_court(
            &service,
            &store,
            &normalizer(),
            &credentials(),
            &request("20:30", Some("Court 1")),
            now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "slot not available for court Court 1");
        assert!(service.intents().is_empty());
        assert!(store.list(&BookingFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmation_without_id_gets_a_local_id() {
        let dir = TempDir::new().unwrap();
        let store = DbClientFactory::new()
            .open_bookings_at(&dir.path().join("bookings.db"))
            .await
            .unwrap();
        let service = service();

        let receipt = book_court(
            &service,
            &store,
            &normalizer(),
            &credentials(),
            &request("20:30", None),
            now(),
        )
        .await
        .unwrap();

        assert!(receipt.booking.id.starts_with("bk_"));
        assert_eq!(receipt.booking.court, "Court 2");
        assert_eq!(receipt.booking.start_utc, "2024-06-15T18:30:00Z");
    }
}
