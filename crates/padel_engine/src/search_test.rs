#[cfg(test)]
mod tests {
    use crate::catalog::CourtFilter;
    use crate::error::EngineError;
    use crate::mock::MockCourtService;
    use crate::search::{AvailabilityQuery, CourtSearch, SearchQuery, VenueSelection};
    use crate::time::{parse_time_range, TimeNormalizer};
    use crate::timezone::TimeZoneResolver;
    use chrono::{NaiveDate, TimeZone, Utc};
    use padel_common::Venue;
    use padel_playtomic::{
        Address, AvailabilityResource, Resource, ResourceProperties, Slot, Tenant,
    };
    use std::time::Duration;

    fn tenant(id: &str, name: &str, timezone: &str, resources: Vec<Resource>) -> Tenant {
        Tenant {
            tenant_id: id.to_string(),
            tenant_name: name.to_string(),
            address: Address {
                street: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                timezone: timezone.to_string(),
                ..Address::default()
            },
            resources,
        }
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

    fn bundle(resource_id: &str, start_date: &str, times: &[&str]) -> AvailabilityResource {
        AvailabilityResource {
            resource_id: resource_id.to_string(),
            start_date: start_date.to_string(),
            slots: times
                .iter()
                .map(|time| Slot {
                    start_time: time.to_string(),
                    duration: 90,
                    price: "30 EUR".to_string(),
                })
                .collect(),
        }
    }

    fn normalizer() -> TimeNormalizer {
        TimeNormalizer::new(TimeZoneResolver::new("Europe/Madrid"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn availability_uses_target_date_offsets() {
        let mut service = MockCourtService::new()
            .with_tenant(tenant("t-1", "Central", "Europe/Madrid", vec![]))
            .with_availability(
                "t-1",
                vec![
                    bundle("r-1", "2024-03-31", &["21:00:00"]),
                    bundle("r-1", "2024-03-30T00:00:00", &["23:30", "22:30:00"]),
                ],
            );
        service
            .resources
            .insert("t-1".to_string(), vec![resource("r-1", "Court 1", "indoor")]);

        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::ZERO);
        let output = search
            .availability(&AvailabilityQuery {
                club_id: "t-1".to_string(),
                venue_timezone: String::new(),
                date: "2024-03-31".to_string(),
                filter: CourtFilter::IndoorOnly,
                now: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(output.club_name, "Central");
        assert_eq!(output.date, "2024-03-31");
        let times: Vec<&str> = output.slots.iter().map(|slot| slot.time.as_str()).collect();
        // 22:30Z on the 30th is still the 30th in Madrid
        assert_eq!(times, vec!["00:30", "23:00"]);
        assert_eq!(output.slots[1].start_utc, "2024-03-31T21:00:00Z");
        assert!(output.slots.iter().all(|slot| slot.court == "Court 1"));

        assert!(service.calls().contains(
            &"availability t-1 2024-03-30T23:00:00+00:00 2024-03-31T21:59:59+00:00".to_string()
        ));
    }

    #[tokio::test]
    async fn availability_falls_back_to_embedded_resources() {
        let service = MockCourtService::new()
            .with_tenant(tenant(
                "t-1",
                "Central",
                "Europe/Madrid",
                vec![resource("r-9", "Outdoor 9", "outdoor")],
            ))
            .with_availability("t-1", vec![bundle("r-9", "2024-06-15", &["08:00:00"])]);

        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::ZERO);
        let query = |filter| AvailabilityQuery {
            club_id: "t-1".to_string(),
            venue_timezone: "Europe/Lisbon".to_string(),
            date: "2024-06-15".to_string(),
            filter,
            now: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };

        let indoor = search.availability(&query(CourtFilter::IndoorOnly)).await.unwrap();
        assert!(indoor.slots.is_empty());

        let outdoor = search.availability(&query(CourtFilter::OutdoorOnly)).await.unwrap();
        assert_eq!(outdoor.slots.len(), 1);
        assert_eq!(outdoor.slots[0].court, "Outdoor 9");
        // saved zone wins over the remote one
        assert_eq!(outdoor.slots[0].venue_timezone, "Europe/Lisbon");
        assert_eq!(outdoor.slots[0].time, "09:00");
    }

    #[tokio::test]
    async fn search_near_location_sorts_clubs_and_applies_window() {
        let mut service = MockCourtService::new()
            .with_availability(
                "t-z",
                vec![bundle("z-1", "2024-06-15", &["07:00:00", "16:00:00"])],
            )
            .with_availability(
                "t-a",
                vec![bundle("a-1", "2024-06-15", &["08:00:00", "17:30:00"])],
            );
        service.geocoded = Some((40.4, -3.7));
        service.nearby = vec![
            tenant("t-z", "Zeta Padel", "Europe/Madrid", vec![]),
            tenant("t-a", "Alpha Padel", "", vec![]),
        ];

        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::ZERO);
        let results = search
            .search(&SearchQuery {
                venues: VenueSelection::Near {
                    location: "Madrid".to_string(),
                    radius: 20_000,
                },
                dates: vec![date(2024, 6, 15), date(2024, 6, 16)],
                window: Some(parse_time_range("09:00-18:00").unwrap()),
                filter: CourtFilter::All,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].date, "2024-06-15");
        let names: Vec<&str> = results[0]
            .clubs
            .iter()
            .map(|club| club.club_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha Padel", "Zeta Padel"]);

        let alpha: Vec<&str> = results[0].clubs[0]
            .slots
            .iter()
            .map(|slot| slot.time.as_str())
            .collect();
        assert_eq!(alpha, vec!["10:00"]);
        let zeta: Vec<&str> = results[0].clubs[1]
            .slots
            .iter()
            .map(|slot| slot.time.as_str())
            .collect();
        assert_eq!(zeta, vec!["09:00", "18:00"]);

        assert!(results[1].clubs.iter().all(|club| club.slots.is_empty()));
        assert!(service.calls().contains(&"geocode Madrid".to_string()));
    }

    #[tokio::test]
    async fn saved_venues_are_fetched_in_order() {
        let service = MockCourtService::new()
            .with_tenant(tenant("t-1", "North", "Europe/Madrid", vec![]))
            .with_tenant(tenant("t-2", "East", "Europe/Madrid", vec![]));
        let venues = vec![
            Venue {
                id: "t-1".to_string(),
                alias: "north".to_string(),
                name: "North".to_string(),
                indoor: true,
                timezone: "Europe/Madrid".to_string(),
            },
            Venue {
                id: "t-2".to_string(),
                alias: "east".to_string(),
                name: "East".to_string(),
                indoor: true,
                timezone: "Europe/Madrid".to_string(),
            },
        ];

        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::from_millis(1));
        let results = search
            .search(&SearchQuery {
                venues: VenueSelection::Saved(venues),
                dates: vec![date(2024, 6, 15)],
                window: None,
                filter: CourtFilter::IndoorOnly,
            })
            .await
            .unwrap();

        let calls = service.calls();
        assert_eq!(calls[0], "venue t-1");
        assert_eq!(calls[1], "venue t-2");
        assert_eq!(results[0].clubs[0].club_name, "East");
    }

    #[tokio::test]
    async fn clubs_accept_literal_coordinates() {
        let mut service = MockCourtService::new();
        service.nearby = vec![tenant("t-1", "Central", "", vec![])];

        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::ZERO);
        let clubs = search.list_clubs("40.41, -3.70", 5_000).await.unwrap();

        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].address, "Calle Mayor 1, Madrid");
        assert_eq!(service.calls(), vec!["venues 40.41 -3.7 5000".to_string()]);
    }

    #[tokio::test]
    async fn unknown_place_is_a_remote_error() {
        let service = MockCourtService::new();
        let normalizer = normalizer();
        let search = CourtSearch::new(&service, &normalizer, Duration::ZERO);

        let err = search.list_clubs("Atlantis", 5_000).await.unwrap_err();
        assert!(matches!(err, EngineError::Remote(_)));
    }
}
