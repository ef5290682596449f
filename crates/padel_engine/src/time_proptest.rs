#[cfg(test)]
mod tests {
    use crate::time::{canonical_utc, parse_remote_datetime, TimeNormalizer};
    use crate::timezone::TimeZoneResolver;
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    const ZONES: [&str; 6] = [
        "Europe/Madrid",
        "Europe/London",
        "America/New_York",
        "Australia/Sydney",
        "Asia/Kolkata",
        "UTC",
    ];

    // 2000-01-01 .. 2035-01-01, minute resolution
    fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
        (946_684_800i64 / 60..2_051_222_400i64 / 60)
            .prop_map(|minutes| Utc.timestamp_opt(minutes * 60, 0).unwrap())
    }

    fn is_unambiguous(zone: Tz, local: NaiveDateTime) -> bool {
        zone.from_local_datetime(&local).single().is_some()
    }

    proptest! {
        #[test]
        fn local_round_trip_returns_the_same_instant(
            instant in instant_strategy(),
            zone_index in 0..ZONES.len(),
        ) {
            let zone_name = ZONES[zone_index];
            let zone: Tz = zone_name.parse().unwrap();
            // the second pass through a fall-back hour maps to the first
            prop_assume!(is_unambiguous(zone, instant.with_timezone(&zone).naive_local()));

            let normalizer = TimeNormalizer::new(TimeZoneResolver::new("Europe/Madrid"));
            let stamp = normalizer
                .utc_to_local(&instant.format("%Y-%m-%dT%H:%M:%SZ").to_string(), zone_name)
                .unwrap();
            let back = normalizer.local_to_utc(&stamp.date, &stamp.time, zone_name).unwrap();

            prop_assert_eq!(back, stamp.start_utc);
        }

        #[test]
        fn round_trip_holds_around_spring_forward(
            offset_minutes in -(3 * 24 * 60)..(3 * 24 * 60i64),
        ) {
            // 2024-03-31T01:00:00Z, the Madrid spring-forward instant
            let instant = Utc.timestamp_opt(1_711_846_800 + offset_minutes * 60, 0).unwrap();
            let normalizer = TimeNormalizer::default();
            let stamp = normalizer
                .utc_to_local(&instant.to_rfc3339(), "Europe/Madrid")
                .unwrap();
            let back = normalizer
                .local_to_utc(&stamp.date, &stamp.time, "Europe/Madrid")
                .unwrap();

            prop_assert_eq!(parse_remote_datetime(&back), Some(instant));
        }

        #[test]
        fn canonical_form_is_idempotent(
            instant in instant_strategy(),
            offset_hours in -11..12i32,
            layout in 0..4usize,
        ) {
            let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let raw = match layout {
                0 => instant.with_timezone(&offset).to_rfc3339(),
                1 => instant.format("%Y-%m-%dT%H:%M:%S").to_string(),
                2 => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
                _ => instant.with_timezone(&offset).format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            };

            let once = canonical_utc(&raw).unwrap();
            let twice = canonical_utc(&once).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(parse_remote_datetime(&once), Some(instant));
        }
    }
}
