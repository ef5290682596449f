use padel_engine::catalog::resource_directory;
use padel_engine::time::parse_time_range;
use padel_engine::{select_slot, CatalogQuery, CourtFilter, SlotCatalog, SlotRequest};
use proptest::prelude::*;


#[test]
fn slot_on_the_day_after_spring_forward_uses_summer_time() {
    let normalizer = fixtures::madrid();
    let directory = resource_directory(&[fixtures::resource("r-1", "Court 1", true)]);
    let availability = vec![fixtures::bundle("r-1", "2024-03-31", &["21:00:00"], 90)];

    let catalog = SlotCatalog::build(
        &normalizer,
        &availability,
        &directory,
        &CatalogQuery::for_date("2024-03-31", "Europe/Madrid"),
    );

    assert_eq!(catalog.len(), 1);
    let slot = &catalog.slots()[0];
    assert_eq!(slot.court, "Court 1");
    assert_eq!(slot.date, "2024-03-31");
    assert_eq!(slot.time, "23:00");
    assert_eq!(slot.start_utc, "2024-03-31T21:00:00Z");
    assert_eq!(slot.duration, 90);
    assert!(slot.indoor);
}

#[test]
fn unknown_resources_count_as_indoor_and_use_their_id() {
    let normalizer = fixtures::madrid();
    let availability = vec![fixtures::bundle("r-x", "2024-06-15", &["08:00"], 60)];

    let indoor = SlotCatalog::build(
        &normalizer,
        &availability,
        &resource_directory(&[]),
        &CatalogQuery::for_date("2024-06-15", ""),
    );
    assert_eq!(indoor.slots()[0].court, "r-x");
    assert_eq!(indoor.slots()[0].venue_timezone, "Europe/Madrid");

    let outdoor = SlotCatalog::build(
        &normalizer,
        &availability,
        &resource_directory(&[]),
        &CatalogQuery::for_date("2024-06-15", "").with_filter(CourtFilter::OutdoorOnly),
    );
    assert!(outdoor.is_empty());
}

#[test]
fn unparseable_slots_are_shown_but_never_booked_or_windowed() {
    let normalizer = fixtures::madrid();
    let directory = resource_directory(&[fixtures::resource("r-1", "Court 1", true)]);
    let availability = vec![fixtures::bundle("r-1", "2024-06-15", &["10h30", "08:00:00"], 90)];

    let catalog = SlotCatalog::build(
        &normalizer,
        &availability,
        &directory,
        &CatalogQuery::for_date("2024-06-15", "Europe/Madrid"),
    );
    assert_eq!(catalog.display_times(), vec!["10:00", "10h30"]);
    let raw = catalog
        .slots()
        .iter()
        .find(|slot| slot.time == "10h30")
        .unwrap();
    assert!(!raw.is_normalized());
    assert_eq!(raw.date, "2024-06-15");

    let windowed = SlotCatalog::build(
        &normalizer,
        &availability,
        &directory,
        &CatalogQuery::for_date("2024-06-15", "Europe/Madrid")
            .with_window(Some(parse_time_range("00:00-23:59").unwrap())),
    );
    assert_eq!(windowed.display_times(), vec!["10:00"]);
}

#[test]
fn identically_named_courts_resolve_deterministically() {
    let normalizer = fixtures::madrid();
    let directory = resource_directory(&[
        fixtures::resource("r-b", "Pista 1", true),
        fixtures::resource("r-a", "Pista 1", false),
    ]);
    let availability = vec![
        fixtures::bundle("r-b", "2024-06-15", &["17:00:00"], 90),
        fixtures::bundle("r-a", "2024-06-15", &["17:00:00"], 90),
    ];
    let catalog = SlotCatalog::build(
        &normalizer,
        &availability,
        &directory,
        &CatalogQuery::for_date("2024-06-15", "Europe/Madrid").with_filter(CourtFilter::All),
    );

    let request = SlotRequest::new(19 * 60, 90);
    let first = select_slot(&catalog, &request).unwrap().resource_id.clone();
    for _ in 0..5 {
        assert_eq!(select_slot(&catalog, &request).unwrap().resource_id, first);
    }
}

fn resources_strategy() -> impl Strategy<Value = Vec<(bool, Vec<u32>)>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(0u32..96, 0..6)),
        0..6,
    )
}

proptest! {
    #[test]
    fn all_is_the_disjoint_union_of_indoor_and_outdoor(resources in resources_strategy()) {
        let normalizer = fixtures::madrid();
        let mut metadata = Vec::new();
        let mut availability = Vec::new();
        for (index, (indoor, quarters)) in resources.iter().enumerate() {
            let id = format!("r-{}", index);
            metadata.push(fixtures::resource(&id, &format!("Court {}", index), *indoor));
            let times: Vec<String> = quarters
                .iter()
                .map(|quarter| format!("{:02}:{:02}:00", quarter / 4, (quarter % 4) * 15))
                .collect();
            let times: Vec<&str> = times.iter().map(String::as_str).collect();
            availability.push(fixtures::bundle(&id, "2024-06-15", &times, 90));
        }
        let directory = resource_directory(&metadata);
        let build = |filter| {
            SlotCatalog::build(
                &normalizer,
                &availability,
                &directory,
                &CatalogQuery::for_date("2024-06-15", "UTC").with_filter(filter),
            )
            .into_slots()
        };

        let all = build(CourtFilter::All);
        let indoor = build(CourtFilter::IndoorOnly);
        let outdoor = build(CourtFilter::OutdoorOnly);

        prop_assert!(indoor.iter().all(|slot| slot.indoor));
        prop_assert!(outdoor.iter().all(|slot| !slot.indoor));
        prop_assert_eq!(all.len(), indoor.len() + outdoor.len());

        let mut union: Vec<_> = indoor.into_iter().chain(outdoor).collect();
        union.sort_by(|a, b| {
            a.court.cmp(&b.court)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.resource_id.cmp(&b.resource_id))
        });
        let mut all_sorted = all;
        all_sorted.sort_by(|a, b| {
            a.court.cmp(&b.court)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.resource_id.cmp(&b.resource_id))
        });
        prop_assert_eq!(union, all_sorted);
    }
}
