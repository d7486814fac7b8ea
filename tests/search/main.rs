//! End-to-end search scenarios over an in-memory store.

mod fixtures;

use fixtures::{duplicate_names, orders, orders_store, Fixture, BASE};
use meta_inspect::search::SEPARATOR;
use meta_inspect::{
    catalog, collect, resolve, CatalogExt, Collection, Lookup, Resolution, SchemaVersion, Segment,
    SegmentState, StoreSnapshot,
};

const VERSIONS: [SchemaVersion; 2] = [SchemaVersion::V2_1, SchemaVersion::V2_2];

#[test]
fn id_search_summarises_live_segments() {
    for version in VERSIONS {
        let text = orders_store(version).search("100");

        assert!(text.contains("Collection ID: 100\tCollection Name: orders"));
        assert!(text.contains("Create Time: 2023-11-14 22:13:20 UTC"));
        assert!(text.contains(SEPARATOR));
        assert!(text.contains("--- Growing: 1, Sealed: 1, Flushed: 1\n"));
        assert!(text.contains("--- Total Row Count: 60\n"));
        assert!(!text.contains("999"));
        assert!(!text.contains("1004"));
    }
}

#[test]
fn segment_lines_are_sorted_and_carry_deleted_rows() {
    let text = orders_store(SchemaVersion::V2_2).search("orders");
    let lines: Vec<_> = text.lines().filter(|l| l.starts_with("SegmentID")).collect();

    assert_eq!(
        lines,
        vec![
            "SegmentID: 1001 State: Growing, Level: Legacy, Row Count: 10, Deleted Row: 0",
            "SegmentID: 1002 State: Sealed, Level: L1, Row Count: 20, Deleted Row: 0",
            "SegmentID: 1003 State: Flushed, Level: Legacy, Row Count: 30, Deleted Row: 7",
        ]
    );
}

#[test]
fn legacy_segments_report_legacy_level() {
    let text = orders_store(SchemaVersion::V2_1).search("orders");
    assert!(text.contains("SegmentID: 1001 State: Growing, Level: Legacy"));
}

#[test]
fn name_search_matches_id_search() {
    let fixture = orders_store(SchemaVersion::V2_2);
    assert_eq!(fixture.search("orders"), fixture.search("100"));
}

#[test]
fn duplicate_names_are_listed_without_segment_data() {
    for version in VERSIONS {
        let text = duplicate_names(version).search("dup");

        // 2.1 does not persist collection state, so both read as created.
        let first_state = match version {
            SchemaVersion::V2_1 => "CollectionCreated",
            SchemaVersion::V2_2 => "CollectionDropped",
        };
        assert_eq!(
            text,
            format!(
                "there are more than one collection with the same name, please use id instead\n\
                 0 : 7 , state: {}\n\
                 1 : 8 , state: CollectionCreated\n",
                first_state
            )
        );
        assert!(!text.contains("SegmentID"));
        assert!(!text.contains(SEPARATOR));
    }
}

#[test]
fn duplicate_names_resolve_by_id() {
    let text = duplicate_names(SchemaVersion::V2_2).search("8");
    assert!(text.contains("SegmentID: 80 State: Growing"));
    assert!(!text.contains("SegmentID: 70"));
}

#[test]
fn unknown_id_is_not_found() {
    let text = orders_store(SchemaVersion::V2_2).search("404");
    assert_eq!(text, "collection not found, id: 404\n");
}

#[test]
fn unknown_name_is_not_found() {
    let text = orders_store(SchemaVersion::V2_2).search("Orders");
    assert_eq!(text, "collection not found, name: Orders\n");
}

#[test]
fn search_is_idempotent() {
    for version in VERSIONS {
        let fixture = orders_store(version)
            .segment(Segment::new(1010, 100, SegmentState::Flushing, 1))
            .segment(Segment::new(1011, 100, SegmentState::Sealed, 2))
            .segment(Segment::new(1012, 100, SegmentState::Growing, 3));

        let first = fixture.search("orders");
        for _ in 0..5 {
            assert_eq!(fixture.search("orders"), first);
        }
    }
}

#[test]
fn total_rows_equal_sum_of_collected_segments() {
    let mut fixture = Fixture::new(SchemaVersion::V2_2).collection(orders());
    let states = [
        SegmentState::Growing,
        SegmentState::Sealed,
        SegmentState::Flushing,
        SegmentState::Flushed,
        SegmentState::Dropped,
        SegmentState::NotExist,
        SegmentState::Importing,
    ];
    for i in 0..35i64 {
        let state = states[(i as usize) % states.len()];
        fixture = fixture.segment(Segment::new(2000 + i, 100, state, i * 11));
    }

    let catalog = fixture.store.catalog(BASE, fixture.version);
    let collected = collect(&catalog, 100);
    assert!(collected.segments.iter().all(|s| s.state.is_live()));
    let expected: i64 = collected.segments.iter().map(|s| s.num_rows).sum();

    let text = fixture.search("100");
    assert!(text.contains(&format!("--- Total Row Count: {}\n", expected)));
    assert_eq!(
        text.lines().filter(|l| l.starts_with("SegmentID")).count(),
        collected.segments.len()
    );
}

#[test]
fn segments_of_other_collections_are_ignored() {
    let fixture = orders_store(SchemaVersion::V2_2)
        .collection(Collection::new(200, "users"))
        .segment(Segment::new(3000, 200, SegmentState::Flushed, 5000));

    let text = fixture.search("orders");
    assert!(!text.contains("3000"));
    assert!(text.contains("--- Total Row Count: 60\n"));
}

#[test]
fn collection_without_segments_has_empty_summary() {
    let text = Fixture::new(SchemaVersion::V2_2)
        .collection(Collection::new(5, "empty"))
        .search("empty");

    assert!(text.contains(SEPARATOR));
    assert!(text.contains("--- Growing: 0, Sealed: 0, Flushed: 0\n"));
    assert!(text.ends_with("--- Total Row Count: 0\n"));
}

#[test]
fn segment_listing_failure_keeps_collection_block() {
    let fixture = orders_store(SchemaVersion::V2_2);
    fixture
        .store
        .fail_prefix(format!("{}/datacoord-meta/", BASE));

    let text = fixture.search("orders");
    assert!(text.contains("Collection Name: orders"));
    assert!(!text.contains("SegmentID"));
    assert!(text.ends_with(
        "failed to list segments, metadata store unavailable: injected failure reading by-dev/meta/datacoord-meta/\n"
    ));
}

#[test]
fn corrupt_segment_record_degrades_the_report() {
    let fixture = orders_store(SchemaVersion::V2_2);
    let clean = fixture.search("100");
    let broken = Segment::new(1005, 100, SegmentState::Flushed, 1);
    let broken_key = catalog::segment_key(BASE, &broken);
    fixture.store.put(broken_key.clone(), b"{".to_vec()).unwrap();
    let reason = catalog::decode_segment(SchemaVersion::V2_2, b"{")
        .unwrap_err()
        .0;

    // Every intact segment is still summarised; the failure trails the report.
    let text = fixture.search("100");
    assert_eq!(
        text,
        format!(
            "{}failed to list segments, failed to decode record {}: {}\n",
            clean, broken_key, reason
        )
    );
    assert!(!text.contains("999"));
}

/// Six flushed segments of `orders` plus one broken record of another collection.
fn orders_with_foreign_garbage() -> Fixture {
    let mut fixture = Fixture::new(SchemaVersion::V2_2).collection(orders());
    for id in 1..=6 {
        fixture = fixture.segment(Segment::new(id, 100, SegmentState::Flushed, id * 10));
    }
    fixture
        .store
        .put(format!("{}/datacoord-meta/s/200/0/9", BASE), b"{".to_vec())
        .unwrap();
    fixture
}

#[test]
fn broken_record_keeps_report_sections_in_order() {
    let fixture = orders_with_foreign_garbage();
    let reason = catalog::decode_segment(SchemaVersion::V2_2, b"{")
        .unwrap_err()
        .0;

    let text = fixture.search("orders");
    let (head, tail) = text.split_once(&format!("{}\n", SEPARATOR)).unwrap();
    assert!(head.contains("Collection ID: 100\tCollection Name: orders"));
    assert!(!head.contains("SegmentID"));

    let expected = format!(
        "SegmentID: 1 State: Flushed, Level: Legacy, Row Count: 10, Deleted Row: 0\n\
         SegmentID: 2 State: Flushed, Level: Legacy, Row Count: 20, Deleted Row: 0\n\
         SegmentID: 3 State: Flushed, Level: Legacy, Row Count: 30, Deleted Row: 0\n\
         SegmentID: 4 State: Flushed, Level: Legacy, Row Count: 40, Deleted Row: 0\n\
         SegmentID: 5 State: Flushed, Level: Legacy, Row Count: 50, Deleted Row: 0\n\
         SegmentID: 6 State: Flushed, Level: Legacy, Row Count: 60, Deleted Row: 0\n\
         --- Growing: 0, Sealed: 0, Flushed: 6\n\
         --- Total Row Count: 210\n\
         failed to list segments, failed to decode record {}/datacoord-meta/s/200/0/9: {}\n",
        BASE, reason
    );
    assert_eq!(tail, expected);
}

#[test]
fn reloaded_store_with_broken_record_reports_identically() {
    let snapshot = StoreSnapshot::from_store(&orders_with_foreign_garbage().store).unwrap();

    let mut reports = std::collections::BTreeSet::new();
    for _ in 0..30 {
        let store = snapshot.clone().into_store().unwrap();
        reports.insert(meta_inspect::search(
            &store,
            BASE,
            SchemaVersion::V2_2,
            "orders",
        ));
    }
    assert_eq!(reports.len(), 1);
    assert!(reports
        .iter()
        .all(|text| text.contains("--- Growing: 0, Sealed: 0, Flushed: 6\n")));
}

#[test]
fn unreachable_store_surfaces_the_error() {
    let fixture = orders_store(SchemaVersion::V2_2);
    fixture.store.fail_prefix(BASE);

    let text = fixture.search("orders");
    assert!(text.starts_with("metadata store unavailable: "));
    assert!(!text.contains("Collection Name"));
}

#[test]
fn explicit_name_lookup_reaches_numeric_names() {
    let fixture = Fixture::new(SchemaVersion::V2_2)
        .collection(Collection::new(1, "2024"))
        .segment(Segment::new(10, 1, SegmentState::Sealed, 4));
    let catalog = fixture.store.catalog(BASE, fixture.version);

    let by_token = resolve(&catalog, &Lookup::parse("2024")).unwrap();
    assert_eq!(by_token, Resolution::NotFound(Lookup::ById(2024)));

    let by_name = resolve(&catalog, &Lookup::ByName("2024".into())).unwrap();
    assert_eq!(by_name.unique().map(|c| c.id), Some(1));
}
