//! Store fixtures shared by the search scenarios.

#![allow(dead_code)]

use meta_inspect::model::{compose_ts, DataType, FieldSchema};
use meta_inspect::{
    put_collection, put_segment, Collection, CollectionState, InMemoryMetaStore, SchemaVersion,
    Segment, SegmentLevel, SegmentState,
};

pub const BASE: &str = "by-dev/meta";

/// A store seeded for one schema version.
pub struct Fixture {
    pub store: InMemoryMetaStore,
    pub version: SchemaVersion,
}

impl Fixture {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            store: InMemoryMetaStore::new(),
            version,
        }
    }

    pub fn collection(self, collection: Collection) -> Self {
        put_collection(&self.store, BASE, self.version, &collection).unwrap();
        self
    }

    pub fn segment(self, segment: Segment) -> Self {
        put_segment(&self.store, BASE, self.version, &segment).unwrap();
        self
    }

    pub fn search(&self, token: &str) -> String {
        meta_inspect::search(&self.store, BASE, self.version, token)
    }
}

pub fn orders() -> Collection {
    Collection::new(100, "orders")
        .with_create_time(compose_ts(1_700_000_000_000, 0))
        .with_field(FieldSchema::new(100, "order_id", DataType::Int64).primary_key())
        .with_field(FieldSchema::new(101, "embedding", DataType::FloatVector).with_param("dim", "128"))
}

/// `orders` with three live segments (10, 20, 30 rows) and a dropped one (999 rows).
pub fn orders_store(version: SchemaVersion) -> Fixture {
    Fixture::new(version)
        .collection(orders())
        .segment(Segment::new(1001, 100, SegmentState::Growing, 10).with_partition(1))
        .segment(
            Segment::new(1002, 100, SegmentState::Sealed, 20)
                .with_partition(1)
                .with_level(SegmentLevel::L1),
        )
        .segment(
            Segment::new(1003, 100, SegmentState::Flushed, 30)
                .with_partition(2)
                .with_deltalog(100, &[3, 4]),
        )
        .segment(Segment::new(1004, 100, SegmentState::Dropped, 999).with_partition(2))
}

pub fn duplicate_names(version: SchemaVersion) -> Fixture {
    Fixture::new(version)
        .collection(Collection::new(7, "dup").with_state(CollectionState::Dropped))
        .collection(Collection::new(8, "dup"))
        .segment(Segment::new(70, 7, SegmentState::Flushed, 5))
        .segment(Segment::new(80, 8, SegmentState::Growing, 6))
}
