pub mod catalog;
pub mod config;
mod error;
pub mod model;
pub mod search;
pub mod store;

pub use catalog::{put_collection, put_segment, Catalog, CatalogExt, SchemaVersion, SegmentListing};
pub use config::{Config, ConfigError};
pub use error::SearchError;
pub use model::{Collection, CollectionState, Segment, SegmentLevel, SegmentState};
pub use search::{
    aggregate, collect, format_report, resolve, search, Collected, Lookup, Resolution, Searcher,
    SegmentSummary, StateCounts,
};
pub use store::{InMemoryMetaStore, KeyValue, MetaStore, SnapshotError, StoreError, StoreSnapshot};
