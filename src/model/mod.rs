//! Model - Read-only views of the records persisted in the metadata store.
//!
//! Collections are the top-level named containers; segments are the
//! partitions of a collection's data, each with its own lifecycle state.
//! The search engine only ever holds transient copies of these for the
//! duration of one query.

mod collection;
mod segment;

pub use collection::{
    Collection, CollectionSchema, CollectionState, ConsistencyLevel, DataType, FieldSchema,
    KeyValuePair,
};
pub use segment::{Binlog, FieldBinlog, Segment, SegmentLevel, SegmentState};

use chrono::{DateTime, Utc};

/// Number of logical bits in a hybrid timestamp.
pub const LOGICAL_BITS: u32 = 18;

/// Split a hybrid timestamp into its physical wall-clock part.
///
/// Returns `None` when the physical milliseconds are out of chrono's range.
pub fn physical_time(ts: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(ts >> LOGICAL_BITS).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Compose a hybrid timestamp from physical milliseconds and a logical counter.
pub fn compose_ts(physical_millis: u64, logical: u64) -> u64 {
    (physical_millis << LOGICAL_BITS) | (logical & ((1 << LOGICAL_BITS) - 1))
}
