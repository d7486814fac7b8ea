//! Record codecs per schema version.
//!
//! 2.2 records are JSON documents of the current model. 2.1 records are
//! bitcode-encoded legacy layouts that predate databases, collection state,
//! consistency levels and segment levels; decoding upgrades them with the
//! defaults the cluster itself assumed at the time.

use serde::{Deserialize, Serialize};

use crate::model::{
    Collection, CollectionSchema, CollectionState, ConsistencyLevel, FieldBinlog, Segment,
    SegmentLevel, SegmentState,
};

use super::SchemaVersion;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CodecError(pub String);

#[derive(Serialize, Deserialize)]
struct LegacyCollection {
    id: i64,
    schema: CollectionSchema,
    shards_num: i32,
    virtual_channels: Vec<String>,
    create_time: u64,
}

impl From<LegacyCollection> for Collection {
    fn from(legacy: LegacyCollection) -> Self {
        Collection {
            id: legacy.id,
            db_id: 0,
            state: CollectionState::Created,
            schema: legacy.schema,
            shards_num: legacy.shards_num,
            consistency_level: ConsistencyLevel::Bounded,
            virtual_channels: legacy.virtual_channels,
            create_time: legacy.create_time,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LegacySegment {
    id: i64,
    collection_id: i64,
    partition_id: i64,
    insert_channel: String,
    state: SegmentState,
    num_rows: i64,
    deltalogs: Vec<FieldBinlog>,
}

impl From<LegacySegment> for Segment {
    fn from(legacy: LegacySegment) -> Self {
        Segment {
            id: legacy.id,
            collection_id: legacy.collection_id,
            partition_id: legacy.partition_id,
            insert_channel: legacy.insert_channel,
            state: legacy.state,
            level: SegmentLevel::Legacy,
            num_rows: legacy.num_rows,
            deltalogs: legacy.deltalogs,
        }
    }
}

pub fn decode_collection(version: SchemaVersion, bytes: &[u8]) -> Result<Collection, CodecError> {
    match version {
        SchemaVersion::V2_1 => bitcode::deserialize::<LegacyCollection>(bytes)
            .map(Collection::from)
            .map_err(|e| CodecError(e.to_string())),
        SchemaVersion::V2_2 => serde_json::from_slice(bytes).map_err(|e| CodecError(e.to_string())),
    }
}

pub fn decode_segment(version: SchemaVersion, bytes: &[u8]) -> Result<Segment, CodecError> {
    match version {
        SchemaVersion::V2_1 => bitcode::deserialize::<LegacySegment>(bytes)
            .map(Segment::from)
            .map_err(|e| CodecError(e.to_string())),
        SchemaVersion::V2_2 => serde_json::from_slice(bytes).map_err(|e| CodecError(e.to_string())),
    }
}

/// Encode a collection the way a cluster at `version` stores it.
///
/// Lossy for 2.1: db, state and consistency level are not persisted.
pub fn encode_collection(
    version: SchemaVersion,
    collection: &Collection,
) -> Result<Vec<u8>, CodecError> {
    match version {
        SchemaVersion::V2_1 => {
            let legacy = LegacyCollection {
                id: collection.id,
                schema: collection.schema.clone(),
                shards_num: collection.shards_num,
                virtual_channels: collection.virtual_channels.clone(),
                create_time: collection.create_time,
            };
            bitcode::serialize(&legacy).map_err(|e| CodecError(e.to_string()))
        }
        SchemaVersion::V2_2 => serde_json::to_vec(collection).map_err(|e| CodecError(e.to_string())),
    }
}

/// Encode a segment the way a cluster at `version` stores it.
///
/// Lossy for 2.1: the level is not persisted.
pub fn encode_segment(version: SchemaVersion, segment: &Segment) -> Result<Vec<u8>, CodecError> {
    match version {
        SchemaVersion::V2_1 => {
            let legacy = LegacySegment {
                id: segment.id,
                collection_id: segment.collection_id,
                partition_id: segment.partition_id,
                insert_channel: segment.insert_channel.clone(),
                state: segment.state,
                num_rows: segment.num_rows,
                deltalogs: segment.deltalogs.clone(),
            };
            bitcode::serialize(&legacy).map_err(|e| CodecError(e.to_string()))
        }
        SchemaVersion::V2_2 => serde_json::to_vec(segment).map_err(|e| CodecError(e.to_string())),
    }
}
