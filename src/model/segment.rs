use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a segment: Growing → Sealed → Flushing → Flushed, with
/// Dropped as terminal removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentState {
    NotExist,
    Growing,
    Sealed,
    Flushing,
    Flushed,
    Dropped,
    Importing,
}

impl SegmentState {
    /// Live segments hold queryable data; everything else is ignored by search.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            SegmentState::Growing
                | SegmentState::Sealed
                | SegmentState::Flushing
                | SegmentState::Flushed
        )
    }
}

impl fmt::Display for SegmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Storage level tag. `Legacy` marks segments written before levels existed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentLevel {
    #[default]
    Legacy,
    L0,
    L1,
    L2,
}

impl fmt::Display for SegmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binlog {
    pub entries_num: i64,
    #[serde(default)]
    pub log_path: String,
}

/// Log files attached to one field of a segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinlog {
    pub field_id: i64,
    #[serde(default)]
    pub binlogs: Vec<Binlog>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub collection_id: i64,
    #[serde(default)]
    pub partition_id: i64,
    #[serde(default)]
    pub insert_channel: String,
    pub state: SegmentState,
    #[serde(default)]
    pub level: SegmentLevel,
    pub num_rows: i64,
    #[serde(default)]
    pub deltalogs: Vec<FieldBinlog>,
}

impl Segment {
    pub fn new(id: i64, collection_id: i64, state: SegmentState, num_rows: i64) -> Self {
        Self {
            id,
            collection_id,
            partition_id: 0,
            insert_channel: String::new(),
            state,
            level: SegmentLevel::default(),
            num_rows,
            deltalogs: Vec::new(),
        }
    }

    pub fn with_partition(mut self, partition_id: i64) -> Self {
        self.partition_id = partition_id;
        self
    }

    pub fn with_level(mut self, level: SegmentLevel) -> Self {
        self.level = level;
        self
    }

    /// Attach a delta log for `field_id` made of binlogs with the given entry counts.
    pub fn with_deltalog(mut self, field_id: i64, entries: &[i64]) -> Self {
        self.deltalogs.push(FieldBinlog {
            field_id,
            binlogs: entries
                .iter()
                .map(|&entries_num| Binlog {
                    entries_num,
                    log_path: String::new(),
                })
                .collect(),
        });
        self
    }

    /// Deleted entries recorded in delta logs but not yet compacted away.
    /// Saturates at `i64::MAX`.
    pub fn delta_entries(&self) -> i64 {
        self.deltalogs
            .iter()
            .flat_map(|log| log.binlogs.iter())
            .fold(0i64, |acc, binlog| acc.saturating_add(binlog.entries_num))
    }
}
