use std::fmt;

use crate::model::{Segment, SegmentLevel, SegmentState};

/// Segment counts per lifecycle bucket. Flushing and Flushed share a bucket:
/// both are persisted data as far as diagnosis goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub growing: usize,
    pub sealed: usize,
    pub flushed: usize,
}

impl StateCounts {
    pub fn total(&self) -> usize {
        self.growing + self.sealed + self.flushed
    }
}

/// One diagnostic line per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLine {
    pub id: i64,
    pub state: SegmentState,
    pub level: SegmentLevel,
    pub num_rows: i64,
    pub delta_entries: i64,
}

impl fmt::Display for SegmentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SegmentID: {} State: {}, Level: {}, Row Count: {}, Deleted Row: {}",
            self.id, self.state, self.level, self.num_rows, self.delta_entries
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSummary {
    pub counts: StateCounts,
    pub total_rows: i64,
    pub lines: Vec<SegmentLine>,
}

/// Summarise segments by state. Lines keep the input order.
///
/// Non-live segments contribute nothing, so the row total is always the sum
/// over live segments only. The total saturates at `i64::MAX`.
pub fn aggregate(segments: &[Segment]) -> SegmentSummary {
    let mut summary = SegmentSummary::default();

    for segment in segments {
        match segment.state {
            SegmentState::Growing => summary.counts.growing += 1,
            SegmentState::Sealed => summary.counts.sealed += 1,
            SegmentState::Flushing | SegmentState::Flushed => summary.counts.flushed += 1,
            _ => continue,
        }
        summary.total_rows = summary.total_rows.saturating_add(segment.num_rows);
        summary.lines.push(SegmentLine {
            id: segment.id,
            state: segment.state,
            level: segment.level,
            num_rows: segment.num_rows,
            delta_entries: segment.delta_entries(),
        });
    }

    summary
}
