use std::fmt;

use crate::error::SearchError;
use crate::model::{physical_time, Collection};

use super::{Resolution, SegmentSummary};

pub const SEPARATOR: &str = "--------------------------------------------------------";
const BANNER: &str = "================================================================================";

/// Render a search outcome as text. Never fails.
///
/// `summary` is only consulted for a unique resolution; `failure` is the
/// segment listing error, printed after whatever was gathered.
pub fn format_report(
    resolution: &Resolution,
    summary: Option<&SegmentSummary>,
    failure: Option<&SearchError>,
) -> String {
    Report {
        resolution,
        summary,
        failure,
    }
    .to_string()
}

struct Report<'a> {
    resolution: &'a Resolution,
    summary: Option<&'a SegmentSummary>,
    failure: Option<&'a SearchError>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolution {
            Resolution::NotFound(lookup) => writeln!(f, "collection not found, {}", lookup),
            Resolution::Ambiguous(candidates) => {
                writeln!(
                    f,
                    "there are more than one collection with the same name, please use id instead"
                )?;
                for (index, collection) in candidates.iter().enumerate() {
                    writeln!(f, "{} : {} , state: {}", index, collection.id, collection.state)?;
                }
                Ok(())
            }
            Resolution::Unique(collection) => {
                write_collection(f, collection)?;
                if let Some(summary) = self.summary {
                    write_summary(f, summary)?;
                }
                if let Some(err) = self.failure {
                    writeln!(f, "failed to list segments, {}", err)?;
                }
                Ok(())
            }
        }
    }
}

fn write_collection(f: &mut fmt::Formatter<'_>, collection: &Collection) -> fmt::Result {
    writeln!(f, "{}", BANNER)?;
    writeln!(f, "DBID: {}", collection.db_id)?;
    writeln!(
        f,
        "Collection ID: {}\tCollection Name: {}",
        collection.id,
        collection.name()
    )?;
    match physical_time(collection.create_time) {
        Some(time) => writeln!(
            f,
            "Collection State: {}\tCreate Time: {}",
            collection.state,
            time.format("%Y-%m-%d %H:%M:%S UTC")
        )?,
        None => writeln!(
            f,
            "Collection State: {}\tCreate Time: {} (invalid)",
            collection.state, collection.create_time
        )?,
    }
    if !collection.schema.description.is_empty() {
        writeln!(f, "Description: {}", collection.schema.description)?;
    }

    writeln!(f, "Fields:")?;
    for field in &collection.schema.fields {
        writeln!(
            f,
            "- Field ID: {} \tField Name: {} \tField Type: {}",
            field.field_id, field.name, field.data_type
        )?;
        if field.is_primary_key {
            writeln!(f, "\t- Primary Key, AutoID: {}", collection.schema.auto_id)?;
        }
        if field.data_type.is_vector() {
            if let Some(dim) = field.dim() {
                writeln!(f, "\t- Vector Dim: {}", dim)?;
            }
        }
    }

    writeln!(f, "Consistency Level: {}", collection.consistency_level)?;
    writeln!(f, "Shards Num: {}", collection.shards_num)?;
    for channel in &collection.virtual_channels {
        writeln!(f, "Virtual Channel: {}", channel)?;
    }
    Ok(())
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &SegmentSummary) -> fmt::Result {
    writeln!(f, "{}", SEPARATOR)?;
    for line in &summary.lines {
        writeln!(f, "{}", line)?;
    }
    writeln!(
        f,
        "--- Growing: {}, Sealed: {}, Flushed: {}",
        summary.counts.growing, summary.counts.sealed, summary.counts.flushed
    )?;
    writeln!(f, "--- Total Row Count: {}", summary.total_rows)
}
