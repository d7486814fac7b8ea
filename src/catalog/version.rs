use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metadata schema version written by the cluster.
///
/// The version decides both where records live and how they are encoded.
/// Negotiating it is the caller's business; the catalog only consumes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[serde(rename = "2.1")]
    V2_1,
    #[default]
    #[serde(rename = "2.2")]
    V2_2,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported schema version: {0}")]
pub struct ParseVersionError(pub String);

impl FromStr for SchemaVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let mut parts = bare.split('.');
        match (parts.next(), parts.next()) {
            (Some("2"), Some("1")) => Ok(SchemaVersion::V2_1),
            (Some("2"), Some("2")) => Ok(SchemaVersion::V2_2),
            _ => Err(ParseVersionError(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V2_1 => f.write_str("2.1"),
            SchemaVersion::V2_2 => f.write_str("2.2"),
        }
    }
}

/// Key layout of the metadata store under a base path.
pub(crate) mod keys {
    use super::SchemaVersion;

    const LEGACY_COLLECTION: &str = "root-coord/collection";
    const COLLECTION_INFO: &str = "root-coord/database/collection-info";
    const SEGMENT: &str = "datacoord-meta/s";

    fn join(base: &str, rest: &str) -> String {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            rest.to_string()
        } else {
            format!("{}/{}", base, rest)
        }
    }

    pub fn collection_prefix(base: &str, version: SchemaVersion) -> String {
        match version {
            SchemaVersion::V2_1 => join(base, &format!("{}/", LEGACY_COLLECTION)),
            SchemaVersion::V2_2 => join(base, &format!("{}/", COLLECTION_INFO)),
        }
    }

    pub fn collection_key(base: &str, version: SchemaVersion, db_id: i64, id: i64) -> String {
        match version {
            SchemaVersion::V2_1 => format!("{}{}", collection_prefix(base, version), id),
            SchemaVersion::V2_2 => {
                format!("{}{}/{}", collection_prefix(base, version), db_id, id)
            }
        }
    }

    pub fn segment_prefix(base: &str) -> String {
        join(base, &format!("{}/", SEGMENT))
    }

    pub fn segment_key(base: &str, collection_id: i64, partition_id: i64, id: i64) -> String {
        format!(
            "{}{}/{}/{}",
            segment_prefix(base),
            collection_id,
            partition_id,
            id
        )
    }
}
