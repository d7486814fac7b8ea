use crate::store::StoreError;

/// Failures that abort a search query (or, during segment collection,
/// annotate a partial report).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The metadata store could not be read.
    #[error("metadata store unavailable: {0}")]
    StoreUnavailable(String),
    /// A stored record does not match the expected schema version.
    #[error("failed to decode record {key}: {reason}")]
    Decode { key: String, reason: String },
}

impl From<StoreError> for SearchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(message) => SearchError::StoreUnavailable(message),
            not_found @ StoreError::NotFound { .. } => {
                SearchError::StoreUnavailable(not_found.to_string())
            }
        }
    }
}
