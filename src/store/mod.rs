//! Store - Read-only access to the key-value metadata store.
//!
//! The search engine never talks to a concrete backend directly. Anything
//! that can serve point reads and prefix listings implements [`MetaStore`];
//! connection management, timeouts and retries belong to the implementation.
//!
//! ## Example
//!
//! ```ignore
//! use meta_inspect::{InMemoryMetaStore, MetaStore};
//!
//! let store = InMemoryMetaStore::new();
//! store.put("by-dev/meta/some/key", b"value".to_vec())?;
//! let bytes = store.get("by-dev/meta/some/key")?;
//! let all = store.list("by-dev/meta/some/")?;
//! ```

mod in_memory;
mod snapshot;

pub use in_memory::InMemoryMetaStore;
pub use snapshot::{SnapshotError, StoreSnapshot};

/// Error type for store reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No value is stored under the key.
    #[error("key not found: {key}")]
    NotFound { key: String },
    /// The store could not be reached or the read failed.
    #[error("store transport error: {0}")]
    Transport(String),
}

/// One stored entry returned by a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Read access to a key-value metadata store.
///
/// Implementations must be safe for concurrent reads; the engine shares one
/// store between independent queries without coordination.
pub trait MetaStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// List every entry whose key starts with `prefix`. No ordering guarantee.
    fn list(&self, prefix: &str) -> Result<Vec<KeyValue>, StoreError>;
}
