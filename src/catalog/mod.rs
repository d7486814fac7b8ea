//! Catalog - Typed, version-aware view over a raw [`MetaStore`].
//!
//! The catalog knows where collections and segments live for a given
//! [`SchemaVersion`] and how to decode them. It never writes; the `put_*`
//! helpers exist to seed an [`InMemoryMetaStore`] for tests and dumps.
//!
//! ## Example
//!
//! ```ignore
//! use meta_inspect::{CatalogExt, SchemaVersion};
//!
//! let catalog = store.catalog("by-dev/meta", SchemaVersion::V2_2);
//! let orders = catalog.list_collections(&|c| c.name() == "orders")?;
//! ```

mod codec;
mod version;

pub use codec::{decode_collection, decode_segment, encode_collection, encode_segment, CodecError};
pub use version::{ParseVersionError, SchemaVersion};

use tracing::debug;

use crate::error::SearchError;
use crate::model::{Collection, Segment};
use crate::store::{InMemoryMetaStore, MetaStore, StoreError};

use version::keys;

/// Segments gathered by a listing, plus the first error met, if any.
///
/// A listing with broken records still keeps every record that decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentListing {
    pub segments: Vec<Segment>,
    pub error: Option<SearchError>,
}

impl SegmentListing {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Typed catalog accessor bound to a store, base path and schema version.
pub struct Catalog<'a, S: ?Sized> {
    store: &'a S,
    base_path: String,
    version: SchemaVersion,
}

impl<'a, S: MetaStore + ?Sized> Catalog<'a, S> {
    pub fn new(store: &'a S, base_path: &str, version: SchemaVersion) -> Self {
        Self {
            store,
            base_path: base_path.to_string(),
            version,
        }
    }

    /// Fetch one collection by id. `Ok(None)` when no record exists.
    pub fn get_collection(&self, id: i64) -> Result<Option<Collection>, SearchError> {
        match self.version {
            SchemaVersion::V2_1 => {
                let key = keys::collection_key(&self.base_path, self.version, 0, id);
                match self.store.get(&key) {
                    Ok(bytes) => self.decode_collection(&key, &bytes).map(Some),
                    Err(StoreError::NotFound { .. }) => Ok(None),
                    Err(err) => Err(err.into()),
                }
            }
            SchemaVersion::V2_2 => {
                // The database id is part of the key but unknown here.
                let prefix = keys::collection_prefix(&self.base_path, self.version);
                let suffix = format!("/{}", id);
                let entries = self.store.list(&prefix)?;
                match entries.iter().find(|kv| kv.key.ends_with(&suffix)) {
                    Some(kv) => self.decode_collection(&kv.key, &kv.value).map(Some),
                    None => Ok(None),
                }
            }
        }
    }

    /// List collections matching a predicate, in store order.
    ///
    /// Any undecodable record fails the whole listing.
    pub fn list_collections(
        &self,
        predicate: &dyn Fn(&Collection) -> bool,
    ) -> Result<Vec<Collection>, SearchError> {
        let prefix = keys::collection_prefix(&self.base_path, self.version);
        let entries = self.store.list(&prefix)?;
        debug!(prefix = %prefix, entries = entries.len(), "listed collections");

        let mut results = Vec::new();
        for kv in entries {
            let collection = self.decode_collection(&kv.key, &kv.value)?;
            if predicate(&collection) {
                results.push(collection);
            }
        }
        Ok(results)
    }

    /// List segments matching a predicate, ordered by key.
    ///
    /// Never fails outright: a transport error yields an empty listing with
    /// the error attached. Undecodable records are skipped and the first one
    /// (in key order) is reported, so the outcome does not depend on the
    /// order the store enumerates in.
    pub fn list_segments(&self, predicate: &dyn Fn(&Segment) -> bool) -> SegmentListing {
        let prefix = keys::segment_prefix(&self.base_path);
        let mut entries = match self.store.list(&prefix) {
            Ok(entries) => entries,
            Err(err) => {
                return SegmentListing {
                    segments: Vec::new(),
                    error: Some(err.into()),
                }
            }
        };
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(prefix = %prefix, entries = entries.len(), "listed segments");

        let mut listing = SegmentListing::default();
        for kv in entries {
            match decode_segment(self.version, &kv.value) {
                Ok(segment) => {
                    if predicate(&segment) {
                        listing.segments.push(segment);
                    }
                }
                Err(err) => {
                    if listing.error.is_none() {
                        listing.error = Some(SearchError::Decode {
                            key: kv.key,
                            reason: err.0,
                        });
                    }
                }
            }
        }
        listing
    }

    fn decode_collection(&self, key: &str, bytes: &[u8]) -> Result<Collection, SearchError> {
        decode_collection(self.version, bytes).map_err(|err| SearchError::Decode {
            key: key.to_string(),
            reason: err.0,
        })
    }
}

/// Extension trait for catalog access on any MetaStore.
pub trait CatalogExt: MetaStore {
    fn catalog(&self, base_path: &str, version: SchemaVersion) -> Catalog<'_, Self> {
        Catalog::new(self, base_path, version)
    }
}

impl<S: MetaStore + ?Sized> CatalogExt for S {}

/// Store a collection where a cluster at `version` would keep it.
pub fn put_collection(
    store: &InMemoryMetaStore,
    base_path: &str,
    version: SchemaVersion,
    collection: &Collection,
) -> Result<(), SearchError> {
    let key = keys::collection_key(base_path, version, collection.db_id, collection.id);
    let bytes = encode_collection(version, collection).map_err(|err| SearchError::Decode {
        key: key.clone(),
        reason: err.0,
    })?;
    store.put(key, bytes)?;
    Ok(())
}

/// Store a segment where a cluster at `version` would keep it.
pub fn put_segment(
    store: &InMemoryMetaStore,
    base_path: &str,
    version: SchemaVersion,
    segment: &Segment,
) -> Result<(), SearchError> {
    let key = keys::segment_key(
        base_path,
        segment.collection_id,
        segment.partition_id,
        segment.id,
    );
    let bytes = encode_segment(version, segment).map_err(|err| SearchError::Decode {
        key: key.clone(),
        reason: err.0,
    })?;
    store.put(key, bytes)?;
    Ok(())
}

/// Raw key of a segment record, for tests that need to corrupt one.
pub fn segment_key(base_path: &str, segment: &Segment) -> String {
    keys::segment_key(
        base_path,
        segment.collection_id,
        segment.partition_id,
        segment.id,
    )
}
