use tracing::{debug, warn};

use crate::catalog::{Catalog, SegmentListing};
use crate::store::MetaStore;

/// Live segments of one collection, sorted by id, with the first listing
/// error if the store could not be read or a record did not decode.
pub type Collected = SegmentListing;

/// Gather the live segments owned by `collection_id`.
///
/// Dropped and other non-live segments are left out entirely.
pub fn collect<S: MetaStore + ?Sized>(catalog: &Catalog<'_, S>, collection_id: i64) -> Collected {
    let mut collected = catalog
        .list_segments(&|s| s.collection_id == collection_id && s.state.is_live());
    collected.segments.sort_by_key(|s| s.id);

    match &collected.error {
        Some(err) => warn!(
            collection_id,
            gathered = collected.segments.len(),
            error = %err,
            "segment listing incomplete"
        ),
        None => debug!(
            collection_id,
            segments = collected.segments.len(),
            "collected segments"
        ),
    }
    collected
}
