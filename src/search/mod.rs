//! Search - Resolve a token to a collection and summarise its segments.
//!
//! The pipeline is strictly sequential: resolve, then (only for a unique
//! match) collect live segments, aggregate them and render the report.
//! Every query is independent; nothing is cached between calls.
//!
//! ## Example
//!
//! ```ignore
//! use meta_inspect::{search, SchemaVersion};
//!
//! let text = search(&store, "by-dev/meta", SchemaVersion::V2_2, "orders");
//! println!("{}", text);
//! ```

mod aggregate;
mod collector;
mod lookup;
mod report;
mod resolver;

pub use aggregate::{aggregate, SegmentLine, SegmentSummary, StateCounts};
pub use collector::{collect, Collected};
pub use lookup::Lookup;
pub use report::{format_report, SEPARATOR};
pub use resolver::{resolve, Resolution};

use tracing::debug;

use crate::catalog::{Catalog, SchemaVersion};
use crate::error::SearchError;
use crate::store::MetaStore;

/// Runs search queries against one store location.
pub struct Searcher<'a, S: ?Sized> {
    catalog: Catalog<'a, S>,
}

impl<'a, S: MetaStore + ?Sized> Searcher<'a, S> {
    pub fn new(store: &'a S, base_path: &str, version: SchemaVersion) -> Self {
        Self {
            catalog: Catalog::new(store, base_path, version),
        }
    }

    /// Resolve and, when unique, collect and aggregate.
    ///
    /// Fails only when resolution itself cannot read the store; segment
    /// listing problems are folded into the returned report.
    pub fn run(&self, lookup: &Lookup) -> Result<String, SearchError> {
        let resolution = resolve(&self.catalog, lookup)?;

        let collection_id = match &resolution {
            Resolution::Unique(collection) => collection.id,
            _ => return Ok(format_report(&resolution, None, None)),
        };

        let collected = collect(&self.catalog, collection_id);
        let summary = if collected.is_complete() || !collected.segments.is_empty() {
            Some(aggregate(&collected.segments))
        } else {
            None
        };
        Ok(format_report(
            &resolution,
            summary.as_ref(),
            collected.error.as_ref(),
        ))
    }

    /// Run a lookup and render any fatal error as the report text.
    pub fn search_lookup(&self, lookup: &Lookup) -> String {
        match self.run(lookup) {
            Ok(text) => text,
            Err(err) => {
                debug!(lookup = %lookup, error = %err, "search failed");
                format!("{}\n", err)
            }
        }
    }

    /// Search for a raw token, treating integers as ids and anything else
    /// as a name.
    pub fn search(&self, token: &str) -> String {
        self.search_lookup(&Lookup::parse(token))
    }
}

/// One-shot search: resolve `token` under `base_path` and return the report.
pub fn search<S: MetaStore + ?Sized>(
    store: &S,
    base_path: &str,
    version: SchemaVersion,
    token: &str,
) -> String {
    Searcher::new(store, base_path, version).search(token)
}
