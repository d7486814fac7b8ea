use tracing::debug;

use crate::catalog::Catalog;
use crate::error::SearchError;
use crate::model::Collection;
use crate::store::MetaStore;

use super::Lookup;

/// Outcome of resolving a lookup. `Ambiguous` always holds two or more
/// collections, sorted by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Unique(Collection),
    Ambiguous(Vec<Collection>),
    NotFound(Lookup),
}

impl Resolution {
    fn from_matches(lookup: &Lookup, mut matches: Vec<Collection>) -> Self {
        match matches.len() {
            0 => Resolution::NotFound(lookup.clone()),
            1 => Resolution::Unique(matches.remove(0)),
            _ => {
                matches.sort_by_key(|c| c.id);
                Resolution::Ambiguous(matches)
            }
        }
    }

    pub fn unique(&self) -> Option<&Collection> {
        match self {
            Resolution::Unique(collection) => Some(collection),
            _ => None,
        }
    }
}

/// Resolve a lookup to zero, one or many collections.
///
/// Name matching is exact and case-sensitive. Dropped collections still
/// match, so a recreated name shows up as ambiguous.
pub fn resolve<S: MetaStore + ?Sized>(
    catalog: &Catalog<'_, S>,
    lookup: &Lookup,
) -> Result<Resolution, SearchError> {
    let resolution = match lookup {
        Lookup::ById(id) => match catalog.get_collection(*id)? {
            Some(collection) => Resolution::Unique(collection),
            None => Resolution::NotFound(lookup.clone()),
        },
        Lookup::ByName(name) => {
            let matches = catalog.list_collections(&|c| c.name() == name.as_str())?;
            Resolution::from_matches(lookup, matches)
        }
    };

    let outcome = match &resolution {
        Resolution::Unique(_) => "unique",
        Resolution::Ambiguous(_) => "ambiguous",
        Resolution::NotFound(_) => "not found",
    };
    debug!(lookup = %lookup, outcome, "resolved lookup");
    Ok(resolution)
}
