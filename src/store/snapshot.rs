//! StoreSnapshot - A JSON dump of a metadata store, values base64-encoded.
//!
//! ```json
//! { "entries": { "by-dev/meta/root-coord/collection/100": "AAEC..." } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{InMemoryMetaStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(with = "entries_serde")]
    pub entries: BTreeMap<String, Vec<u8>>,
}

mod entries_serde {
    use std::collections::BTreeMap;

    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(entries: &BTreeMap<String, Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        entries
            .iter()
            .map(|(key, value)| (key.as_str(), STANDARD.encode(value)))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(key, value)| {
                STANDARD
                    .decode(&value)
                    .map(|bytes| (key, bytes))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

impl StoreSnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path.as_ref())?;
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Capture every entry of a store.
    pub fn from_store(store: &InMemoryMetaStore) -> Result<Self, SnapshotError> {
        let entries = store
            .entries()?
            .into_iter()
            .map(|kv| (kv.key, kv.value))
            .collect();
        Ok(Self { entries })
    }

    pub fn into_store(self) -> Result<InMemoryMetaStore, SnapshotError> {
        let store = InMemoryMetaStore::new();
        for (key, value) in self.entries {
            store.put(key, value)?;
        }
        Ok(store)
    }
}
