//! InMemoryMetaStore - HashMap-backed metadata store for tests and offline dumps.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::{KeyValue, MetaStore, StoreError};

/// In-memory metadata store backed by a HashMap.
///
/// Listing order follows the HashMap and is therefore unspecified, like a
/// real store. Clone-friendly via Arc; clones share storage.
#[derive(Clone)]
pub struct InMemoryMetaStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl Default for InMemoryMetaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMetaStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn put(&self, key: impl Into<String>, value: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Transport("lock poisoned".into()))?;
        storage.insert(key.into(), value);
        Ok(())
    }

    /// Remove a key. Returns true if it existed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Transport("lock poisoned".into()))?;
        Ok(storage.remove(key).is_some())
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every read touching `prefix` fail with a transport error.
    pub fn fail_prefix(&self, prefix: impl Into<String>) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(prefix.into());
        }
    }

    /// Undo all injected failures.
    pub fn heal(&self) {
        if let Ok(mut failing) = self.failing.write() {
            failing.clear();
        }
    }

    /// All entries, in unspecified order.
    pub fn entries(&self) -> Result<Vec<KeyValue>, StoreError> {
        self.list("")
    }

    fn check_reachable(&self, key: &str) -> Result<(), StoreError> {
        let failing = self
            .failing
            .read()
            .map_err(|_| StoreError::Transport("lock poisoned".into()))?;
        match failing
            .iter()
            .find(|prefix| key.starts_with(prefix.as_str()) || prefix.starts_with(key))
        {
            Some(prefix) => Err(StoreError::Transport(format!(
                "injected failure reading {}",
                prefix
            ))),
            None => Ok(()),
        }
    }
}

impl MetaStore for InMemoryMetaStore {
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.check_reachable(key)?;
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Transport("lock poisoned".into()))?;

        storage.get(key).cloned().ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    fn list(&self, prefix: &str) -> Result<Vec<KeyValue>, StoreError> {
        self.check_reachable(prefix)?;
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Transport("lock poisoned".into()))?;

        Ok(storage
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
