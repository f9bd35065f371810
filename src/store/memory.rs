//! In-memory state store.
//!
//! Used when persistence is disabled. Clones share the same map, so a caller
//! can keep a handle and inspect what the dashboard wrote.

use std::path::Path;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use super::{StateStore, StoreError, StoreStats};

/// Shared in-memory key-value store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<IndexMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, String>> {
        // A poisoned map still holds consistent string pairs.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn entries(&self) -> Result<IndexMap<String, String>, StoreError> {
        Ok(self.lock().clone())
    }

    fn clear(&mut self) -> Result<StoreStats, StoreError> {
        let stats = self.stats()?;
        self.lock().clear();
        Ok(stats)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let map = self.lock();
        let total_bytes = map.iter().map(|(k, v)| (k.len() + v.len()) as u64).sum();
        Ok(StoreStats {
            entries: map.len(),
            total_bytes,
        })
    }

    fn location(&self) -> Option<&Path> {
        None
    }
}
