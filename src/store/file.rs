//! Filesystem-backed state store.
//!
//! Stores every key in a single flat JSON object at
//! `~/.config/userdash/state.json` (or a configured directory).

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::{StateStore, StoreError, StoreStats};

/// Filesystem-backed key-value store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store writing `state.json` inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(crate::constants::STATE_FILENAME),
        }
    }

    /// Default state directory under the user's config dir, if one exists.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_all(&self, entries: &IndexMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut current = self.read_all().unwrap_or_default();
        for (key, value) in entries {
            current.insert((*key).to_string(), value.clone());
        }
        self.write_all(&current)
    }

    fn entries(&self) -> Result<IndexMap<String, String>, StoreError> {
        self.read_all()
    }

    fn clear(&mut self) -> Result<StoreStats, StoreError> {
        let stats = self.stats()?;
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        }
        Ok(stats)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let entries = self.read_all()?.len();
        let total_bytes = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        Ok(StoreStats {
            entries,
            total_bytes,
        })
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.entries().unwrap().is_empty());
        assert_eq!(store.get("name").unwrap(), None);
    }

    #[test]
    fn set_all_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store
            .set_all(&[("name", "Ada".into()), ("email", "ada@example.com".into())])
            .unwrap();
        assert_eq!(store.get("name").unwrap().as_deref(), Some("Ada"));
        assert_eq!(store.get("email").unwrap().as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn set_all_overwrites_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set_all(&[("name", "A".into()), ("username", "a".into())]).unwrap();
        store.set_all(&[("name", "B".into())]).unwrap();
        let entries = store.entries().unwrap();
        assert_eq!(entries.get("name").map(String::as_str), Some("B"));
        assert_eq!(entries.get("username").map(String::as_str), Some("a"));
    }

    #[test]
    fn creates_missing_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("state");
        let mut store = FileStore::new(&nested);
        store.set_all(&[("name", "x".into())]).unwrap();
        assert!(nested.join("state.json").exists());
    }

    #[test]
    fn corrupt_file_is_a_parse_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("state.json"), "{ not json").unwrap();
        let store = FileStore::new(dir.path());
        let err = store.entries().unwrap_err();
        assert!(err.to_string().contains("parse"), "got: {err}");
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("state.json"), "{ not json").unwrap();
        let mut store = FileStore::new(dir.path());
        store.set_all(&[("name", "fresh".into())]).unwrap();
        assert_eq!(store.get("name").unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn clear_removes_file_and_reports_stats() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set_all(&[("a", "1".into()), ("b", "2".into())]).unwrap();
        let stats = store.clear().unwrap();
        assert_eq!(stats.entries, 2);
        assert!(stats.total_bytes > 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_empty_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nothing"));
        let stats = store.clear().unwrap();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn location_points_at_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.location(), Some(dir.path().join("state.json").as_path()));
    }
}
