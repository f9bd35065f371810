//! Local key-value persistence for dashboard state.
//!
//! The dashboard mirrors its form fields and record list into a
//! [`StateStore`] after every change, under the keys `name`, `username`,
//! `email`, `userData` and `companyName`. Values are plain strings;
//! `userData` holds the record list as a JSON array.

pub mod file;
pub mod memory;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{KEY_COMPANY_NAME, KEY_EMAIL, KEY_NAME, KEY_USER_DATA, KEY_USERNAME};
use crate::models::{FormField, UserForm, UserRecord};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a state store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse state file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store.
pub trait StateStore: Send {
    /// Read one key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write several keys at once, keeping keys not mentioned.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    /// All stored entries in insertion order.
    fn entries(&self) -> Result<IndexMap<String, String>, StoreError>;

    /// Remove every entry, returning what was there.
    fn clear(&mut self) -> Result<StoreStats, StoreError>;

    /// Entry count and approximate size.
    fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Backing file, if the store has one.
    fn location(&self) -> Option<&Path>;
}

/// Statistics about the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of stored keys.
    pub entries: usize,
    /// Total size in bytes.
    pub total_bytes: u64,
}

impl StoreStats {
    /// Format total_bytes as a human-readable string.
    pub fn human_size(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = 1024 * KB;

        if self.total_bytes >= MB {
            format!("{:.1} MiB", self.total_bytes as f64 / MB as f64)
        } else if self.total_bytes >= KB {
            format!("{:.1} KiB", self.total_bytes as f64 / KB as f64)
        } else {
            format!("{} B", self.total_bytes)
        }
    }
}

/// Writes dashboard state into a store and reads the form draft back.
///
/// Writes are best-effort: failures are logged and never surface to the
/// action that triggered them.
pub struct StateMirror {
    store: Box<dyn StateStore>,
}

impl StateMirror {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Mirror the form fields and the record list.
    pub fn write(&mut self, form: &UserForm, records: &[UserRecord]) {
        let user_data = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize user list for persistence");
                return;
            }
        };
        let entries = [
            (KEY_NAME, form.name.clone()),
            (KEY_USERNAME, form.username.clone()),
            (KEY_EMAIL, form.email.clone()),
            (KEY_USER_DATA, user_data),
            (KEY_COMPANY_NAME, form.company_name.clone()),
        ];
        match self.store.set_all(&entries) {
            Ok(()) => debug!(records = records.len(), "state mirrored"),
            Err(e) => warn!(error = %e, "failed to persist dashboard state"),
        }
    }

    /// Rebuild the form draft from stored keys. Missing keys read as empty.
    pub fn restore_form(&self) -> UserForm {
        let mut form = UserForm::default();
        for (field, key) in [
            (FormField::Name, KEY_NAME),
            (FormField::Username, KEY_USERNAME),
            (FormField::Email, KEY_EMAIL),
            (FormField::CompanyName, KEY_COMPANY_NAME),
        ] {
            match self.store.get(key) {
                Ok(Some(value)) => form.set(field, value),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, key, "failed to read persisted form field");
                    return UserForm::default();
                }
            }
        }
        form
    }

    /// The last mirrored record list, if any was stored and parses.
    pub fn stored_records(&self) -> Option<Vec<UserRecord>> {
        let raw = self.store.get(KEY_USER_DATA).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// Access the underlying store.
    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut dyn StateStore {
        self.store.as_mut()
    }
}
