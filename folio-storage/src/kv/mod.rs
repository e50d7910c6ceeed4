//! String key-value stores backing the persisted theme selection.
//!
//! Each store is one persistence tier: request-scoped cookies, a durable
//! file on the device, or plain process memory. Stores take `&self` and
//! synchronize internally so they can be shared as `Arc<dyn KeyValueStore>`.

pub mod cookie;
pub mod file;

use std::collections::HashMap;
use std::sync::RwLock;

use folio_core::{StorageError, StorageResult};

pub use cookie::{CookieOptions, CookieStore, SameSite};
pub use file::FileStore;

/// A string-to-string persistence tier.
pub trait KeyValueStore: Send + Sync {
    /// Short name used in log fields.
    fn label(&self) -> &str;

    /// Read `key`. `Ok(None)` means absent; `Err` means the tier is unusable.
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `key`, replacing any previous value.
    fn set_string(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Write several keys together.
    ///
    /// Stores that can commit a batch in one step override this so a failure
    /// never leaves only part of it written.
    fn set_entries(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        for (key, value) in entries {
            self.set_string(key, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Process-scoped store. Lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    label: String,
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-populated store.
    pub fn with_entries<I, K, V>(label: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            label: label.into(),
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> StorageResult<usize> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for InMemoryStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_entries(&self, batch: &[(&str, &str)]) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        for (key, value) in batch {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() -> StorageResult<()> {
        let store = InMemoryStore::new("session");
        assert_eq!(store.label(), "session");
        assert!(store.is_empty()?);
        assert_eq!(store.get_string("theme-name")?, None);

        store.set_string("theme-name", "galaxy")?;
        store.set_string("theme-name", "forest")?;
        assert_eq!(store.get_string("theme-name")?, Some("forest".to_string()));
        assert_eq!(store.len()?, 1);
        Ok(())
    }

    #[test]
    fn test_with_entries() -> StorageResult<()> {
        let store = InMemoryStore::with_entries("local", [("theme-mode", "light")]);
        assert_eq!(store.get_string("theme-mode")?, Some("light".to_string()));
        Ok(())
    }
}
