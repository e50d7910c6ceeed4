//! Durable, device-scoped store kept as a JSON object on disk.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use folio_core::{StorageError, StorageResult};

use super::KeyValueStore;

/// JSON-file store. Every write replaces the file atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// A missing file is an empty store; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = load(&path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn label(&self) -> &str {
        "file"
    }

    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        self.set_entries(&[(key, value)])
    }

    fn set_entries(&self, batch: &[(&str, &str)]) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut next = entries.clone();
        for (key, value) in batch {
            next.insert(key.to_string(), value.to_string());
        }
        // Memory only moves once the file is committed.
        save(&self.path, &next)?;
        *entries = next;
        Ok(())
    }
}

fn load(path: &Path) -> StorageResult<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&contents).map_err(|e| StorageError::Serialization {
        reason: e.to_string(),
    })
}

fn save(path: &Path, entries: &BTreeMap<String, String>) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let contents = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Serialization {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("tmp");
    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| std::fs::rename(&tmp_path, path)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_error(path, err));
    }
    Ok(())
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
