//! File-backed key-value store: one file per key under a root directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::kv::{KvStore, StoreError};

/// Persistent store keeping each entry as a plain file named after its
/// key. Keys produced by this crate are filename-safe by construction.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create store directory at {}", root.display()))?;
        Ok(Self { root })
    }

    /// Open the per-user default location (`<data dir>/quickbill`).
    pub fn open_default() -> anyhow::Result<Self> {
        let base = dirs::data_dir().context("no user data directory available")?;
        Self::open(base.join("quickbill"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn io_error(key: &str, source: io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value).map_err(|e| Self::io_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| StoreError::Backend(format!("unreadable store root: {e}")))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Backend(format!("dir walk failed: {e}")))?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileKvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("store")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_the_root_directory() {
        let (_dir, store) = temp_store();
        assert!(store.root().is_dir());
    }

    #[test]
    fn set_get_remove_round_trip() {
        let (_dir, store) = temp_store();
        store.set("draft", "{\"a\":1}").unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some("{\"a\":1}"));

        store.remove("draft").unwrap();
        assert_eq!(store.get("draft").unwrap(), None);
        // Second delete of the same key is fine.
        store.remove("draft").unwrap();
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("nothing-here").unwrap(), None);
    }

    #[test]
    fn prefix_listing_matches_file_names() {
        let (_dir, store) = temp_store();
        store.set("saved_q1", "{}").unwrap();
        store.set("saved_q2", "{}").unwrap();
        store.set("draft", "{}").unwrap();

        let mut keys = store.keys_with_prefix("saved_").unwrap();
        keys.sort();
        assert_eq!(keys, ["saved_q1", "saved_q2"]);
    }
}
