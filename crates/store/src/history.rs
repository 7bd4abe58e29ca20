//! Named saves: user-triggered snapshots, independent of later edits.

use std::sync::Arc;

use tracing::warn;

use quickbill_core::InvoiceDocument;

use crate::kv::{KvStore, StoreError};

/// Key prefix under which named snapshots are stored.
pub const SAVE_PREFIX: &str = "saved_";

/// Reduce a user-chosen save name to `[A-Za-z0-9_-]`.
///
/// Other characters are replaced with `_` so names double as storage keys
/// (and file names). An empty name becomes `unnamed`.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

/// Store of named document snapshots: save, list, load, delete.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KvStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key_for(name: &str) -> String {
        format!("{SAVE_PREFIX}{}", sanitize_name(name))
    }

    /// Persist a snapshot of `document` under `name`, overwriting any
    /// existing snapshot of the same (sanitized) name. Returns the name
    /// the snapshot is stored under.
    pub fn save_named(
        &self,
        name: &str,
        document: &InvoiceDocument,
    ) -> Result<String, StoreError> {
        let name = sanitize_name(name);
        let payload = serde_json::to_string(document)
            .map_err(|e| StoreError::Backend(format!("snapshot serialization failed: {e}")))?;
        self.store.set(&format!("{SAVE_PREFIX}{name}"), &payload)?;
        Ok(name)
    }

    /// All saved names, lexicographically sorted.
    pub fn list_saved(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self
            .store
            .keys_with_prefix(SAVE_PREFIX)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(SAVE_PREFIX).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Load a snapshot. Missing or corrupt data yields `None`; callers
    /// treat that as a no-op, leaving the live document untouched.
    pub fn load_named(&self, name: &str) -> Option<InvoiceDocument> {
        let key = Self::key_for(name);
        match self.store.get(&key) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!(key, error = %e, "stored snapshot is corrupt, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "snapshot read failed, ignoring");
                None
            }
        }
    }

    /// Delete a snapshot. Deleting a name that does not exist is fine.
    pub fn delete_named(&self, name: &str) -> Result<(), StoreError> {
        self.store.remove(&Self::key_for(name))
    }
}
