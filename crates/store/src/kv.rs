//! The key-value storage capability the editor persists through.

use std::sync::Arc;

use thiserror::Error;

/// Storage operation error.
///
/// Callers in this crate treat read failures as absent data; these errors
/// exist for logging and for write paths that want to report failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store is unusable (poisoned lock, unreadable root).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A single key operation failed.
    #[error("storage operation failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// String-keyed, string-valued persistent storage.
///
/// Implementations must treat `set` as replace (last write wins) and
/// `remove` as idempotent. Keys produced by this crate are limited to
/// `[A-Za-z0-9_-]`, so implementations may map them directly to file
/// names.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`; `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// List stored keys starting with `prefix`, in unspecified order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

impl<S> KvStore for Arc<S>
where
    S: KvStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        (**self).keys_with_prefix(prefix)
    }
}
