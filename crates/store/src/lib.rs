//! `quickbill-store` — persistence capability for the invoice editor.
//!
//! The document is persisted through an injected key-value capability
//! (`KvStore`), so the same draft and history logic runs over the
//! in-memory store in tests and the file-backed store in the app.

pub mod draft;
pub mod file;
pub mod history;
pub mod in_memory;
pub mod kv;

pub use draft::{DRAFT_KEY, DraftStore};
pub use file::FileKvStore;
pub use history::{HistoryStore, SAVE_PREFIX, sanitize_name};
pub use in_memory::InMemoryKvStore;
pub use kv::{KvStore, StoreError};
