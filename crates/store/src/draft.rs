//! The auto-persisted draft: the single always-current invoice document.

use std::sync::Arc;

use tracing::warn;

use quickbill_core::InvoiceDocument;

use crate::kv::KvStore;

/// Storage key holding the one draft per profile.
pub const DRAFT_KEY: &str = "draft";

/// Persists the live document on every change and restores it at startup.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Persist the document, replacing any prior draft.
    ///
    /// A failed write is logged and otherwise ignored; the worst case is
    /// the loss of an unsaved edit, never a visible error.
    pub fn save(&self, document: &InvoiceDocument) {
        let payload = match serde_json::to_string(document) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "draft serialization failed");
                return;
            }
        };
        if let Err(e) = self.store.set(DRAFT_KEY, &payload) {
            warn!(error = %e, "draft write failed");
        }
    }

    /// Restore the draft. Absent, unreadable or corrupt data falls back
    /// to a fresh default document without surfacing an error.
    pub fn load(&self) -> InvoiceDocument {
        match self.store.get(DRAFT_KEY) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(document) => document,
                Err(e) => {
                    warn!(error = %e, "stored draft is corrupt, starting fresh");
                    InvoiceDocument::default()
                }
            },
            Ok(None) => InvoiceDocument::default(),
            Err(e) => {
                warn!(error = %e, "draft read failed, starting fresh");
                InvoiceDocument::default()
            }
        }
    }
}
