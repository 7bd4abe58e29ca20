//! The editor session: one live document, auto-persisted on every change.
//!
//! All mutations are synchronous and happen on the caller's thread; the
//! embedding shell owns export scheduling (and disabling re-trigger while
//! one is in flight), so the session enforces no mutual exclusion.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use quickbill_core::{InvoiceDocument, Totals, compute_totals};
use quickbill_export::{
    ExportError, ImageExporter, PdfTableExporter, PngImageExporter, RenderedRegion,
    TabularExporter, Theme,
};
use quickbill_store::{DraftStore, FileKvStore, HistoryStore, KvStore, StoreError};

pub struct EditorSession {
    document: InvoiceDocument,
    drafts: DraftStore,
    history: HistoryStore,
    tabular: Box<dyn TabularExporter>,
    images: Box<dyn ImageExporter>,
}

impl EditorSession {
    /// Start a session over `store`, restoring the auto-saved draft when
    /// one is present. Absent or corrupt drafts silently fall back to a
    /// fresh default document.
    pub fn start(store: Arc<dyn KvStore>) -> Self {
        let drafts = DraftStore::new(store.clone());
        let history = HistoryStore::new(store);
        let document = drafts.load();
        Self {
            document,
            drafts,
            history,
            tabular: Box::new(PdfTableExporter),
            images: Box::new(PngImageExporter),
        }
    }

    /// Swap the export adapters (tests, alternative backends).
    pub fn with_exporters(
        mut self,
        tabular: Box<dyn TabularExporter>,
        images: Box<dyn ImageExporter>,
    ) -> Self {
        self.tabular = tabular;
        self.images = images;
        self
    }

    pub fn document(&self) -> &InvoiceDocument {
        &self.document
    }

    /// Current derived totals, recomputed from the live document.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.document.items, &self.document.overall_discount)
    }

    /// Apply a mutation to the live document, then auto-persist the draft.
    pub fn edit(&mut self, apply: impl FnOnce(&mut InvoiceDocument)) {
        apply(&mut self.document);
        self.drafts.save(&self.document);
    }

    pub fn add_item(&mut self) {
        self.edit(InvoiceDocument::add_item);
    }

    pub fn remove_item(&mut self, index: usize) {
        self.edit(|document| document.remove_item(index));
    }

    /// Replace the live document with a fresh default one (new timestamp
    /// invoice number) and persist it as the draft.
    pub fn reset(&mut self) {
        self.document = InvoiceDocument::default();
        self.drafts.save(&self.document);
    }

    /// Snapshot the live document under `name`; returns the sanitized
    /// name the snapshot is stored under.
    pub fn save_as(&self, name: &str) -> Result<String, StoreError> {
        self.history.save_named(name, &self.document)
    }

    /// Replace the live document with the named snapshot (which becomes
    /// the new draft). Missing or corrupt snapshots leave the session
    /// untouched and return `false`.
    pub fn load_saved(&mut self, name: &str) -> bool {
        match self.history.load_named(name) {
            Some(document) => {
                self.document = document;
                self.drafts.save(&self.document);
                true
            }
            None => {
                info!(name, "saved invoice not loaded (missing or unreadable)");
                false
            }
        }
    }

    /// Delete a named snapshot; deleting a missing name is fine.
    pub fn delete_saved(&self, name: &str) -> Result<(), StoreError> {
        self.history.delete_named(name)
    }

    /// Names of all saved snapshots, sorted. A storage failure lists
    /// nothing rather than erroring the UI.
    pub fn list_saved(&self) -> Vec<String> {
        self.history.list_saved().unwrap_or_else(|e| {
            warn!(error = %e, "listing saved invoices failed");
            Vec::new()
        })
    }

    /// Write the tabular PDF into `dir`. Failures come back to the shell
    /// for display as a non-fatal notice; the session stays usable.
    pub fn export_pdf(&self, theme: &Theme, dir: &Path) -> Result<PathBuf, ExportError> {
        self.tabular.export(&self.document, &self.totals(), theme, dir)
    }

    /// Write the document image into `dir`, composited over the theme
    /// background.
    pub fn export_image(
        &self,
        region: &RenderedRegion,
        theme: &Theme,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        self.images
            .export(region, theme.background, &self.document.invoice_number, dir)
    }
}

/// Process bootstrap for an embedding shell: tracing plus a session over
/// the per-user file store.
pub fn bootstrap() -> anyhow::Result<EditorSession> {
    quickbill_observability::init();
    let store = FileKvStore::open_default()?;
    Ok(EditorSession::start(Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickbill_store::{DRAFT_KEY, InMemoryKvStore};
    use rust_decimal::Decimal;

    fn session() -> (Arc<InMemoryKvStore>, EditorSession) {
        let store = Arc::new(InMemoryKvStore::new());
        let session = EditorSession::start(store.clone() as Arc<dyn KvStore>);
        (store, session)
    }

    #[test]
    fn edits_are_auto_persisted_and_survive_restart() {
        let (store, mut session) = session();
        session.edit(|document| {
            document.customer_name = "Ravi".to_string();
            document.items[0].quantity = "2".to_string();
            document.items[0].rate = "100".to_string();
        });

        let restored = EditorSession::start(store as Arc<dyn KvStore>);
        assert_eq!(restored.document().customer_name, "Ravi");
        assert_eq!(restored.totals().grand_total, Decimal::from(200));
    }

    #[test]
    fn corrupt_draft_starts_a_fresh_session() {
        let store = Arc::new(InMemoryKvStore::new());
        store.set(DRAFT_KEY, "garbage ]]").unwrap();

        let session = EditorSession::start(store as Arc<dyn KvStore>);
        assert!(session.document().customer_name.is_empty());
        assert_eq!(session.document().items.len(), 1);
    }

    #[test]
    fn totals_follow_the_live_document() {
        let (_store, mut session) = session();
        session.edit(|document| {
            document.items[0].quantity = "3".to_string();
            document.items[0].rate = "33.33".to_string();
        });
        assert_eq!(session.totals().grand_total, Decimal::from(100));
        assert_eq!(session.totals().round_off, Decimal::new(1, 2));

        session.edit(|document| document.overall_discount = "99.99".to_string());
        assert_eq!(session.totals().grand_total, Decimal::ZERO);
    }

    #[test]
    fn row_helpers_edit_and_persist() {
        let (store, mut session) = session();
        session.add_item();
        session.add_item();
        assert_eq!(session.document().items.len(), 3);

        session.remove_item(1);
        assert_eq!(session.document().items.len(), 2);

        let restored = EditorSession::start(store as Arc<dyn KvStore>);
        assert_eq!(restored.document().items.len(), 2);
    }

    #[test]
    fn named_save_load_round_trip_replaces_the_draft() {
        let (_store, mut session) = session();
        session.edit(|document| document.customer_name = "March customer".to_string());
        let saved = session.save_as("Q4/Invoice").unwrap();
        assert_eq!(saved, "Q4_Invoice");

        session.reset();
        assert!(session.document().customer_name.is_empty());

        assert!(session.load_saved("Q4/Invoice"));
        assert_eq!(session.document().customer_name, "March customer");
        assert_eq!(session.list_saved(), ["Q4_Invoice"]);
    }

    #[test]
    fn loading_a_missing_snapshot_is_a_noop() {
        let (_store, mut session) = session();
        session.edit(|document| document.customer_name = "keep".to_string());

        assert!(!session.load_saved("never-saved"));
        assert_eq!(session.document().customer_name, "keep");
    }

    #[test]
    fn deleting_snapshots_is_idempotent() {
        let (_store, session) = session();
        session.save_as("gone").unwrap();
        session.delete_saved("gone").unwrap();
        session.delete_saved("gone").unwrap();
        assert!(session.list_saved().is_empty());
    }

    #[test]
    fn reset_issues_a_new_default_document() {
        let (_store, mut session) = session();
        session.edit(|document| {
            document.customer_name = "old".to_string();
            document.overall_discount = "5".to_string();
        });

        session.reset();
        assert!(session.document().customer_name.is_empty());
        assert!(session.document().overall_discount.is_empty());
        assert!(session.document().invoice_number.starts_with("INV-"));
    }

    #[test]
    fn pdf_export_writes_next_to_the_given_dir() {
        let (_store, mut session) = session();
        session.edit(|document| {
            document.invoice_number = "INV-1".to_string();
            document.items[0].description = "Widgets".to_string();
            document.items[0].quantity = "1".to_string();
            document.items[0].rate = "10".to_string();
        });

        let dir = tempfile::tempdir().unwrap();
        let path = session.export_pdf(&Theme::light(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "INV-1.pdf");
        assert!(path.is_file());
    }

    #[test]
    fn image_export_uses_the_theme_background() {
        let (_store, mut session) = session();
        session.edit(|document| document.invoice_number = "INV-2".to_string());

        let region = RenderedRegion {
            width: 2,
            height: 2,
            pixels: vec![0; 16],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = session
            .export_image(&region, &Theme::dark(), dir.path())
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "INV-2.png");
    }

    #[test]
    fn failed_image_export_leaves_the_session_usable() {
        let (_store, mut session) = session();
        let bad_region = RenderedRegion {
            width: 3,
            height: 3,
            pixels: vec![0; 5],
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(
            session
                .export_image(&bad_region, &Theme::light(), dir.path())
                .is_err()
        );

        session.edit(|document| document.customer_name = "still editing".to_string());
        assert_eq!(session.document().customer_name, "still editing");
    }
}
