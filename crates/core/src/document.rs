//! The invoice document: header fields plus the ordered line-item table.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::item::LineItem;
use crate::money::DEFAULT_CURRENCY_SYMBOL;

/// The live invoice being edited.
///
/// Always fully defined: every field has a default, a fresh document
/// starts with one blank row, and `items` keeps insertion order (the
/// 1-based index is the displayed row number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub business_name: String,
    pub customer_name: String,
    pub place: String,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub currency_symbol: String,
    pub items: Vec<LineItem>,
    /// Raw edit-boundary text; parsed with fallback to zero when totals
    /// are computed.
    pub overall_discount: String,
}

impl Default for InvoiceDocument {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            customer_name: String::new(),
            place: String::new(),
            invoice_number: default_invoice_number(),
            date: Local::now().date_naive(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            items: vec![LineItem::default()],
            overall_discount: String::new(),
        }
    }
}

impl InvoiceDocument {
    /// Append a blank row at the end of the table.
    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
    }

    /// Remove the row at `index` (0-based). Out-of-range is a no-op, and
    /// removing the final row leaves one blank row so the document is
    /// never row-less.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
        if self.items.is_empty() {
            self.items.push(LineItem::default());
        }
    }
}

/// Timestamp-derived default invoice number.
///
/// A soft default the user is expected to override; two documents created
/// in the same minute will collide, so this is never used as an identity.
fn default_invoice_number() -> String {
    Local::now().format("INV-%Y%m%d-%H%M").to_string()
}
