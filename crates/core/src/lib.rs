//! `quickbill-core` — pure invoice domain building blocks.
//!
//! This crate contains the **pure domain** of the invoice editor (no
//! persistence or rendering concerns): money parsing/formatting, line
//! items, the invoice document aggregate and the totals calculator.

pub mod document;
pub mod item;
pub mod money;
pub mod totals;

pub use document::InvoiceDocument;
pub use item::{LineItem, Unit};
pub use money::{DEFAULT_CURRENCY_SYMBOL, format_amount, parse_amount, round_half_up};
pub use totals::{Totals, compute_totals};
