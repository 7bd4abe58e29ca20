//! `quickbill-export` — export adapters for the invoice editor.
//!
//! Both adapters consume the document, its derived totals and an explicit
//! theme; nothing here reads ambient presentation state. Failures are
//! returned to the caller to surface as a visible, non-fatal notice.

pub mod filename;
pub mod image;
pub mod pdf;
pub mod theme;

use thiserror::Error;

pub use filename::sanitize_filename;
pub use image::{ImageExporter, PngImageExporter, RenderedRegion};
pub use pdf::{PdfTableExporter, TabularExporter, render_pdf};
pub use theme::{Rgb, Theme};

/// Export adapter error. Non-fatal: the editing session stays usable.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),

    #[error("captured region is invalid: {0}")]
    InvalidRegion(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("export file write failed: {0}")]
    Io(#[from] std::io::Error),
}
