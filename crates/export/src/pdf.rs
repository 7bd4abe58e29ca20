//! Tabular PDF export: one row per line item, themed, paginated.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect,
};
use rust_decimal::Decimal;
use tracing::debug;

use quickbill_core::{InvoiceDocument, Totals, format_amount, parse_amount};

use crate::ExportError;
use crate::filename::sanitize_filename;
use crate::theme::{Rgb, Theme};

/// Renders the invoice as a paginated table document.
pub trait TabularExporter {
    fn render(
        &self,
        document: &InvoiceDocument,
        totals: &Totals,
        theme: &Theme,
    ) -> Result<Vec<u8>, ExportError>;

    /// Render and write `<sanitized invoice number>.pdf` into `dir`.
    fn export(
        &self,
        document: &InvoiceDocument,
        totals: &Totals,
        theme: &Theme,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let bytes = self.render(document, totals, theme)?;
        let path = dir.join(format!("{}.pdf", sanitize_filename(&document.invoice_number)));
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), "tabular export written");
        Ok(path)
    }
}

/// The printpdf-backed tabular exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTableExporter;

impl TabularExporter for PdfTableExporter {
    fn render(
        &self,
        document: &InvoiceDocument,
        totals: &Totals,
        theme: &Theme,
    ) -> Result<Vec<u8>, ExportError> {
        render_pdf(document, totals, theme)
    }
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const BOTTOM: f32 = 25.0;
const ROW_HEIGHT: f32 = 7.0;

// Column anchors (mm from the left edge).
const X_ROW: f32 = 17.0;
const X_DESC: f32 = 28.0;
const X_QTY: f32 = 100.0;
const X_UNIT: f32 = 116.0;
const X_RATE: f32 = 136.0;
const X_DISCOUNT: f32 = 157.0;
const X_AMOUNT: f32 = 176.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the invoice to PDF bytes. A4, builtin Helvetica, colors taken
/// from `theme` only.
pub fn render_pdf(
    document: &InvoiceDocument,
    totals: &Totals,
    theme: &Theme,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", document.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    paint_background(&layer, theme);

    let mut y = draw_document_header(&layer, &fonts, document, theme);
    y = draw_table_header(&layer, &fonts, theme, y);

    for (index, item) in document.items.iter().enumerate() {
        if y < BOTTOM {
            layer = next_page(&doc, theme);
            y = draw_table_header(&layer, &fonts, theme, PAGE_HEIGHT - MARGIN);
        }

        let fill = if index % 2 == 0 {
            theme.surface
        } else {
            theme.surface_stripe()
        };
        fill_rect(&layer, fill, MARGIN, y - 2.0, PAGE_WIDTH - MARGIN, y + ROW_HEIGHT - 2.0);

        let quantity = parse_amount(&item.quantity);
        text(&layer, &fonts.regular, theme.text, &(index + 1).to_string(), 9.0, X_ROW, y);
        text(
            &layer,
            &fonts.regular,
            theme.text,
            &clip(&item.description, 40),
            9.0,
            X_DESC,
            y,
        );
        text(&layer, &fonts.regular, theme.text, &plain(quantity), 9.0, X_QTY, y);
        text(
            &layer,
            &fonts.regular,
            theme.text,
            &clip(&item.unit.to_string(), 10),
            9.0,
            X_UNIT,
            y,
        );
        text(
            &layer,
            &fonts.regular,
            theme.text,
            &plain(parse_amount(&item.rate)),
            9.0,
            X_RATE,
            y,
        );
        text(
            &layer,
            &fonts.regular,
            theme.text,
            &plain(parse_amount(&item.discount)),
            9.0,
            X_DISCOUNT,
            y,
        );
        text(&layer, &fonts.bold, theme.text, &plain(item.amount()), 9.0, X_AMOUNT, y);

        y -= ROW_HEIGHT;
    }

    // Totals block; four lines plus the emphasized grand total.
    if y < BOTTOM + 4.0 * ROW_HEIGHT {
        layer = next_page(&doc, theme);
        y = PAGE_HEIGHT - MARGIN;
    }
    draw_totals(&layer, &fonts, document, totals, theme, y - 4.0);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    color: Rgb,
    content: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.set_fill_color(pdf_color(color));
    layer.use_text(content, size, Mm(x), Mm(y), font);
}

fn fill_rect(layer: &PdfLayerReference, color: Rgb, x1: f32, y1: f32, x2: f32, y2: f32) {
    layer.set_fill_color(pdf_color(color));
    let rect = Rect::new(Mm(x1), Mm(y1), Mm(x2), Mm(y2)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

fn rule(layer: &PdfLayerReference, color: Rgb, y: f32) {
    layer.set_outline_color(pdf_color(color));
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn paint_background(layer: &PdfLayerReference, theme: &Theme) {
    fill_rect(layer, theme.background, 0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
}

fn next_page(doc: &PdfDocumentReference, theme: &Theme) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    paint_background(&layer, theme);
    layer
}

/// Header block: business name, invoice number, date, optional place.
/// Returns the cursor below the block.
fn draw_document_header(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    document: &InvoiceDocument,
    theme: &Theme,
) -> f32 {
    let mut y = PAGE_HEIGHT - 17.0;

    let business = if document.business_name.is_empty() {
        "Invoice"
    } else {
        document.business_name.as_str()
    };
    text(layer, &fonts.bold, theme.accent, &clip(business, 42), 16.0, MARGIN, y);
    text(
        layer,
        &fonts.bold,
        theme.text,
        &clip(&document.invoice_number, 24),
        11.0,
        150.0,
        y,
    );
    y -= 6.0;
    text(
        layer,
        &fonts.regular,
        theme.text,
        &document.date.format("%d-%m-%Y").to_string(),
        10.0,
        150.0,
        y,
    );
    if !document.customer_name.is_empty() {
        text(
            layer,
            &fonts.regular,
            theme.text,
            &clip(&document.customer_name, 48),
            10.0,
            MARGIN,
            y,
        );
        y -= 5.0;
    }
    if !document.place.is_empty() {
        text(
            layer,
            &fonts.regular,
            theme.text,
            &clip(&document.place, 48),
            10.0,
            MARGIN,
            y,
        );
        y -= 5.0;
    }

    y -= 3.0;
    rule(layer, theme.accent, y);
    y - 8.0
}

/// Accent-colored column header row. Returns the cursor for the first
/// body row.
fn draw_table_header(layer: &PdfLayerReference, fonts: &Fonts, theme: &Theme, y: f32) -> f32 {
    fill_rect(layer, theme.accent, MARGIN, y - 2.0, PAGE_WIDTH - MARGIN, y + ROW_HEIGHT - 2.0);

    let label_color = theme.background;
    text(layer, &fonts.bold, label_color, "#", 9.0, X_ROW, y);
    text(layer, &fonts.bold, label_color, "Description", 9.0, X_DESC, y);
    text(layer, &fonts.bold, label_color, "Qty", 9.0, X_QTY, y);
    text(layer, &fonts.bold, label_color, "Unit", 9.0, X_UNIT, y);
    text(layer, &fonts.bold, label_color, "Rate", 9.0, X_RATE, y);
    text(layer, &fonts.bold, label_color, "Discount", 9.0, X_DISCOUNT, y);
    text(layer, &fonts.bold, label_color, "Amount", 9.0, X_AMOUNT, y);

    y - ROW_HEIGHT
}

fn draw_totals(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    document: &InvoiceDocument,
    totals: &Totals,
    theme: &Theme,
    mut y: f32,
) {
    let symbol = document.currency_symbol.as_str();
    let x_label = 136.0;
    let x_value = 170.0;

    rule(layer, theme.accent, y + 4.0);

    text(layer, &fonts.regular, theme.text, "Subtotal", 10.0, x_label, y);
    text(
        layer,
        &fonts.regular,
        theme.text,
        &format_amount(symbol, totals.subtotal),
        10.0,
        x_value,
        y,
    );
    y -= 6.0;

    text(layer, &fonts.regular, theme.text, "Discount", 10.0, x_label, y);
    text(
        layer,
        &fonts.regular,
        theme.text,
        &format_amount(symbol, parse_amount(&document.overall_discount)),
        10.0,
        x_value,
        y,
    );
    y -= 6.0;

    text(layer, &fonts.regular, theme.text, "Round-off", 10.0, x_label, y);
    text(
        layer,
        &fonts.regular,
        theme.text,
        &format_amount(symbol, totals.round_off),
        10.0,
        x_value,
        y,
    );
    y -= 8.0;

    fill_rect(
        layer,
        theme.accent_soft(),
        x_label - 3.0,
        y - 2.5,
        PAGE_WIDTH - MARGIN,
        y + 5.5,
    );
    text(layer, &fonts.bold, theme.text, "Grand Total", 12.0, x_label, y);
    text(
        layer,
        &fonts.bold,
        theme.text,
        &format_amount(symbol, totals.grand_total),
        12.0,
        x_value,
        y,
    );
}

/// Grouped digits without a currency symbol, for table cells.
fn plain(amount: Decimal) -> String {
    format_amount("", amount)
}

/// Char-boundary-safe prefix for fixed-width cells.
fn clip(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let mut clipped: String = content.chars().take(max_chars.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
