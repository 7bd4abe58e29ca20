//! Document-image export: PNG-encode a captured region of the rendered
//! invoice, composited over the theme background.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::ExportError;
use crate::filename::sanitize_filename;
use crate::theme::Rgb;

/// Raw RGBA capture of the rendered invoice region, produced by the
/// embedding UI.
#[derive(Debug, Clone)]
pub struct RenderedRegion {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub pixels: Vec<u8>,
}

/// Produces a raster image file named after the invoice number.
pub trait ImageExporter {
    fn export(
        &self,
        region: &RenderedRegion,
        background: Rgb,
        invoice_number: &str,
        dir: &Path,
    ) -> Result<PathBuf, ExportError>;
}

/// PNG-encoding image exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngImageExporter;

impl ImageExporter for PngImageExporter {
    fn export(
        &self,
        region: &RenderedRegion,
        background: Rgb,
        invoice_number: &str,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let composited = composite_over(region, background)?;
        let path = dir.join(format!("{}.png", sanitize_filename(invoice_number)));
        composited.save_with_format(&path, ImageFormat::Png)?;
        debug!(path = %path.display(), "image export written");
        Ok(path)
    }
}

/// Alpha-composite the captured region over an opaque background color.
fn composite_over(region: &RenderedRegion, background: Rgb) -> Result<RgbaImage, ExportError> {
    if region.width == 0 || region.height == 0 {
        return Err(ExportError::InvalidRegion("empty region".to_string()));
    }
    let expected = region.width as usize * region.height as usize * 4;
    if region.pixels.len() != expected {
        return Err(ExportError::InvalidRegion(format!(
            "expected {expected} bytes for {}x{}, got {}",
            region.width,
            region.height,
            region.pixels.len()
        )));
    }

    let mut out = ImageBuffer::from_pixel(
        region.width,
        region.height,
        Rgba([background.r, background.g, background.b, 255]),
    );
    for (i, pixel) in out.pixels_mut().enumerate() {
        let src = &region.pixels[i * 4..i * 4 + 4];
        let alpha = u32::from(src[3]);
        for channel in 0..3 {
            let s = u32::from(src[channel]);
            let d = u32::from(pixel.0[channel]);
            pixel.0[channel] = ((s * alpha + d * (255 - alpha) + 127) / 255) as u8;
        }
    }
    Ok(out)
}
