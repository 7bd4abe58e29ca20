//! Theme colors passed explicitly into export functions.

use serde::{Deserialize, Serialize};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional). Returns `None` for
    /// anything else; never panics.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().strip_prefix('#').unwrap_or_else(|| hex.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Mix toward white by `amount` (clamped to `0.0..=1.0`).
    pub fn tint(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |channel: u8| -> u8 {
            let channel = f32::from(channel);
            (channel + (255.0 - channel) * amount).round() as u8
        };
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }
}

/// The visual theme exports are rendered with.
///
/// Resolved by the embedding shell at export time and passed in, so the
/// files match the current light/dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    pub surface: Rgb,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Rgb::new(0xff, 0xff, 0xff),
            text: Rgb::new(0x1f, 0x29, 0x33),
            accent: Rgb::new(0x0d, 0x6e, 0xfd),
            surface: Rgb::new(0xf1, 0xf4, 0xf8),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Rgb::new(0x12, 0x16, 0x1c),
            text: Rgb::new(0xe8, 0xec, 0xf1),
            accent: Rgb::new(0x4d, 0x9b, 0xff),
            surface: Rgb::new(0x1e, 0x25, 0x2e),
        }
    }

    /// Zebra-stripe variant of the surface color for alternating rows.
    pub fn surface_stripe(&self) -> Rgb {
        self.surface.tint(0.5)
    }

    /// Softened accent used behind the emphasized grand total.
    pub fn accent_soft(&self) -> Rgb {
        self.accent.tint(0.8)
    }
}
