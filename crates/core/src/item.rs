//! Line items: one billable row of the invoice.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::parse_amount;

/// Measurement unit of a billable row.
///
/// The fixed set covers the common cases; `Custom` carries anything the
/// user types that is not one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pieces,
    Kilogram,
    Litre,
    Metre,
    Set,
    Box,
    Count,
    #[serde(untagged)]
    Custom(String),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Pieces => "Pieces",
            Unit::Kilogram => "Kilogram",
            Unit::Litre => "Litre",
            Unit::Metre => "Metre",
            Unit::Set => "Set",
            Unit::Box => "Box",
            Unit::Count => "Count",
            Unit::Custom(text) => text.as_str(),
        };
        f.write_str(label)
    }
}

impl FromStr for Unit {
    type Err = core::convert::Infallible;

    /// Case-insensitive match on the known labels; anything else becomes
    /// `Custom`. An empty field falls back to the default unit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "" | "pieces" => Unit::Pieces,
            "kilogram" => Unit::Kilogram,
            "litre" => Unit::Litre,
            "metre" => Unit::Metre,
            "set" => Unit::Set,
            "box" => Unit::Box,
            "count" => Unit::Count,
            _ => Unit::Custom(trimmed.to_string()),
        })
    }
}

/// One billable row.
///
/// Numeric fields hold the raw edit-boundary text; they are parsed with a
/// fallback to zero only when an amount is computed. `hsn` and `sku` are
/// classification codes with no computation impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: String,
    pub unit: Unit,
    pub rate: String,
    pub discount: String,
    pub hsn: String,
    pub sku: String,
}

impl LineItem {
    /// Billable amount of this row: `quantity * rate - discount`, clamped
    /// at zero.
    pub fn amount(&self) -> Decimal {
        let gross = parse_amount(&self.quantity) * parse_amount(&self.rate);
        (gross - parse_amount(&self.discount)).max(Decimal::ZERO)
    }
}
