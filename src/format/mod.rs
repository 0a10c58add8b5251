//! Text formatting helpers for receipt content.
//!
//! Numbers, prices and dates are rendered the way Polish fiscal printers
//! print them, with the stylistic knobs (decimal separator, multiply sign,
//! spacing style) drawn once per receipt as a [`FormattingChoice`].
//!
//! ```rust
//! use receipt_synth::format::*;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(format_number(dec!(123.45), ",", 2), "123,45");
//!
//! let line = PriceLine {
//!     quantity: dec!(2),
//!     unit: "szt.",
//!     unit_price: dec!(3.50),
//!     total_price: dec!(7.00),
//!     vat_symbol: "A",
//! };
//! let style = PriceStyle::new("x", ".", PriceFormat::Hybrid);
//! assert_eq!(format_price(&line, &style), "2 szt. x 3.50 = 7.00A");
//! ```

mod choice;
mod dates;
mod weighted;

pub use choice::*;
pub use dates::*;
pub use weighted::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::units;

/// Format a number with a fixed number of decimals and a custom separator.
pub fn format_number(value: Decimal, decimal_separator: &str, decimal_places: u32) -> String {
    let rounded = value.round_dp(decimal_places);
    let precision = decimal_places as usize;
    format!("{rounded:.precision$}").replace('.', decimal_separator)
}

/// Split text into chunks of at most `max_length` characters.
///
/// Plain character slicing: words are cut wherever the boundary falls.
/// An empty string gives no chunks; a zero `max_length` keeps the text whole.
pub fn split_long_text(text: &str, max_length: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_length == 0 {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Spacing style of a product price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// `2 szt. x 3.50 = 7.00 A`
    #[default]
    Standard,
    /// `2szt.x3.50=7.00A`
    NoSpaces,
    /// `2 szt. x 3.50 = 7.00A`
    Hybrid,
}

impl PriceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::NoSpaces => "no_spaces",
            Self::Hybrid => "hybrid",
        }
    }
}

/// The numbers printed on one product's price line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLine<'a> {
    pub quantity: Decimal,
    /// Unit label as displayed; empty drops the unit token.
    pub unit: &'a str,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub vat_symbol: &'a str,
}

/// Per-receipt stylistic settings for price lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStyle<'a> {
    pub multiply_sign: &'a str,
    pub decimal_separator: &'a str,
    pub format: PriceFormat,
}

impl<'a> PriceStyle<'a> {
    pub fn new(multiply_sign: &'a str, decimal_separator: &'a str, format: PriceFormat) -> Self {
        Self {
            multiply_sign,
            decimal_separator,
            format,
        }
    }
}

/// Render `QTY UNIT x PRICE = TOTAL SYM` in the requested style.
///
/// Quantities shown in "kg" or "l" get 3 decimals, everything else none.
pub fn format_price(line: &PriceLine<'_>, style: &PriceStyle<'_>) -> String {
    let sep = style.decimal_separator;
    let quantity = format_number(line.quantity, sep, units::quantity_decimals(line.unit));
    let unit_price = format_number(line.unit_price, sep, 2);
    let total = format_number(line.total_price, sep, 2);
    let sign = style.multiply_sign;
    let symbol = line.vat_symbol;

    let (gap, tail_gap) = match style.format {
        PriceFormat::Standard => (" ", " "),
        PriceFormat::NoSpaces => ("", ""),
        PriceFormat::Hybrid => (" ", ""),
    };

    let mut out = quantity;
    if !line.unit.is_empty() {
        out.push_str(gap);
        out.push_str(line.unit);
    }
    out.push_str(&format!(
        "{gap}{sign}{gap}{unit_price}{gap}={gap}{total}{tail_gap}{symbol}"
    ));
    out
}
