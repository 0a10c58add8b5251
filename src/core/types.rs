use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Round a monetary amount to 2 decimal places.
///
/// Uses banker's rounding (midpoint to even), the behaviour of the
/// generator's reference pricing.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// A single line item printed on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name as printed.
    pub name: String,
    /// Quantity: integral for count units, 2 decimals for "kg".
    pub quantity: Decimal,
    /// Unit of measure from the corpus ("kg", "l", "szt.", ...).
    pub unit: String,
    /// Price per unit, 2 decimals.
    pub unit_price: Decimal,
    /// Line total, always `round(quantity * unit_price, 2)`.
    pub total_price: Decimal,
    /// VAT category tag ("A", "B", ...).
    pub vat_symbol: String,
    /// VAT rate as written in the corpus (e.g. "23%").
    pub vat_rate: String,
}

impl Product {
    /// Build a product, deriving the line total from quantity and unit price.
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
        vat_symbol: impl Into<String>,
        vat_rate: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            total_price: round_money(quantity * unit_price),
            vat_symbol: vat_symbol.into(),
            vat_rate: vat_rate.into(),
        }
    }
}

/// Net and tax totals accumulated for one VAT symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatSummaryEntry {
    pub symbol: String,
    /// Rate string of the first product seen with this symbol.
    pub rate: String,
    pub net: Decimal,
    pub tax: Decimal,
}

/// Per-symbol VAT summary, ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatSummary {
    entries: Vec<VatSummaryEntry>,
}

impl VatSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a net/tax pair to `symbol`, creating the entry on first use.
    pub fn accumulate(&mut self, symbol: &str, rate: &str, net: Decimal, tax: Decimal) {
        match self.entries.iter_mut().find(|e| e.symbol == symbol) {
            Some(entry) => {
                entry.net += net;
                entry.tax += tax;
            }
            None => self.entries.push(VatSummaryEntry {
                symbol: symbol.to_string(),
                rate: rate.to_string(),
                net,
                tax,
            }),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&VatSummaryEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VatSummaryEntry> {
        self.entries.iter()
    }

    /// Entries that get printed: those with a positive net amount.
    pub fn printable(&self) -> impl Iterator<Item = &VatSummaryEntry> {
        self.entries.iter().filter(|e| e.net > Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of net + tax over all symbols.
    pub fn gross_total(&self) -> Decimal {
        self.entries.iter().map(|e| e.net + e.tax).sum()
    }
}

/// Payment method record from the corpus.
///
/// Only `method` is interpreted; any other fields are carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub method: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentMethod {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// All randomized content produced alongside one receipt layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    /// Receipt title, e.g. "PARAGON FISKALNY".
    pub header: String,
    /// Fully formatted date line.
    pub date: String,
    /// Receipt number rendered into the chosen template.
    pub number: String,
    pub payment_method: PaymentMethod,
    pub products: Vec<Product>,
    pub vat_summary: VatSummary,
    /// Sum of all product totals.
    pub total_price: Decimal,
}

/// Horizontal alignment of text inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// Integer rectangle in document pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoxRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the rectangle has a positive area.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// `[x, y, width, height]`.
    pub fn to_array(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

/// A rectangle together with the alignment of its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBox {
    pub rect: BoxRect,
    pub align: Align,
}

impl PlacedBox {
    pub fn new(rect: BoxRect, align: Align) -> Self {
        Self { rect, align }
    }
}

/// Two boxes sharing one row: a left-aligned label and a right-aligned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxPair {
    pub left: PlacedBox,
    pub right: PlacedBox,
}

impl BoxPair {
    pub fn boxes(&self) -> [PlacedBox; 2] {
        [self.left, self.right]
    }
}
