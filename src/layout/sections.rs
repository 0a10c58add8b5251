use serde::{Deserialize, Serialize};

use super::Section;
use crate::core::{BoxPair, PlacedBox, ReceiptData};

/// How a product name was wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NameWrap {
    /// Name and price share one overlapping row.
    Short,
    /// Full-width name row, then a full-width price row.
    Medium,
    /// Name cut into fixed-width chunks, one row each.
    VeryLong {
        /// Whether the last chunk shares its row with the price.
        price_inline: bool,
    },
}

/// One printed fragment of a product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameLine {
    pub placed: PlacedBox,
    pub text: String,
}

/// Box group for one product: its name fragments and its price box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub wrap: NameWrap,
    pub name_lines: Vec<NameLine>,
    pub price: PlacedBox,
}

impl ProductRow {
    /// All boxes of the group, name fragments first; the price box is last.
    pub fn boxes(&self) -> Vec<PlacedBox> {
        self.name_lines
            .iter()
            .map(|line| line.placed)
            .chain(std::iter::once(self.price))
            .collect()
    }
}

/// Net and tax rows for one VAT symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRows {
    pub symbol: String,
    pub net: BoxPair,
    pub tax: BoxPair,
}

/// Character budget of the content column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub content_width: i32,
    /// Estimated characters per full-width line, at least 1.
    pub max_chars_per_line: usize,
    pub half_width_chars: usize,
}

impl TextMetrics {
    pub fn new(content_width: i32, chars_per_px: f64) -> Self {
        let estimate = (f64::from(content_width) / chars_per_px) as usize;
        let max_chars_per_line = estimate.max(1);
        Self {
            content_width,
            max_chars_per_line,
            half_width_chars: max_chars_per_line / 2,
        }
    }

    /// Wrapping class for a name of `len` characters.
    pub fn classify(&self, len: usize) -> NameClass {
        if len > self.max_chars_per_line {
            NameClass::VeryLong
        } else if len > self.half_width_chars {
            NameClass::Medium
        } else {
            NameClass::Short
        }
    }
}

/// Name length class used to pick a product row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    Short,
    Medium,
    VeryLong,
}

/// Positioned boxes of every receipt section.
///
/// Separators that were not drawn are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoxes {
    pub shop_name: PlacedBox,
    pub shop_address: PlacedBox,
    pub shop_tax_id: PlacedBox,
    pub header_separator: Option<PlacedBox>,
    /// Date on the left, receipt number on the right.
    pub date_number: BoxPair,
    pub receipt_header: PlacedBox,
    pub title_separator: Option<PlacedBox>,
    pub products: Vec<ProductRow>,
    pub products_separator: Option<PlacedBox>,
    pub vat_summary: Vec<VatRows>,
    pub vat_separator: Option<PlacedBox>,
    pub total_sum: BoxPair,
    pub payment_method: BoxPair,
    pub payment_separator: Option<PlacedBox>,
    pub footer: PlacedBox,
}

impl SectionBoxes {
    /// Boxes of one section in drawing order; empty for an absent separator.
    pub fn section(&self, section: Section) -> Vec<PlacedBox> {
        match section {
            Section::ShopName => vec![self.shop_name],
            Section::ShopAddress => vec![self.shop_address],
            Section::ShopTaxId => vec![self.shop_tax_id],
            Section::HeaderSeparator => self.header_separator.into_iter().collect(),
            Section::DateNumber => self.date_number.boxes().to_vec(),
            Section::ReceiptHeader => vec![self.receipt_header],
            Section::TitleSeparator => self.title_separator.into_iter().collect(),
            Section::Products => self.products.iter().flat_map(ProductRow::boxes).collect(),
            Section::ProductsSeparator => self.products_separator.into_iter().collect(),
            Section::VatSummary => self
                .vat_summary
                .iter()
                .flat_map(|rows| rows.net.boxes().into_iter().chain(rows.tax.boxes()))
                .collect(),
            Section::VatSeparator => self.vat_separator.into_iter().collect(),
            Section::TotalSum => self.total_sum.boxes().to_vec(),
            Section::PaymentMethod => self.payment_method.boxes().to_vec(),
            Section::PaymentSeparator => self.payment_separator.into_iter().collect(),
            Section::Footer => vec![self.footer],
        }
    }

    /// Whether a section has at least one box.
    pub fn contains(&self, section: Section) -> bool {
        !self.section(section).is_empty()
    }

    /// Every box in rendering order.
    pub fn all(&self) -> Vec<PlacedBox> {
        Section::RENDER_ORDER
            .iter()
            .flat_map(|s| self.section(*s))
            .collect()
    }
}

/// A complete receipt layout: boxes, the content drawn for them, the text
/// metrics used for wrapping and the cursor position after the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLayout {
    pub boxes: SectionBoxes,
    pub data: ReceiptData,
    pub metrics: TextMetrics,
    pub bottom: i32,
}
