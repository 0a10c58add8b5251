//! Vertical-flow receipt layout.
//!
//! [`LayoutEngine`] walks a content rectangle top to bottom, placing one
//! group of boxes per receipt section. It also draws the receipt's random
//! content (title, date, number, products, payment method), because the
//! number of product rows depends on the generated product names.
//!
//! Product rows are chosen by name length against the column's estimated
//! character budget ([`TextMetrics`]):
//!
//! | Name length | Rows |
//! |-------------|------|
//! | ≤ half line | name and price overlapping on one row |
//! | ≤ full line | name row, then price row |
//! | > full line | one row per chunk; the last chunk shares the price row if it fits in half a line |

mod details;
mod engine;
mod flow;
mod sections;

pub use details::{ReceiptDetails, draw_details};
pub use engine::LayoutEngine;
pub use flow::FlowCursor;
pub use sections::*;

use serde::{Deserialize, Serialize};

/// Named receipt region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ShopName,
    ShopAddress,
    ShopTaxId,
    HeaderSeparator,
    DateNumber,
    ReceiptHeader,
    TitleSeparator,
    Products,
    ProductsSeparator,
    VatSummary,
    VatSeparator,
    TotalSum,
    PaymentMethod,
    PaymentSeparator,
    Footer,
}

impl Section {
    /// All sections in the order they are rendered.
    pub const RENDER_ORDER: [Section; 15] = [
        Section::ShopName,
        Section::ShopAddress,
        Section::ShopTaxId,
        Section::HeaderSeparator,
        Section::DateNumber,
        Section::ReceiptHeader,
        Section::TitleSeparator,
        Section::Products,
        Section::ProductsSeparator,
        Section::VatSummary,
        Section::VatSeparator,
        Section::TotalSum,
        Section::PaymentMethod,
        Section::PaymentSeparator,
        Section::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShopName => "shop_name",
            Self::ShopAddress => "shop_address",
            Self::ShopTaxId => "shop_tax_id",
            Self::HeaderSeparator => "header_separator",
            Self::DateNumber => "date_number",
            Self::ReceiptHeader => "receipt_header",
            Self::TitleSeparator => "title_separator",
            Self::Products => "products",
            Self::ProductsSeparator => "products_separator",
            Self::VatSummary => "vat_summary",
            Self::VatSeparator => "vat_separator",
            Self::TotalSum => "total_sum",
            Self::PaymentMethod => "payment_method",
            Self::PaymentSeparator => "payment_separator",
            Self::Footer => "footer",
        }
    }

    /// Separator location name (`"header"`, `"vat"`, ...) for separator
    /// sections, `None` otherwise.
    pub fn separator_location(&self) -> Option<&'static str> {
        match self {
            Self::HeaderSeparator => Some("header"),
            Self::TitleSeparator => Some("title"),
            Self::ProductsSeparator => Some("products"),
            Self::VatSeparator => Some("vat"),
            Self::PaymentSeparator => Some("payment"),
            _ => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.separator_location().is_some()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
