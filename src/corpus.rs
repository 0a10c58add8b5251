//! Text corpus: shop names, addresses, product catalog and quantity ranges.
//!
//! The corpus is a JSON document loaded once at startup and shared
//! read-only by every generated receipt. It is validated structurally on
//! load; a corpus that passes validation never makes generation fail.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{
    PaymentMethod, SynthError, ValidationError, check_not_empty, check_range, check_weights,
    join_errors,
};
use crate::core::units;
use crate::vat::parse_vat_rate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub addresses: Vec<String>,
    pub tax_ids: Vec<String>,
}

/// A product template the generator draws line items from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub unit: String,
    /// Inclusive unit price bounds in PLN.
    pub price_range: [f64; 2],
    pub vat_symbol: String,
    /// Rate as printed, e.g. "23%".
    pub vat_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub grocery: Vec<CatalogItem>,
}

fn default_weight() -> f64 {
    1.0
}

/// One weighted quantity band, e.g. 1-3 pieces with weight 8.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRange {
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRanges {
    pub ranges: Vec<QuantityRange>,
}

/// The full text corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub shop_names: Vec<ShopName>,
    pub company_info: CompanyInfo,
    pub receipt_headers: Vec<String>,
    pub receipt_footers: Vec<String>,
    pub payment_methods: Vec<PaymentMethod>,
    pub products: ProductCatalog,
    /// Weighted quantity bands keyed by unit. Units without an entry use
    /// the built-in defaults.
    #[serde(default)]
    pub quantity_ranges: BTreeMap<String, QuantityRanges>,
}

impl Corpus {
    /// Parse and validate a corpus from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SynthError> {
        let corpus: Corpus = serde_json::from_str(json)
            .map_err(|e| SynthError::Corpus(format!("malformed corpus: {e}")))?;
        let errors = validate_corpus(&corpus);
        if !errors.is_empty() {
            return Err(SynthError::Corpus(join_errors(&errors)));
        }
        Ok(corpus)
    }
}

/// Read, parse and validate a corpus file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Corpus, SynthError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| SynthError::Corpus(format!("cannot read {}: {e}", path.display())))?;
    let corpus = Corpus::from_json_str(&json)?;
    log::info!(
        "loaded corpus from {}: {} shops, {} products, {} quantity tables",
        path.display(),
        corpus.shop_names.len(),
        corpus.products.grocery.len(),
        corpus.quantity_ranges.len()
    );
    Ok(corpus)
}

/// Check every list the generator draws from is non-empty and every
/// catalog entry is usable. Returns all problems found.
pub fn validate_corpus(corpus: &Corpus) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_not_empty("shop_names", &corpus.shop_names, &mut errors);
    check_not_empty(
        "company_info.addresses",
        &corpus.company_info.addresses,
        &mut errors,
    );
    check_not_empty(
        "company_info.tax_ids",
        &corpus.company_info.tax_ids,
        &mut errors,
    );
    check_not_empty("receipt_headers", &corpus.receipt_headers, &mut errors);
    check_not_empty("receipt_footers", &corpus.receipt_footers, &mut errors);
    check_not_empty("payment_methods", &corpus.payment_methods, &mut errors);
    check_not_empty("products.grocery", &corpus.products.grocery, &mut errors);

    for (i, item) in corpus.products.grocery.iter().enumerate() {
        let field = format!("products.grocery[{i}]");
        if item.name.is_empty() {
            errors.push(ValidationError::new(
                format!("{field}.name"),
                "must not be empty",
            ));
        }
        if item.vat_symbol.is_empty() {
            errors.push(ValidationError::new(
                format!("{field}.vat_symbol"),
                "must not be empty",
            ));
        }
        if parse_vat_rate(&item.vat_rate).is_none() {
            errors.push(ValidationError::new(
                format!("{field}.vat_rate"),
                format!("cannot parse VAT rate '{}'", item.vat_rate),
            ));
        }
        if item.price_range[0] < 0.0 {
            errors.push(ValidationError::new(
                format!("{field}.price_range"),
                "prices must not be negative",
            ));
        }
        check_range(&format!("{field}.price_range"), &item.price_range, &mut errors);
    }

    for (unit, table) in &corpus.quantity_ranges {
        let field = format!("quantity_ranges.{unit}.ranges");
        check_not_empty(&field, &table.ranges, &mut errors);
        check_weights(&field, table.ranges.iter().map(|r| r.weight), &mut errors);
        for (i, range) in table.ranges.iter().enumerate() {
            if range.min < 0.0 {
                errors.push(ValidationError::new(
                    format!("{field}[{i}].min"),
                    "must not be negative",
                ));
            }
            check_range(&format!("{field}[{i}]"), &[range.min, range.max], &mut errors);
            if !units::is_fractional_unit(unit) && range.min.ceil() > range.max.floor() {
                errors.push(ValidationError::new(
                    format!("{field}[{i}]"),
                    format!(
                        "no whole quantity in [{}, {}] for unit '{unit}'",
                        range.min, range.max
                    ),
                ));
            }
        }
    }

    for (i, method) in corpus.payment_methods.iter().enumerate() {
        if method.method.is_empty() {
            errors.push(ValidationError::new(
                format!("payment_methods[{i}].method"),
                "must not be empty",
            ));
        }
    }

    errors
}
