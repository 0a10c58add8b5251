use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::{Product, round_money};

/// Quantities serialize as JSON integers when whole, floats otherwise.
fn quantity_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    match value.to_i64() {
        Some(whole) if value.fract().is_zero() => serializer.serialize_i64(whole),
        _ => serializer.serialize_f64(value.to_f64().unwrap_or_default()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub name: String,
    pub address: String,
}

/// One product as recorded in the ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredProduct {
    pub name: String,
    #[serde(serialize_with = "quantity_number")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl From<&Product> for StructuredProduct {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            quantity: p.quantity,
            unit: p.unit.clone(),
            unit_price: round_money(p.unit_price),
            total_price: round_money(p.total_price),
        }
    }
}

/// Machine-readable content of a receipt, independent of how it was
/// printed: amounts are plain 2-decimal numbers whatever the separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    pub shop: ShopInfo,
    pub date: String,
    pub number: String,
    pub products: Vec<StructuredProduct>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl StructuredData {
    /// The reduced record stored in dataset metadata.
    pub fn ground_truth(&self) -> GroundTruth {
        GroundTruth {
            shop: ShopName {
                name: self.shop.name.clone(),
            },
            products: self.products.clone(),
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopName {
    pub name: String,
}

/// Metadata record: shop name, products and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub shop: ShopName,
    pub products: Vec<StructuredProduct>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
