//! Random product line items drawn from the corpus catalog.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use crate::core::{Product, SynthError, units};
use crate::corpus::{CatalogItem, Corpus, QuantityRange};
use crate::format::weighted_index;

/// Fallback bounds for weighed goods, in kilograms.
pub const DEFAULT_WEIGHT_RANGE: [f64; 2] = [0.10, 12.00];

/// Fallback bounds for piece-counted goods.
pub const DEFAULT_COUNT_RANGE: [f64; 2] = [1.0, 20.0];

/// Convert a bound to an integer number of hundredths.
fn to_hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Uniform integer in `[lo, hi]`, tolerating an inverted pair.
fn uniform_i64<R: Rng + ?Sized>(lo: i64, hi: i64, rng: &mut R) -> i64 {
    if lo >= hi {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}

/// Draws products from a corpus.
#[derive(Debug, Clone, Copy)]
pub struct ProductGenerator<'a> {
    corpus: &'a Corpus,
}

impl<'a> ProductGenerator<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Generate between `count[0]` and `count[1]` products (inclusive).
    pub fn generate_products<R: Rng + ?Sized>(
        &self,
        count: [usize; 2],
        rng: &mut R,
    ) -> Result<Vec<Product>, SynthError> {
        let [min, max] = count;
        if min > max {
            return Err(SynthError::Generation(format!(
                "product count range [{min}, {max}] is inverted"
            )));
        }
        let n = rng.random_range(min..=max);
        (0..n).map(|_| self.generate_product(rng)).collect()
    }

    /// Generate a single product.
    pub fn generate_product<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Product, SynthError> {
        let item = self
            .corpus
            .products
            .grocery
            .choose(rng)
            .ok_or_else(|| SynthError::Corpus("product catalog is empty".into()))?;
        Ok(self.product_from(item, rng))
    }

    fn product_from<R: Rng + ?Sized>(&self, item: &CatalogItem, rng: &mut R) -> Product {
        let quantity = self.draw_quantity(&item.unit, rng);
        let unit_price = draw_price(item.price_range, rng);
        Product::new(
            item.name.clone(),
            quantity,
            item.unit.clone(),
            unit_price,
            item.vat_symbol.clone(),
            item.vat_rate.clone(),
        )
    }

    /// Draw a quantity for `unit`.
    ///
    /// With a corpus quantity table a band is picked by weight first. "kg"
    /// quantities have 2 decimals, all others are whole numbers.
    pub fn draw_quantity<R: Rng + ?Sized>(&self, unit: &str, rng: &mut R) -> Decimal {
        let bounds = self
            .corpus
            .quantity_ranges
            .get(unit)
            .and_then(|table| pick_band(&table.ranges, rng))
            .unwrap_or(if units::is_fractional_unit(unit) {
                DEFAULT_WEIGHT_RANGE
            } else {
                DEFAULT_COUNT_RANGE
            });

        if units::is_fractional_unit(unit) {
            let hundredths = uniform_i64(to_hundredths(bounds[0]), to_hundredths(bounds[1]), rng);
            Decimal::new(hundredths, 2)
        } else {
            let lo = bounds[0].ceil() as i64;
            let hi = bounds[1].floor() as i64;
            Decimal::from(uniform_i64(lo, hi.max(lo), rng))
        }
    }
}

fn pick_band<R: Rng + ?Sized>(ranges: &[QuantityRange], rng: &mut R) -> Option<[f64; 2]> {
    let index = weighted_index(ranges.iter().map(|r| r.weight), rng)?;
    ranges.get(index).map(|r| [r.min, r.max])
}

/// Uniform unit price within `range`, drawn in whole grosze.
pub fn draw_price<R: Rng + ?Sized>(range: [f64; 2], rng: &mut R) -> Decimal {
    let cents = uniform_i64(to_hundredths(range[0]), to_hundredths(range[1]), rng);
    Decimal::new(cents, 2)
}
