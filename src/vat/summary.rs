use rust_decimal::Decimal;

use super::rate::parse_vat_rate;
use crate::core::{Product, VatSummary, round_money};

/// Split a gross amount into `(net, tax)` at the given rate.
///
/// `net = round(gross / (1 + rate), 2)` and `tax = round(gross - net, 2)`,
/// so `net + tax == gross` for any 2-decimal gross amount.
pub fn split_gross(gross: Decimal, rate: Decimal) -> (Decimal, Decimal) {
    let net = round_money(gross / (Decimal::ONE + rate));
    let tax = round_money(gross - net);
    (net, tax)
}

/// Build the per-symbol VAT summary for a product list.
///
/// Entries appear in order of each symbol's first product. A rate that
/// cannot be parsed is treated as 0%.
pub fn summarize(products: &[Product]) -> VatSummary {
    let mut summary = VatSummary::new();
    for product in products {
        let rate = parse_vat_rate(&product.vat_rate).unwrap_or(Decimal::ZERO);
        let (net, tax) = split_gross(product.total_price, rate);
        summary.accumulate(&product.vat_symbol, &product.vat_rate, net, tax);
    }
    summary
}
