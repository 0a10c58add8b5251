use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a VAT rate string such as `"23%"` into a fraction (`0.23`).
///
/// Every character other than ASCII digits and `.` is discarded before
/// parsing, so `"23 %"`, `"VAT 23%"` and `"23"` all give the same result.
/// Returns `None` when nothing numeric remains.
pub fn parse_vat_rate(rate: &str) -> Option<Decimal> {
    let digits: String = rate
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    let percent = Decimal::from_str(&digits).ok()?;
    Some(percent / Decimal::ONE_HUNDRED)
}
