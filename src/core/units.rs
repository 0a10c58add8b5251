//! Units of measure used on receipts.
//!
//! Only a handful of units change behaviour: weighed goods get fractional
//! quantities and keep their own unit name when printed; every other unit is
//! treated as a piece count whose printed label is chosen per receipt.

/// Kilograms. The only unit drawn with fractional quantities.
pub const KILOGRAM: &str = "kg";

/// Litres.
pub const LITRE: &str = "l";

/// Units printed verbatim and with 3 decimal places.
static MEASURED_UNITS: &[&str] = &[KILOGRAM, LITRE];

/// Whether quantities for `unit` are drawn with 2 decimal places.
pub fn is_fractional_unit(unit: &str) -> bool {
    unit == KILOGRAM
}

/// Whether `unit` is printed as-is instead of the receipt's piece label.
pub fn is_measured_unit(unit: &str) -> bool {
    MEASURED_UNITS.contains(&unit)
}

/// Decimal places used when printing a quantity in `unit`.
pub fn quantity_decimals(unit: &str) -> u32 {
    if is_measured_unit(unit) { 3 } else { 0 }
}

/// Label printed for `unit`, given the receipt's chosen piece label.
pub fn display_unit<'a>(unit: &'a str, piece_label: &'a str) -> &'a str {
    if is_measured_unit(unit) {
        unit
    } else {
        piece_label
    }
}
