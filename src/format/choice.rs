use rand::Rng;
use serde::{Deserialize, Serialize};

use super::dates::DateStyle;
use super::weighted::{WeightedOption, weighted_choice};
use super::{PriceFormat, PriceStyle};

/// Currency printed after amounts.
pub const CURRENCY: &str = "PLN";

fn pick<R: Rng + ?Sized>(options: &[WeightedOption<String>], fallback: &str, rng: &mut R) -> String {
    weighted_choice(options, rng)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn strings(options: &[(&str, f64)]) -> Vec<WeightedOption<String>> {
    options
        .iter()
        .map(|(value, weight)| WeightedOption::new(value.to_string(), *weight))
        .collect()
}

/// Weighted option tables for the per-receipt formatting draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    pub multiply_signs: Vec<WeightedOption<String>>,
    pub unit_formats: Vec<WeightedOption<String>>,
    pub decimal_separators: Vec<WeightedOption<String>>,
    pub price_formats: Vec<WeightedOption<PriceFormat>>,
    pub date_formats: Vec<WeightedOption<DateStyle>>,
    pub sum_formats: Vec<WeightedOption<String>>,
    pub receipt_number_formats: Vec<WeightedOption<String>>,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            multiply_signs: strings(&[("x", 5.0), ("*", 1.0), ("X", 1.0)]),
            unit_formats: strings(&[("szt.", 1.0), ("szt", 4.0), ("", 2.0)]),
            decimal_separators: strings(&[(".", 1.0), (",", 9.0)]),
            price_formats: vec![
                WeightedOption::new(PriceFormat::Standard, 5.0),
                WeightedOption::new(PriceFormat::NoSpaces, 2.0),
                WeightedOption::new(PriceFormat::Hybrid, 5.0),
            ],
            date_formats: vec![
                WeightedOption::new(DateStyle::Dash, 4.0),
                WeightedOption::new(DateStyle::Dot, 3.0),
                WeightedOption::new(DateStyle::Slash, 2.0),
            ],
            sum_formats: strings(&[("SUMA PLN:", 8.0), ("SUMA:", 1.0), ("RAZEM:", 1.0)]),
            receipt_number_formats: strings(&[
                ("Nr paragonu: {number}", 5.0),
                ("Paragon nr {number}", 3.0),
                ("#{number}", 2.0),
                ("FV {number}", 1.0),
            ]),
        }
    }
}

impl FormattingConfig {
    /// Draw one formatting choice.
    ///
    /// Tables are sampled in declaration order; an empty table yields the
    /// built-in fallback value for that field.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> FormattingChoice {
        let multiply_sign = pick(&self.multiply_signs, "x", rng);
        let unit_format = pick(&self.unit_formats, "szt.", rng);
        let decimal_separator = pick(&self.decimal_separators, ".", rng);
        let price_format = weighted_choice(&self.price_formats, rng)
            .copied()
            .unwrap_or_default();
        let date_style = weighted_choice(&self.date_formats, rng)
            .copied()
            .unwrap_or_default();
        let sum_label = pick(&self.sum_formats, "SUMA PLN:", rng);
        let number_template = pick(&self.receipt_number_formats, "Nr paragonu: {number}", rng);

        FormattingChoice {
            multiply_sign,
            unit_format,
            decimal_separator,
            price_format,
            date_style,
            sum_label,
            number_template,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Stylistic decisions held constant for one whole receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingChoice {
    pub multiply_sign: String,
    /// Label for piece-counted units ("szt.", "szt" or empty).
    pub unit_format: String,
    pub decimal_separator: String,
    pub price_format: PriceFormat,
    pub date_style: DateStyle,
    /// Label of the total row, e.g. "SUMA PLN:".
    pub sum_label: String,
    /// Receipt-number template containing `{number}`.
    pub number_template: String,
    pub currency: String,
}

impl Default for FormattingChoice {
    fn default() -> Self {
        Self {
            multiply_sign: "x".into(),
            unit_format: "szt.".into(),
            decimal_separator: ".".into(),
            price_format: PriceFormat::Standard,
            date_style: DateStyle::Dash,
            sum_label: "SUMA PLN:".into(),
            number_template: "Nr paragonu: {number}".into(),
            currency: CURRENCY.into(),
        }
    }
}

impl FormattingChoice {
    pub fn price_style(&self) -> PriceStyle<'_> {
        PriceStyle::new(&self.multiply_sign, &self.decimal_separator, self.price_format)
    }

    /// Amount text for the total row.
    ///
    /// When the sum label already names the currency the amount is printed
    /// bare, otherwise the currency is appended.
    pub fn sum_amount(&self, amount: &str) -> String {
        if self.sum_label.contains(&self.currency) {
            amount.to_string()
        } else {
            format!("{amount} {}", self.currency)
        }
    }
}
