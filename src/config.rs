//! Generator configuration.
//!
//! Configuration is JSON. Every section implements `Default` and is marked
//! `#[serde(default)]`, so a user file only needs the keys it changes: any
//! key it omits, at any depth, keeps its documented default.
//!
//! ```rust
//! use receipt_synth::config::SynthConfig;
//!
//! let cfg = SynthConfig::from_json_str(r#"{"document": {"content": {"margin": 0.08}}}"#).unwrap();
//! assert_eq!(cfg.document.content.margin, 0.08);
//! assert_eq!(cfg.document.content.products_count, [3, 15]);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{
    SynthError, ValidationError, check_not_empty, check_positive_range, check_probability,
    check_range, check_weights, join_errors,
};
use crate::format::{FormattingConfig, WeightedOption};

/// Probability used for a separator location that has no configured value.
pub const DEFAULT_SEPARATOR_PROBABILITY: f64 = 0.8;

/// Top-level configuration: canvas sampling, quality and dataset split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// JPEG quality range written with each sample.
    pub quality: [u32; 2],
    /// Probability of a landscape canvas.
    pub landscape: f64,
    /// Range of the canvas' short side in pixels.
    pub short_size: [u32; 2],
    /// Range of long/short side ratio.
    pub aspect_ratio: [f64; 2],
    /// Train / validation / test proportions.
    pub split_ratio: [f64; 3],
    pub document: DocumentConfig,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            quality: [70, 95],
            landscape: 0.0,
            short_size: [480, 720],
            aspect_ratio: [2.0, 4.0],
            split_ratio: [0.7, 0.15, 0.15],
            document: DocumentConfig::default(),
        }
    }
}

impl SynthConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, SynthError> {
        let config: SynthConfig = serde_json::from_str(json)
            .map_err(|e| SynthError::Config(format!("malformed configuration: {e}")))?;
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(SynthError::Config(join_errors(&errors)));
        }
        Ok(config)
    }
}

/// Paper document placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Probability that the document fills the whole canvas.
    pub fullscreen: f64,
    pub landscape: f64,
    pub short_size: [u32; 2],
    pub aspect_ratio: [f64; 2],
    pub content: ContentConfig,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            fullscreen: 1.0,
            landscape: 0.0,
            short_size: [250, 480],
            aspect_ratio: [2.0, 3.0],
            content: ContentConfig::default(),
        }
    }
}

/// Receipt content: margin, product count, corpus location and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Margin as a fraction of the document size, applied per side.
    pub margin: f64,
    /// Inclusive range of products per receipt.
    pub products_count: [usize; 2],
    pub corpus_path: PathBuf,
    pub formatting: FormattingConfig,
    pub layout: LayoutConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            margin: 0.05,
            products_count: [3, 15],
            corpus_path: PathBuf::from("receipt_corpus.json"),
            formatting: FormattingConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Vertical-flow layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Range of the receipt title's font scale.
    pub header_scale: [f64; 2],
    pub heights: Heights,
    pub spacing: Spacing,
    pub separators: SeparatorConfig,
    pub date_range: DateRange,
    pub geometry: Geometry,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_scale: [0.7, 0.9],
            heights: Heights::default(),
            spacing: Spacing::default(),
            separators: SeparatorConfig::default(),
            date_range: DateRange::default(),
            geometry: Geometry::default(),
        }
    }
}

/// Row heights in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heights {
    pub shop_name: i32,
    pub shop_address: i32,
    pub shop_tax_id: i32,
    pub date_number: i32,
    pub receipt_header: i32,
    pub separator: i32,
    pub product: i32,
    pub vat_line: i32,
    pub total_sum: i32,
    pub payment_method: i32,
    pub footer: i32,
}

impl Default for Heights {
    fn default() -> Self {
        Self {
            shop_name: 25,
            shop_address: 20,
            shop_tax_id: 20,
            date_number: 20,
            receipt_header: 30,
            separator: 15,
            product: 25,
            vat_line: 20,
            total_sum: 30,
            payment_method: 20,
            footer: 20,
        }
    }
}

/// Extra vertical gaps in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub after_shop_name: i32,
    pub after_date_number: i32,
    pub after_receipt_header: i32,
    pub after_separator: i32,
    pub before_products: i32,
    pub before_payment: i32,
    pub after_payment: i32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_shop_name: 5,
            after_date_number: 5,
            after_receipt_header: 5,
            after_separator: 5,
            before_products: 10,
            before_payment: 10,
            after_payment: 10,
        }
    }
}

/// One separator glyph option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatorType {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Fixed length factor; overrides the drawn one when set.
    #[serde(default)]
    pub length: Option<f64>,
}

fn default_weight() -> f64 {
    1.0
}

impl SeparatorType {
    pub fn new(symbol: &str, name: &str, weight: f64, length: Option<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            weight,
            length,
        }
    }
}

/// Probability that a separator is drawn at each location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatorLocations {
    pub header: f64,
    pub title: f64,
    pub products: f64,
    pub vat: f64,
    pub payment: f64,
    pub footer: f64,
}

impl Default for SeparatorLocations {
    fn default() -> Self {
        Self {
            header: 0.9,
            title: 0.95,
            products: 0.8,
            vat: 0.6,
            payment: 0.7,
            footer: 0.85,
        }
    }
}

impl SeparatorLocations {
    /// Probability for a named location; unknown names get
    /// [`DEFAULT_SEPARATOR_PROBABILITY`].
    pub fn probability(&self, location: &str) -> f64 {
        match location {
            "header" => self.header,
            "title" => self.title,
            "products" => self.products,
            "vat" => self.vat,
            "payment" => self.payment,
            "footer" => self.footer,
            _ => DEFAULT_SEPARATOR_PROBABILITY,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("header", self.header),
            ("title", self.title),
            ("products", self.products),
            ("vat", self.vat),
            ("payment", self.payment),
            ("footer", self.footer),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatorConfig {
    pub types: Vec<SeparatorType>,
    pub locations: SeparatorLocations,
    /// Range of the drawn length factor (fraction of box width, in glyphs).
    pub length: [f64; 2],
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            types: vec![
                SeparatorType::new("-", "dash", 6.0, Some(0.4)),
                SeparatorType::new(".", "dot", 2.0, Some(0.5)),
                SeparatorType::new("*", "star", 2.0, Some(0.21)),
            ],
            locations: SeparatorLocations::default(),
            length: [0.34, 0.36],
        }
    }
}

/// Bounds for the printed date and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub min_days_back: i64,
    pub max_days_back: i64,
    pub min_hour: u32,
    pub max_hour: u32,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            min_days_back: 0,
            max_days_back: 730,
            min_hour: 8,
            max_hour: 21,
        }
    }
}

/// Width fractions and text-width estimate, tuned for the default font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Average glyph width in pixels, used to estimate characters per line.
    pub chars_per_px: f64,
    /// Gap above the first row.
    pub top_padding: i32,
    /// Share of the date/number row given to the date.
    pub date_split: f64,
    /// Label and amount shares of VAT, total and payment rows.
    pub label_width: f64,
    pub amount_width: f64,
    /// Overlapping name/price row for short names.
    pub short_name_width: f64,
    pub short_price_width: f64,
    pub short_overlap: f64,
    /// Overlapping row for the tail of a wrapped long name.
    pub tail_name_width: f64,
    pub tail_price_width: f64,
    pub tail_overlap: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            chars_per_px: 8.7,
            top_padding: 10,
            date_split: 0.5,
            label_width: 0.6,
            amount_width: 0.4,
            short_name_width: 0.6,
            short_price_width: 0.65,
            short_overlap: 0.25,
            tail_name_width: 0.5,
            tail_price_width: 0.65,
            tail_overlap: 0.15,
        }
    }
}

/// Read, parse and validate a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<SynthConfig, SynthError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| SynthError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = SynthConfig::from_json_str(&json)?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Check a configuration for inverted ranges, out-of-range probabilities,
/// bad weights and unusable geometry. Returns all problems found.
pub fn validate_config(config: &SynthConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_range("quality", &config.quality, &mut errors);
    if config.quality[1] > 100 {
        errors.push(ValidationError::new("quality", "must not exceed 100"));
    }
    check_probability("landscape", config.landscape, &mut errors);
    check_range("short_size", &config.short_size, &mut errors);
    check_positive_range("aspect_ratio", &config.aspect_ratio, &mut errors);

    if config.split_ratio.iter().any(|r| !r.is_finite() || *r < 0.0) {
        errors.push(ValidationError::new(
            "split_ratio",
            "ratios must be non-negative",
        ));
    } else if config.split_ratio.iter().sum::<f64>() <= 0.0 {
        errors.push(ValidationError::new(
            "split_ratio",
            "ratios must sum to a positive value",
        ));
    }

    let doc = &config.document;
    check_probability("document.fullscreen", doc.fullscreen, &mut errors);
    check_probability("document.landscape", doc.landscape, &mut errors);
    check_range("document.short_size", &doc.short_size, &mut errors);
    check_positive_range("document.aspect_ratio", &doc.aspect_ratio, &mut errors);

    let content = &doc.content;
    if !(0.0..0.5).contains(&content.margin) {
        errors.push(ValidationError::new(
            "document.content.margin",
            format!("margin {} must be within [0, 0.5)", content.margin),
        ));
    }
    check_range(
        "document.content.products_count",
        &content.products_count,
        &mut errors,
    );
    validate_formatting(&content.formatting, &mut errors);
    validate_layout(&content.layout, &mut errors);

    errors
}

fn weights<T>(options: &[WeightedOption<T>]) -> impl Iterator<Item = f64> + '_ {
    options.iter().map(|o| o.weight)
}

fn validate_formatting(fmt: &FormattingConfig, errors: &mut Vec<ValidationError>) {
    let prefix = "document.content.formatting";
    check_weights(
        &format!("{prefix}.multiply_signs"),
        weights(&fmt.multiply_signs),
        errors,
    );
    check_weights(
        &format!("{prefix}.unit_formats"),
        weights(&fmt.unit_formats),
        errors,
    );
    check_weights(
        &format!("{prefix}.decimal_separators"),
        weights(&fmt.decimal_separators),
        errors,
    );
    check_weights(
        &format!("{prefix}.price_formats"),
        weights(&fmt.price_formats),
        errors,
    );
    check_weights(
        &format!("{prefix}.date_formats"),
        weights(&fmt.date_formats),
        errors,
    );
    check_weights(
        &format!("{prefix}.sum_formats"),
        weights(&fmt.sum_formats),
        errors,
    );
    check_weights(
        &format!("{prefix}.receipt_number_formats"),
        weights(&fmt.receipt_number_formats),
        errors,
    );
}

fn validate_layout(layout: &LayoutConfig, errors: &mut Vec<ValidationError>) {
    let prefix = "document.content.layout";
    check_range(&format!("{prefix}.header_scale"), &layout.header_scale, errors);

    let h = &layout.heights;
    let heights = [
        ("shop_name", h.shop_name),
        ("shop_address", h.shop_address),
        ("shop_tax_id", h.shop_tax_id),
        ("date_number", h.date_number),
        ("receipt_header", h.receipt_header),
        ("separator", h.separator),
        ("product", h.product),
        ("vat_line", h.vat_line),
        ("total_sum", h.total_sum),
        ("payment_method", h.payment_method),
        ("footer", h.footer),
    ];
    for (name, value) in heights {
        if value < 0 {
            errors.push(ValidationError::new(
                format!("{prefix}.heights.{name}"),
                "must not be negative",
            ));
        }
    }

    let seps = &layout.separators;
    check_not_empty(&format!("{prefix}.separators.types"), &seps.types, errors);
    check_weights(
        &format!("{prefix}.separators.types"),
        seps.types.iter().map(|t| t.weight),
        errors,
    );
    for (i, sep) in seps.types.iter().enumerate() {
        if sep.symbol.is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.separators.types[{i}].symbol"),
                "must not be empty",
            ));
        }
        if sep.length.is_some_and(|length| length < 0.0) {
            errors.push(ValidationError::new(
                format!("{prefix}.separators.types[{i}].length"),
                "must not be negative",
            ));
        }
    }
    for (name, p) in seps.locations.entries() {
        check_probability(&format!("{prefix}.separators.locations.{name}"), p, errors);
    }
    check_range(&format!("{prefix}.separators.length"), &seps.length, errors);

    let dates = &layout.date_range;
    check_range(
        &format!("{prefix}.date_range.days_back"),
        &[dates.min_days_back, dates.max_days_back],
        errors,
    );
    if dates.min_days_back < 0 {
        errors.push(ValidationError::new(
            format!("{prefix}.date_range.min_days_back"),
            "must not be negative",
        ));
    }
    check_range(
        &format!("{prefix}.date_range.hour"),
        &[dates.min_hour, dates.max_hour],
        errors,
    );
    if dates.max_hour > 23 {
        errors.push(ValidationError::new(
            format!("{prefix}.date_range.max_hour"),
            "must not exceed 23",
        ));
    }

    let chars_per_px = layout.geometry.chars_per_px;
    if chars_per_px.is_nan() || chars_per_px <= 0.0 {
        errors.push(ValidationError::new(
            format!("{prefix}.geometry.chars_per_px"),
            "must be positive",
        ));
    }
}
