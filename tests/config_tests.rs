use std::io::Write;

use receipt_synth::SynthError;
use receipt_synth::config::*;
use receipt_synth::corpus::*;
use tempfile::NamedTempFile;

const CORPUS: &str = include_str!("../data/receipt_corpus.json");

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn defaults_are_valid() {
    assert!(validate_config(&SynthConfig::default()).is_empty());
}

#[test]
fn documented_defaults() {
    let config = SynthConfig::default();
    assert_eq!(config.quality, [70, 95]);
    assert_eq!(config.split_ratio, [0.7, 0.15, 0.15]);
    let content = &config.document.content;
    assert_eq!(content.margin, 0.05);
    assert_eq!(content.products_count, [3, 15]);
    assert_eq!(content.layout.header_scale, [0.7, 0.9]);
    assert_eq!(content.layout.geometry.chars_per_px, 8.7);
    assert_eq!(content.layout.separators.length, [0.34, 0.36]);
    assert_eq!(content.layout.separators.locations.probability("vat"), 0.6);
}

#[test]
fn partial_file_merges_over_defaults() {
    let config = SynthConfig::from_json_str(
        r#"{"document": {"content": {"layout": {"separators": {"locations": {"vat": 0.1}}}}}}"#,
    )
    .unwrap();
    let locations = &config.document.content.layout.separators.locations;
    assert_eq!(locations.vat, 0.1);
    assert_eq!(locations.header, 0.9);
    assert_eq!(config.document.content.layout.separators.types.len(), 3);
    assert_eq!(config.quality, [70, 95]);
}

#[test]
fn unknown_location_uses_fallback() {
    let locations = SeparatorLocations::default();
    assert_eq!(locations.probability("nowhere"), DEFAULT_SEPARATOR_PROBABILITY);
}

#[test]
fn inverted_ranges_rejected() {
    let err = SynthConfig::from_json_str(r#"{"quality": [95, 70]}"#).unwrap_err();
    assert!(matches!(err, SynthError::Config(ref m) if m.contains("quality")));
}

#[test]
fn all_problems_reported() {
    let mut config = SynthConfig::default();
    config.document.content.margin = 0.5;
    config.document.fullscreen = 1.5;
    config.split_ratio = [0.0, 0.0, 0.0];
    let errors = validate_config(&config);
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"document.content.margin"));
    assert!(fields.contains(&"document.fullscreen"));
    assert!(fields.contains(&"split_ratio"));
}

#[test]
fn malformed_config_is_config_error() {
    assert!(matches!(
        SynthConfig::from_json_str("{not json"),
        Err(SynthError::Config(_))
    ));
}

#[test]
fn load_config_from_file() {
    let file = write_temp(r#"{"landscape": 0.25}"#);
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.landscape, 0.25);
}

#[test]
fn missing_config_file() {
    assert!(matches!(
        load_config("/nonexistent/receipt-config.json"),
        Err(SynthError::Config(_))
    ));
}

#[test]
fn bundled_config_is_valid() {
    let config = SynthConfig::from_json_str(include_str!("../data/config.json")).unwrap();
    assert_eq!(
        config.document.content.corpus_path.to_str(),
        Some("data/receipt_corpus.json")
    );
}

// ---------------------------------------------------------------------------
// Corpus
// ---------------------------------------------------------------------------

#[test]
fn bundled_corpus_is_valid() {
    let corpus = Corpus::from_json_str(CORPUS).unwrap();
    assert!(validate_corpus(&corpus).is_empty());
    assert!(corpus.quantity_ranges.contains_key("kg"));
}

#[test]
fn missing_corpus_file() {
    let err = load_corpus("/nonexistent/receipt_corpus.json").unwrap_err();
    assert!(matches!(err, SynthError::Corpus(ref m) if m.contains("cannot read")));
}

#[test]
fn malformed_corpus() {
    let file = write_temp(r#"{"shop_names": "#);
    assert!(matches!(load_corpus(file.path()), Err(SynthError::Corpus(_))));
}

#[test]
fn empty_lists_rejected() {
    let json = r#"{
        "shop_names": [],
        "company_info": {"addresses": [], "tax_ids": ["NIP 1"]},
        "receipt_headers": ["PARAGON FISKALNY"],
        "receipt_footers": ["Dziękujemy"],
        "payment_methods": [{"method": "Karta"}],
        "products": {"grocery": [
            {"name": "Chleb", "unit": "szt.", "price_range": [5.0, 3.0], "vat_symbol": "C", "vat_rate": "pięć"}
        ]}
    }"#;
    let err = Corpus::from_json_str(json).unwrap_err();
    let SynthError::Corpus(message) = err else {
        panic!("expected corpus error");
    };
    assert!(message.contains("shop_names"));
    assert!(message.contains("company_info.addresses"));
    assert!(message.contains("products.grocery[0].vat_rate"));
    assert!(message.contains("products.grocery[0].price_range"));
}

#[test]
fn payment_method_keeps_extra_fields() {
    let corpus = Corpus::from_json_str(CORPUS).unwrap();
    let card = corpus
        .payment_methods
        .iter()
        .find(|m| m.method == "Karta")
        .unwrap();
    assert!(card.extra.contains_key("card_types"));
}
