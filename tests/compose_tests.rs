use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use receipt_synth::compose::*;
use receipt_synth::config::{ContentConfig, SynthConfig};
use receipt_synth::core::BoxRect;
use receipt_synth::corpus::Corpus;
use receipt_synth::layout::Section;
use receipt_synth::synth::{ReceiptSynth, content_rect};
use rust_decimal::Decimal;

const CORPUS: &str = include_str!("../data/receipt_corpus.json");

fn corpus() -> Arc<Corpus> {
    Arc::new(Corpus::from_json_str(CORPUS).unwrap())
}

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 20)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn composer() -> ContentComposer {
    ContentComposer::new(ContentConfig::default(), corpus()).with_reference_time(reference())
}

fn rect() -> BoxRect {
    BoxRect::new(15, 40, 300, 1600)
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_receipt() {
    let a = composer().compose(rect(), &mut StdRng::seed_from_u64(99)).unwrap();
    let b = composer().compose(rect(), &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a.structured).unwrap(),
        serde_json::to_string(&b.structured).unwrap()
    );
}

#[test]
fn same_seed_same_samples() {
    let run = || {
        let mut synth =
            ReceiptSynth::new(SynthConfig::default(), corpus(), 5).with_reference_time(reference());
        (0..5)
            .map(|_| serde_json::to_vec(&synth.generate().unwrap().structured).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn different_seeds_differ() {
    let a = composer().compose(rect(), &mut StdRng::seed_from_u64(1)).unwrap();
    let b = composer().compose(rect(), &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a.texts(), b.texts());
}

// ---------------------------------------------------------------------------
// Render plan
// ---------------------------------------------------------------------------

#[test]
fn items_are_drawable_and_non_empty() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..30 {
        let receipt = composer.compose(rect(), &mut rng).unwrap();
        assert_eq!(receipt.boxes().len(), receipt.texts().len());
        for item in &receipt.items {
            assert!(!item.text.is_empty());
            assert!(item.rect.is_drawable());
        }
        assert_eq!(receipt.dropped_products, 0);
    }
}

#[test]
fn items_follow_render_order() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..30 {
        let receipt = composer.compose(rect(), &mut rng).unwrap();
        let positions: Vec<usize> = receipt
            .items
            .iter()
            .map(|i| {
                Section::RENDER_ORDER
                    .iter()
                    .position(|s| *s == i.section)
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn price_lines_use_receipt_formatting() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..30 {
        let receipt = composer.compose(rect(), &mut rng).unwrap();
        let sign = &receipt.formatting.multiply_sign;
        let sep = &receipt.formatting.decimal_separator;
        let prices: Vec<&RenderItem> = receipt
            .section(Section::Products)
            .filter(|i| i.align == receipt_synth::core::Align::Right)
            .collect();
        assert_eq!(prices.len(), receipt.structured.products.len());
        for (item, product) in prices.iter().zip(&receipt.structured.products) {
            assert!(item.text.contains(sign.as_str()), "{}", item.text);
            let total = receipt_synth::format::format_number(product.total_price, sep, 2);
            assert!(item.text.contains(&total), "{} lacks {total}", item.text);
        }
    }
}

#[test]
fn weighed_goods_show_three_decimals() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(6);
    let mut checked = 0;
    for _ in 0..40 {
        let receipt = composer.compose(rect(), &mut rng).unwrap();
        let sep = receipt.formatting.decimal_separator.clone();
        let prices: Vec<&RenderItem> = receipt
            .section(Section::Products)
            .filter(|i| i.align == receipt_synth::core::Align::Right)
            .collect();
        for (item, product) in prices.iter().zip(&receipt.structured.products) {
            if product.unit == "kg" {
                let qty = receipt_synth::format::format_number(product.quantity, &sep, 3);
                assert!(item.text.starts_with(&qty), "{} lacks {qty}", item.text);
                assert!(item.text.contains("kg"));
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn total_row_is_bold_and_matches_ground_truth() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(7);
    let receipt = composer.compose(rect(), &mut rng).unwrap();
    let total: Vec<&RenderItem> = receipt.section(Section::TotalSum).collect();
    assert_eq!(total.len(), 2);
    assert!(total.iter().all(|i| i.emphasis.bold && i.emphasis.size_factor == 0.9));
    assert_eq!(total[0].text, receipt.formatting.sum_label);
    let amount = receipt_synth::format::format_number(
        receipt.structured.total,
        &receipt.formatting.decimal_separator,
        2,
    );
    assert!(total[1].text.starts_with(&amount));
}

// ---------------------------------------------------------------------------
// Ground truth
// ---------------------------------------------------------------------------

#[test]
fn structured_total_is_sum_of_products() {
    let composer = composer();
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..30 {
        let receipt = composer.compose(rect(), &mut rng).unwrap();
        let sum: Decimal = receipt
            .structured
            .products
            .iter()
            .map(|p| p.total_price)
            .sum();
        assert_eq!(receipt.structured.total, sum);
        assert!(!receipt.structured.shop.address.is_empty());
    }
}

#[test]
fn ground_truth_json_shape() {
    let receipt = composer().compose(rect(), &mut StdRng::seed_from_u64(9)).unwrap();
    let value = serde_json::to_value(receipt.structured.ground_truth()).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert!(value["shop"]["name"].is_string());
    assert!(value["total"].is_number());
    for product in value["products"].as_array().unwrap() {
        assert!(product["quantity"].is_number());
        assert!(product["unit_price"].is_number());
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

#[test]
fn sample_label_is_joined_texts() {
    let mut synth =
        ReceiptSynth::new(SynthConfig::default(), corpus(), 11).with_reference_time(reference());
    let sample = synth.generate().unwrap();
    assert!(!sample.label.contains("  "));
    assert!(sample.label.starts_with(&sample.structured.shop.name));
    assert!((70..=95).contains(&sample.quality));
    let (w, h) = sample.document_size;
    assert_eq!(sample.roi[2], [w as i32, h as i32]);
}

#[test]
fn sample_items_inside_content_rect() {
    let mut synth =
        ReceiptSynth::new(SynthConfig::default(), corpus(), 12).with_reference_time(reference());
    for _ in 0..10 {
        let sample = synth.generate().unwrap();
        let content = content_rect(sample.document_size, 0.05);
        for item in &sample.items {
            assert!(item.rect.x >= content.x);
            assert!(item.rect.right() <= content.right());
        }
    }
}
