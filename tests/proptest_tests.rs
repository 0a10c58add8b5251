//! Property-based tests for pricing, VAT and text splitting.
//!
//! Run with: `cargo test --test proptest_tests`

use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use receipt_synth::compose::ContentComposer;
use receipt_synth::config::ContentConfig;
use receipt_synth::core::{BoxRect, Product};
use receipt_synth::corpus::Corpus;
use receipt_synth::format::{format_number, split_long_text};
use receipt_synth::products::ProductGenerator;
use receipt_synth::vat::summarize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CORPUS: &str = include_str!("../data/receipt_corpus.json");

fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_quantity() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..50).prop_map(Decimal::from),
        (10i64..1200).prop_map(|hundredths| Decimal::new(hundredths, 2)),
    ]
}

fn arb_tax() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("A", "23%")),
        Just(("B", "8%")),
        Just(("C", "5%")),
        Just(("D", "0%")),
    ]
}

fn arb_product() -> impl Strategy<Value = Product> {
    (arb_quantity(), arb_price(), arb_tax()).prop_map(|(quantity, price, (symbol, rate))| {
        Product::new("Produkt", quantity, "szt.", price, symbol, rate)
    })
}

proptest! {
    #[test]
    fn generated_totals_are_rounded_products(seed in any::<u64>()) {
        let corpus = Corpus::from_json_str(CORPUS).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let products = ProductGenerator::new(&corpus)
            .generate_products([3, 15], &mut rng)
            .unwrap();
        prop_assert!((3..=15).contains(&products.len()));
        for p in &products {
            prop_assert_eq!(p.total_price, (p.quantity * p.unit_price).round_dp(2));
            prop_assert!(p.quantity > Decimal::ZERO);
        }
    }

    #[test]
    fn vat_summary_sums_to_gross(products in prop::collection::vec(arb_product(), 0..30)) {
        let summary = summarize(&products);
        let gross: Decimal = products.iter().map(|p| p.total_price).sum();
        let diff = (summary.gross_total() - gross).abs();
        prop_assert!(diff <= dec!(0.01), "diff {}", diff);
        for entry in summary.iter() {
            prop_assert!(entry.tax <= entry.net || entry.net.is_zero());
        }
    }

    #[test]
    fn split_reconstructs_text(text in "\\PC{0,120}", n in 1usize..40) {
        let chunks = split_long_text(&text, n);
        let len = text.chars().count();
        prop_assert_eq!(chunks.len(), len.div_ceil(n));
        prop_assert_eq!(chunks.concat(), text);
        if let Some((last, init)) = chunks.split_last() {
            prop_assert!(init.iter().all(|c| c.chars().count() == n));
            prop_assert!(last.chars().count() <= n);
        }
    }

    #[test]
    fn formatted_numbers_have_fixed_places(cents in 0i64..10_000_000, comma in any::<bool>()) {
        let sep = if comma { "," } else { "." };
        let text = format_number(Decimal::new(cents, 2), sep, 2);
        let (whole, frac) = text.split_once(sep).unwrap();
        prop_assert_eq!(frac.len(), 2);
        prop_assert!(whole.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn composed_items_always_drawable(seed in any::<u64>(), width in 0i32..600, height in 0i32..3000) {
        let corpus = Arc::new(Corpus::from_json_str(CORPUS).unwrap());
        let composer = ContentComposer::new(ContentConfig::default(), corpus);
        let mut rng = StdRng::seed_from_u64(seed);
        let receipt = composer.compose(BoxRect::new(0, 0, width, height), &mut rng).unwrap();
        prop_assert!(receipt.items.iter().all(|i| i.rect.is_drawable() && !i.text.is_empty()));
    }
}
