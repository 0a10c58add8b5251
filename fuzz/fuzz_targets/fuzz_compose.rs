#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;
use receipt_synth::compose::ContentComposer;
use receipt_synth::config::ContentConfig;
use receipt_synth::core::BoxRect;
use receipt_synth::corpus::Corpus;

const CORPUS: &str = include_str!("../../data/receipt_corpus.json");

fuzz_target!(|input: (u64, i16, i16, u16, u16)| {
    let (seed, x, y, width, height) = input;
    let Ok(corpus) = Corpus::from_json_str(CORPUS) else {
        return;
    };
    let composer = ContentComposer::new(ContentConfig::default(), Arc::new(corpus));
    let rect = BoxRect::new(i32::from(x), i32::from(y), i32::from(width), i32::from(height));
    let mut rng = StdRng::seed_from_u64(seed);
    // Any rectangle must compose without panicking; every item stays drawable.
    if let Ok(receipt) = composer.compose(rect, &mut rng) {
        assert!(receipt.boxes().iter().all(|b| b.is_drawable()));
    }
});
