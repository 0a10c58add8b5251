use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use receipt_synth::compose::ContentComposer;
use receipt_synth::config::ContentConfig;
use receipt_synth::core::BoxRect;
use receipt_synth::corpus::load_corpus;

fn main() {
    let corpus = load_corpus("data/receipt_corpus.json").expect("corpus should load");
    let composer = ContentComposer::new(ContentConfig::default(), Arc::new(corpus));

    let mut rng = StdRng::seed_from_u64(2024);
    let receipt = composer
        .compose(BoxRect::new(0, 0, 320, 1400), &mut rng)
        .expect("receipt should compose");

    for item in &receipt.items {
        let [x, y, w, h] = item.rect.to_array();
        println!(
            "{:<18} [{x:>3} {y:>4} {w:>3} {h:>2}] {:<6} {}",
            item.section.as_str(),
            item.align.as_str(),
            item.text
        );
    }
    println!("---");
    println!(
        "{}",
        serde_json::to_string_pretty(&receipt.structured).expect("ground truth serializes")
    );
}
