use receipt_synth::config::load_config;
use receipt_synth::dataset::{DatasetWriter, Split, SplitAssignment};
use receipt_synth::synth::ReceiptSynth;

fn main() {
    let config = load_config("data/config.json").expect("config should load");
    let splits = SplitAssignment::new(config.split_ratio, 7).expect("valid split ratio");
    for split in Split::ALL {
        println!("{split:<10} {} of {}", splits.count(split), splits.len());
    }

    let out = std::env::temp_dir().join("receipt-synth-demo");
    let mut writer = DatasetWriter::create(&out, splits).expect("output directory");
    let mut synth = ReceiptSynth::from_config(config, 7).expect("corpus should load");

    for index in 0..20 {
        let sample = synth.generate().expect("sample");
        let entry = writer.write(index, &sample).expect("write");
        println!(
            "{:<28} q={} {} items, total {}",
            entry.metadata.file_name,
            sample.quality,
            sample.items.len(),
            sample.structured.total
        );
    }
    println!("wrote {} samples to {}", writer.written(), out.display());
}
