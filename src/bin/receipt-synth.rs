use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use receipt_synth::config::{SynthConfig, load_config};
use receipt_synth::dataset::{DatasetWriter, SplitAssignment};
use receipt_synth::synth::ReceiptSynth;

/// Generate synthetic Polish retail receipts.
#[derive(Debug, Parser)]
#[command(author, version, about = "Synthetic receipt dataset generator")]
struct Args {
    /// JSON configuration file. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Corpus file, overriding `document.content.corpus_path`.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Number of receipts to generate.
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable debug logging.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = try_main(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn try_main(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SynthConfig::default(),
    };
    if let Some(corpus) = &args.corpus {
        config.document.content.corpus_path = corpus.clone();
    }
    log::info!("seed: {}", args.seed);

    let splits = SplitAssignment::new(config.split_ratio, args.seed)?;
    let mut writer = DatasetWriter::create(&args.output, splits)?;
    let mut synth = ReceiptSynth::from_config(config, args.seed)?;
    log::info!(
        "generating {} receipts into {}",
        args.count,
        writer.root().display()
    );

    let start = Instant::now();
    for index in 0..args.count {
        let sample = synth.generate()?;
        let entry = writer.write(index, &sample)?;
        log::debug!("{} -> {}", index, entry.metadata.file_name);
    }

    let elapsed = start.elapsed();
    let average = elapsed.as_secs_f64() / args.count.max(1) as f64;
    log::info!(
        "generated {} receipts in {:.2}s ({:.4}s per receipt)",
        writer.written(),
        elapsed.as_secs_f64(),
        average
    );
    Ok(())
}
