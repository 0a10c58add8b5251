//! Sample generation: canvas sizing, document placement and composition.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::compose::{ComposedReceipt, ContentComposer, RenderItem, StructuredData};
use crate::config::{DocumentConfig, SynthConfig};
use crate::core::{BoxRect, SynthError};
use crate::corpus::{Corpus, load_corpus};

/// Width and height in pixels.
pub type Size = (u32, u32);

/// One generated receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// All item texts joined with single spaces.
    pub label: String,
    /// JPEG quality to save the rendered image with.
    pub quality: u32,
    /// Corners of the document, clockwise from top-left.
    pub roi: [[i32; 2]; 4],
    /// Canvas size.
    pub size: Size,
    pub document_size: Size,
    pub items: Vec<RenderItem>,
    pub structured: StructuredData,
}

impl Sample {
    fn new(receipt: ComposedReceipt, quality: u32, size: Size, document_size: Size) -> Self {
        let label = collapse_whitespace(&receipt.texts().join(" "));
        let (w, h) = (to_i32(document_size.0), to_i32(document_size.1));
        Self {
            label,
            quality,
            roi: [[0, 0], [w, 0], [w, h], [0, h]],
            size,
            document_size,
            items: receipt.items,
            structured: receipt.structured,
        }
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn uniform_u32<R: Rng + ?Sized>([lo, hi]: [u32; 2], rng: &mut R) -> u32 {
    if lo < hi { rng.random_range(lo..=hi) } else { lo }
}

fn uniform_f64<R: Rng + ?Sized>([lo, hi]: [f64; 2], rng: &mut R) -> f64 {
    if lo < hi { rng.random_range(lo..=hi) } else { lo }
}

/// Draw a `(short, short × aspect)` size, rotated when `landscape` hits.
fn draw_size<R: Rng + ?Sized>(
    landscape: f64,
    short_size: [u32; 2],
    aspect_ratio: [f64; 2],
    rng: &mut R,
) -> Size {
    let landscape = rng.random::<f64>() < landscape;
    let short = uniform_u32(short_size, rng);
    let aspect = uniform_f64(aspect_ratio, rng);
    let long = (f64::from(short) * aspect) as u32;
    if landscape { (long, short) } else { (short, long) }
}

/// Size of the document on a `canvas`.
///
/// With probability `fullscreen` the document covers the canvas. Otherwise
/// a smaller size is drawn with every bound clamped to the canvas.
pub fn document_size<R: Rng + ?Sized>(config: &DocumentConfig, canvas: Size, rng: &mut R) -> Size {
    if rng.random::<f64>() < config.fullscreen {
        return canvas;
    }
    let (width, height) = canvas;
    let landscape = rng.random::<f64>() < config.landscape;
    let max_side = if landscape { width } else { height };

    let smallest = width.min(height);
    let short = uniform_u32(
        [
            smallest.min(config.short_size[0]),
            smallest.min(config.short_size[1]),
        ],
        rng,
    )
    .max(1);
    let fit = f64::from(max_side) / f64::from(short);
    let aspect = uniform_f64(
        [
            fit.min(config.aspect_ratio[0]),
            fit.min(config.aspect_ratio[1]),
        ],
        rng,
    );
    let long = (f64::from(short) * aspect) as u32;
    if landscape { (long, short) } else { (short, long) }
}

/// Content rectangle of a document with a `margin` fraction on every side.
pub fn content_rect(document: Size, margin: f64) -> BoxRect {
    let (w, h) = (to_i32(document.0), to_i32(document.1));
    let mx = (f64::from(w) * margin) as i32;
    let my = (f64::from(h) * margin) as i32;
    BoxRect::new(mx, my, w - 2 * mx, h - 2 * my)
}

/// Seeded receipt sample generator.
#[derive(Debug, Clone)]
pub struct ReceiptSynth {
    config: SynthConfig,
    composer: ContentComposer,
    rng: StdRng,
}

impl ReceiptSynth {
    pub fn new(config: SynthConfig, corpus: Arc<Corpus>, seed: u64) -> Self {
        let composer = ContentComposer::new(config.document.content.clone(), corpus);
        Self {
            config,
            composer,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a generator, loading the corpus named in the configuration.
    pub fn from_config(config: SynthConfig, seed: u64) -> Result<Self, SynthError> {
        let corpus = load_corpus(&config.document.content.corpus_path)?;
        Ok(Self::new(config, Arc::new(corpus), seed))
    }

    /// Pin the reference time receipt dates are counted back from.
    pub fn with_reference_time(mut self, reference: NaiveDateTime) -> Self {
        self.composer = self.composer.with_reference_time(reference);
        self
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Generate the next sample.
    pub fn generate(&mut self) -> Result<Sample, SynthError> {
        let config = &self.config;
        let rng = &mut self.rng;

        let size = draw_size(config.landscape, config.short_size, config.aspect_ratio, rng);
        let document = document_size(&config.document, size, rng);
        let rect = content_rect(document, config.document.content.margin);
        let receipt = self.composer.compose(rect, rng)?;
        let quality = uniform_u32(config.quality, rng);

        log::debug!(
            "receipt {}x{} on {}x{} canvas, {} items",
            document.0,
            document.1,
            size.0,
            size.1,
            receipt.items.len()
        );
        Ok(Sample::new(receipt, quality, size, document))
    }
}
