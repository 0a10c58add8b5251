use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::ground_truth::{ShopInfo, StructuredData, StructuredProduct};
use super::separator::SeparatorStyle;
use crate::config::ContentConfig;
use crate::core::{Align, BoxRect, PlacedBox, SynthError, round_money, units};
use crate::corpus::{Corpus, load_corpus};
use crate::format::{FormattingChoice, PriceLine, format_number, format_price};
use crate::layout::{LayoutEngine, ReceiptLayout, Section};

/// Font scale of shop name and total row.
const STRONG_SCALE: f64 = 0.9;

/// Font scale of everything that is not emphasized.
const BODY_SCALE: f64 = 0.7;

/// How an item's text is rendered relative to the base font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub size_factor: f64,
    pub bold: bool,
}

impl Emphasis {
    pub fn body() -> Self {
        Self {
            size_factor: BODY_SCALE,
            bold: false,
        }
    }

    pub fn strong(size_factor: f64) -> Self {
        Self {
            size_factor,
            bold: true,
        }
    }
}

/// One box of text to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub rect: BoxRect,
    pub align: Align,
    pub text: String,
    pub emphasis: Emphasis,
    pub section: Section,
}

/// A receipt ready for rendering plus its ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedReceipt {
    /// Drawable items in rendering order.
    pub items: Vec<RenderItem>,
    pub structured: StructuredData,
    pub formatting: FormattingChoice,
    pub separator: SeparatorStyle,
    /// Products that got no row or whose price box has no area; they stay
    /// in the ground truth but are missing from the printed receipt.
    pub dropped_products: usize,
}

impl ComposedReceipt {
    pub fn boxes(&self) -> Vec<BoxRect> {
        self.items.iter().map(|item| item.rect).collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Items belonging to one section.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &RenderItem> {
        self.items.iter().filter(move |item| item.section == section)
    }
}

/// Per-receipt draws made by the composer itself.
struct Branding {
    shop_name: String,
    address: String,
    tax_id: String,
    header_scale: f64,
    footer: String,
}

/// Collects items for one receipt, skipping anything undrawable.
struct ItemSink {
    items: Vec<RenderItem>,
}

impl ItemSink {
    fn push(&mut self, section: Section, placed: PlacedBox, text: String, emphasis: Emphasis) {
        if text.is_empty() || !placed.rect.is_drawable() {
            return;
        }
        self.items.push(RenderItem {
            rect: placed.rect,
            align: placed.align,
            text,
            emphasis,
            section,
        });
    }
}

/// Turns layouts into render plans: picks formatting, asks the layout engine
/// for boxes and fills each box with formatted text.
#[derive(Debug, Clone)]
pub struct ContentComposer {
    config: ContentConfig,
    engine: LayoutEngine,
    corpus: Arc<Corpus>,
}

impl ContentComposer {
    pub fn new(config: ContentConfig, corpus: Arc<Corpus>) -> Self {
        let engine = LayoutEngine::new(config.layout.clone(), config.margin)
            .with_products_count(config.products_count)
            .with_corpus(Arc::clone(&corpus));
        Self {
            config,
            engine,
            corpus,
        }
    }

    /// Load the corpus named by `config.corpus_path` and build a composer.
    pub fn from_config(config: ContentConfig) -> Result<Self, SynthError> {
        let corpus = load_corpus(&config.corpus_path)?;
        Ok(Self::new(config, Arc::new(corpus)))
    }

    /// Pin the reference time receipt dates are counted back from.
    pub fn with_reference_time(mut self, reference: NaiveDateTime) -> Self {
        self.engine = self.engine.with_reference_time(reference);
        self
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Compose one receipt inside `content_rect`.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        content_rect: BoxRect,
        rng: &mut R,
    ) -> Result<ComposedReceipt, SynthError> {
        let formatting = self.config.formatting.choose(rng);
        let layout = self.engine.generate(content_rect, &formatting, rng)?;
        let separator = SeparatorStyle::choose(&self.config.layout.separators, rng);
        let branding = self.draw_branding(rng)?;

        let drawn_products = layout
            .boxes
            .products
            .iter()
            .filter(|row| row.price.rect.is_drawable())
            .count();
        let dropped_products = layout.data.products.len().saturating_sub(drawn_products);
        if dropped_products > 0 {
            log::warn!("{dropped_products} products have no drawable row and were dropped");
        }

        let mut sink = ItemSink { items: Vec::new() };
        for section in Section::RENDER_ORDER {
            fill_section(
                section,
                &layout,
                &formatting,
                &separator,
                &branding,
                &mut sink,
            );
        }

        let structured = StructuredData {
            shop: ShopInfo {
                name: branding.shop_name,
                address: branding.address,
            },
            date: layout.data.date.clone(),
            number: layout.data.number.clone(),
            products: layout
                .data
                .products
                .iter()
                .map(StructuredProduct::from)
                .collect(),
            total: round_money(layout.data.total_price),
        };

        Ok(ComposedReceipt {
            items: sink.items,
            structured,
            formatting,
            separator,
            dropped_products,
        })
    }

    fn draw_branding<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Branding, SynthError> {
        let corpus = &*self.corpus;
        let shop_name = corpus
            .shop_names
            .choose(rng)
            .map(|shop| shop.name.clone())
            .ok_or_else(|| SynthError::Corpus("no shop names".into()))?;
        let address = corpus
            .company_info
            .addresses
            .choose(rng)
            .cloned()
            .ok_or_else(|| SynthError::Corpus("no addresses".into()))?;
        let tax_id = corpus
            .company_info
            .tax_ids
            .choose(rng)
            .cloned()
            .ok_or_else(|| SynthError::Corpus("no tax ids".into()))?;
        let [lo, hi] = self.config.layout.header_scale;
        let header_scale = if lo < hi {
            rng.random_range(lo..=hi)
        } else {
            lo
        };
        let footer = corpus
            .receipt_footers
            .choose(rng)
            .cloned()
            .ok_or_else(|| SynthError::Corpus("no receipt footers".into()))?;
        Ok(Branding {
            shop_name,
            address,
            tax_id,
            header_scale,
            footer,
        })
    }
}

fn fill_section(
    section: Section,
    layout: &ReceiptLayout,
    formatting: &FormattingChoice,
    separator: &SeparatorStyle,
    branding: &Branding,
    sink: &mut ItemSink,
) {
    let boxes = &layout.boxes;
    let data = &layout.data;
    let sep = formatting.decimal_separator.as_str();
    let body = Emphasis::body();

    if section.is_separator() {
        for placed in boxes.section(section) {
            sink.push(section, placed, separator.render(placed.rect.width), body);
        }
        return;
    }

    match section {
        Section::ShopName => sink.push(
            section,
            boxes.shop_name,
            branding.shop_name.clone(),
            Emphasis::strong(STRONG_SCALE),
        ),
        Section::ShopAddress => {
            sink.push(section, boxes.shop_address, branding.address.clone(), body)
        }
        Section::ShopTaxId => sink.push(section, boxes.shop_tax_id, branding.tax_id.clone(), body),
        Section::DateNumber => {
            sink.push(section, boxes.date_number.left, data.date.clone(), body);
            sink.push(section, boxes.date_number.right, data.number.clone(), body);
        }
        Section::ReceiptHeader => sink.push(
            section,
            boxes.receipt_header,
            data.header.clone(),
            Emphasis::strong(branding.header_scale),
        ),
        Section::Products => {
            let style = formatting.price_style();
            for (row, product) in boxes.products.iter().zip(&data.products) {
                for line in &row.name_lines {
                    sink.push(section, line.placed, line.text.clone(), body);
                }
                let price = format_price(
                    &PriceLine {
                        quantity: product.quantity,
                        unit: units::display_unit(&product.unit, &formatting.unit_format),
                        unit_price: product.unit_price,
                        total_price: product.total_price,
                        vat_symbol: &product.vat_symbol,
                    },
                    &style,
                );
                sink.push(section, row.price, price, body);
            }
        }
        Section::VatSummary => {
            for rows in &boxes.vat_summary {
                let Some(entry) = data.vat_summary.get(&rows.symbol) else {
                    continue;
                };
                let symbol = &entry.symbol;
                sink.push(section, rows.net.left, format!("Sprzedaż opod. {symbol}"), body);
                sink.push(section, rows.net.right, format_number(entry.net, sep, 2), body);
                sink.push(
                    section,
                    rows.tax.left,
                    format!("Kwota {symbol} {}", entry.rate),
                    body,
                );
                sink.push(section, rows.tax.right, format_number(entry.tax, sep, 2), body);
            }
        }
        Section::TotalSum => {
            let strong = Emphasis::strong(STRONG_SCALE);
            let amount = format_number(data.total_price, sep, 2);
            sink.push(section, boxes.total_sum.left, formatting.sum_label.clone(), strong);
            sink.push(
                section,
                boxes.total_sum.right,
                formatting.sum_amount(&amount),
                strong,
            );
        }
        Section::PaymentMethod => {
            let amount = format_number(data.total_price, sep, 2);
            sink.push(
                section,
                boxes.payment_method.left,
                format!("{}:", data.payment_method.method),
                body,
            );
            sink.push(
                section,
                boxes.payment_method.right,
                format!("{amount} {}", formatting.currency),
                body,
            );
        }
        Section::Footer => sink.push(section, boxes.footer, branding.footer.clone(), body),
        _ => {}
    }
}
