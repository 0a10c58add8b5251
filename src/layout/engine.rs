use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use super::details::draw_details;
use super::flow::FlowCursor;
use super::sections::{
    NameClass, NameLine, NameWrap, ProductRow, ReceiptLayout, SectionBoxes, TextMetrics, VatRows,
};
use crate::config::LayoutConfig;
use crate::core::{Align, BoxRect, PlacedBox, Product, ReceiptData, SynthError};
use crate::corpus::Corpus;
use crate::format::{FormattingChoice, split_long_text};
use crate::products::ProductGenerator;
use crate::vat::summarize;

/// Allocates receipt sections top to bottom inside a content rectangle.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    margin: f64,
    products_count: [usize; 2],
    corpus: Option<Arc<Corpus>>,
    reference_time: Option<NaiveDateTime>,
}

impl LayoutEngine {
    /// Create an engine without a corpus. [`generate`](Self::generate)
    /// fails until one is attached.
    pub fn new(config: LayoutConfig, margin: f64) -> Self {
        Self {
            config,
            margin,
            products_count: [3, 15],
            corpus: None,
            reference_time: None,
        }
    }

    pub fn with_corpus(mut self, corpus: Arc<Corpus>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn set_corpus(&mut self, corpus: Arc<Corpus>) {
        self.corpus = Some(corpus);
    }

    pub fn with_products_count(mut self, count: [usize; 2]) -> Self {
        self.products_count = count;
        self
    }

    /// Pin the "now" receipt dates are counted back from.
    pub fn with_reference_time(mut self, reference: NaiveDateTime) -> Self {
        self.reference_time = Some(reference);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn corpus(&self) -> Option<&Arc<Corpus>> {
        self.corpus.as_ref()
    }

    fn separator_drawn<R: Rng + ?Sized>(&self, location: &str, rng: &mut R) -> bool {
        let p = self.config.separators.locations.probability(location);
        rng.random::<f64>() <= p
    }

    /// Place an optional separator and, when drawn, advance past it plus
    /// `gap`.
    fn separator<R: Rng + ?Sized>(
        &self,
        location: &str,
        gap: i32,
        cursor: &mut FlowCursor,
        rng: &mut R,
    ) -> Option<PlacedBox> {
        if !self.separator_drawn(location, rng) {
            return None;
        }
        let height = self.config.heights.separator;
        let placed = cursor.full_width(height, Align::Center);
        cursor.advance(height + gap);
        Some(placed)
    }

    /// Lay out one receipt inside `bbox` and draw its content.
    ///
    /// Random draws happen in a fixed order: receipt details, products,
    /// the header/title/products separators, payment method, then the
    /// VAT and payment separators.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        bbox: BoxRect,
        formatting: &FormattingChoice,
        rng: &mut R,
    ) -> Result<ReceiptLayout, SynthError> {
        let corpus = self
            .corpus
            .as_deref()
            .ok_or_else(|| SynthError::Layout("no corpus attached to the layout engine".into()))?;

        let heights = &self.config.heights;
        let spacing = &self.config.spacing;
        let geometry = &self.config.geometry;

        let margin_x = (f64::from(bbox.width) * self.margin) as i32;
        let content_width = bbox.width - 2 * margin_x;
        let metrics = TextMetrics::new(content_width, geometry.chars_per_px);

        let reference = self
            .reference_time
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let details = draw_details(
            corpus,
            &self.config.date_range,
            formatting,
            reference,
            rng,
        )?;
        let products =
            ProductGenerator::new(corpus).generate_products(self.products_count, rng)?;

        let mut cursor = FlowCursor::new(
            bbox.x + margin_x,
            content_width,
            bbox.y + geometry.top_padding,
        );

        let shop_name = cursor.full_width(heights.shop_name, Align::Center);
        cursor.advance(heights.shop_name + spacing.after_shop_name);
        let shop_address = cursor.full_width(heights.shop_address, Align::Center);
        cursor.advance(heights.shop_address);
        let shop_tax_id = cursor.full_width(heights.shop_tax_id, Align::Center);
        cursor.advance(heights.shop_tax_id);
        let header_separator = self.separator("header", spacing.after_separator, &mut cursor, rng);

        let date_split = geometry.date_split;
        let date_number = cursor.split(heights.date_number, date_split, 1.0 - date_split);
        cursor.advance(heights.date_number + spacing.after_date_number);

        let receipt_header = cursor.full_width(heights.receipt_header, Align::Center);
        cursor.advance(heights.receipt_header + spacing.after_receipt_header);
        let title_separator = self.separator("title", spacing.before_products, &mut cursor, rng);

        let product_rows: Vec<ProductRow> = products
            .iter()
            .map(|product| self.product_row(product, &metrics, &mut cursor))
            .collect();
        let products_separator =
            self.separator("products", spacing.after_separator, &mut cursor, rng);

        let vat_summary = summarize(&products);
        let total_price: Decimal = products.iter().map(|p| p.total_price).sum();
        let payment_method = corpus
            .payment_methods
            .choose(rng)
            .cloned()
            .ok_or_else(|| SynthError::Corpus("no payment methods".into()))?;

        let mut vat_rows = Vec::new();
        for entry in vat_summary.printable() {
            let net = cursor.split(heights.vat_line, geometry.label_width, geometry.amount_width);
            cursor.advance(heights.vat_line);
            let tax = cursor.split(heights.vat_line, geometry.label_width, geometry.amount_width);
            cursor.advance(heights.vat_line);
            vat_rows.push(VatRows {
                symbol: entry.symbol.clone(),
                net,
                tax,
            });
        }
        let vat_separator = self.separator("vat", spacing.after_separator, &mut cursor, rng);

        cursor.advance(spacing.before_payment);
        let total_sum = cursor.split(heights.total_sum, geometry.label_width, geometry.amount_width);
        cursor.advance(heights.total_sum);
        let payment_row = cursor.split(
            heights.payment_method,
            geometry.label_width,
            geometry.amount_width,
        );
        cursor.advance(heights.payment_method + spacing.after_payment);
        let payment_separator =
            self.separator("payment", spacing.after_separator, &mut cursor, rng);

        let footer = cursor.full_width(heights.footer, Align::Center);
        cursor.advance(heights.footer);

        log::debug!(
            "laid out {} products, {} VAT symbols, bottom at y={}",
            products.len(),
            vat_rows.len(),
            cursor.y()
        );

        Ok(ReceiptLayout {
            boxes: SectionBoxes {
                shop_name,
                shop_address,
                shop_tax_id,
                header_separator,
                date_number,
                receipt_header,
                title_separator,
                products: product_rows,
                products_separator,
                vat_summary: vat_rows,
                vat_separator,
                total_sum,
                payment_method: payment_row,
                payment_separator,
                footer,
            },
            data: ReceiptData {
                header: details.header,
                date: details.date,
                number: details.number,
                payment_method,
                products,
                vat_summary,
                total_price,
            },
            metrics,
            bottom: cursor.y(),
        })
    }

    /// Place the rows of one product and advance past them.
    fn product_row(
        &self,
        product: &Product,
        metrics: &TextMetrics,
        cursor: &mut FlowCursor,
    ) -> ProductRow {
        let height = self.config.heights.product;
        let geometry = &self.config.geometry;
        let name_len = product.name.chars().count();

        match metrics.classify(name_len) {
            NameClass::Short => {
                let row = cursor.overlapped(
                    height,
                    geometry.short_name_width,
                    geometry.short_price_width,
                    geometry.short_overlap,
                );
                cursor.advance(height);
                ProductRow {
                    wrap: NameWrap::Short,
                    name_lines: vec![NameLine {
                        placed: row.left,
                        text: product.name.clone(),
                    }],
                    price: row.right,
                }
            }
            NameClass::Medium => {
                let name = full_line(cursor, height, product.name.clone(), Align::Left);
                let price = full_line(cursor, height, String::new(), Align::Right).placed;
                ProductRow {
                    wrap: NameWrap::Medium,
                    name_lines: vec![name],
                    price,
                }
            }
            NameClass::VeryLong => {
                let mut chunks = split_long_text(&product.name, metrics.max_chars_per_line);
                let last = chunks.pop().unwrap_or_default();
                let mut name_lines = Vec::with_capacity(chunks.len() + 1);
                for chunk in chunks {
                    name_lines.push(full_line(cursor, height, chunk, Align::Left));
                }

                if last.chars().count() > metrics.half_width_chars {
                    name_lines.push(full_line(cursor, height, last, Align::Left));
                    let price = full_line(cursor, height, String::new(), Align::Right).placed;
                    ProductRow {
                        wrap: NameWrap::VeryLong {
                            price_inline: false,
                        },
                        name_lines,
                        price,
                    }
                } else {
                    let row = cursor.overlapped(
                        height,
                        geometry.tail_name_width,
                        geometry.tail_price_width,
                        geometry.tail_overlap,
                    );
                    cursor.advance(height);
                    name_lines.push(NameLine {
                        placed: row.left,
                        text: last,
                    });
                    ProductRow {
                        wrap: NameWrap::VeryLong { price_inline: true },
                        name_lines,
                        price: row.right,
                    }
                }
            }
        }
    }
}

/// Place a full-width product line and advance past it.
fn full_line(cursor: &mut FlowCursor, height: i32, text: String, align: Align) -> NameLine {
    let placed = cursor.full_width(height, align);
    cursor.advance(height);
    NameLine { placed, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn corpus_with(names: &[&str]) -> Arc<Corpus> {
        let items: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{"name": "{n}", "unit": "szt.", "price_range": [1.00, 9.99], "vat_symbol": "A", "vat_rate": "23%"}}"#
                )
            })
            .collect();
        let json = format!(
            r#"{{
            "shop_names": [{{"name": "Lewiatan"}}],
            "company_info": {{"addresses": ["ul. Długa 5"], "tax_ids": ["NIP 111-222-33-44"]}},
            "receipt_headers": ["PARAGON FISKALNY"],
            "receipt_footers": ["Zapraszamy ponownie"],
            "payment_methods": [{{"method": "Gotówka"}}],
            "products": {{"grocery": [{}]}}
        }}"#,
            items.join(",")
        );
        Arc::new(Corpus::from_json_str(&json).unwrap())
    }

    fn engine(names: &[&str]) -> LayoutEngine {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        LayoutEngine::new(LayoutConfig::default(), 0.05)
            .with_corpus(corpus_with(names))
            .with_products_count([1, 1])
            .with_reference_time(reference)
    }

    fn rect() -> BoxRect {
        BoxRect::new(0, 0, 300, 2000)
    }

    #[test]
    fn missing_corpus_is_layout_error() {
        let engine = LayoutEngine::new(LayoutConfig::default(), 0.05);
        let mut rng = StdRng::seed_from_u64(0);
        let err = engine
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, SynthError::Layout(_)));
    }

    #[test]
    fn header_boxes_are_full_width_and_centered() {
        let mut rng = StdRng::seed_from_u64(1);
        let layout = engine(&["Mleko"])
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let b = &layout.boxes;
        assert_eq!(b.shop_name.rect, BoxRect::new(15, 10, 270, 25));
        assert_eq!(b.shop_address.rect, BoxRect::new(15, 40, 270, 20));
        assert_eq!(b.shop_tax_id.rect, BoxRect::new(15, 60, 270, 20));
        assert_eq!(b.shop_name.align, Align::Center);
    }

    #[test]
    fn short_name_uses_overlapping_row() {
        let mut rng = StdRng::seed_from_u64(2);
        let layout = engine(&["Mleko"])
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let row = &layout.boxes.products[0];
        assert_eq!(row.wrap, NameWrap::Short);
        assert_eq!(row.name_lines[0].placed.rect.width, 162);
        assert_eq!(row.price.rect.width, 175);
        assert_eq!(row.price.rect.x, 15 + 162 - 67);
        assert_eq!(row.price.rect.y, row.name_lines[0].placed.rect.y);
    }

    #[test]
    fn medium_name_puts_price_below() {
        let mut rng = StdRng::seed_from_u64(3);
        // 20 chars: above half (15), within a line (31)
        let layout = engine(&["Ser żółty Gouda 250g"])
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let row = &layout.boxes.products[0];
        assert_eq!(row.wrap, NameWrap::Medium);
        let name = row.name_lines[0].placed.rect;
        assert_eq!(name.width, 270);
        assert_eq!(row.price.rect.y, name.y + 25);
        assert_eq!(row.price.align, Align::Right);
    }

    #[test]
    fn very_long_name_is_chunked() {
        let mut rng = StdRng::seed_from_u64(4);
        // 70 chars: chunks of 31, 31, 8; the last fits beside the price
        let name = "Czekolada mleczna z całymi orzechami laskowymi i rodzynkami 100g Wedel";
        assert_eq!(name.chars().count(), 70);
        let layout = engine(&[name])
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let row = &layout.boxes.products[0];
        assert_eq!(row.wrap, NameWrap::VeryLong { price_inline: true });
        assert_eq!(row.name_lines.len(), 3);
        let joined: String = row.name_lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined, name);
        assert_eq!(row.boxes().last().unwrap().align, Align::Right);
        assert_eq!(row.price.rect.y, row.name_lines[2].placed.rect.y);
    }

    #[test]
    fn very_long_name_with_long_tail_puts_price_below() {
        let mut rng = StdRng::seed_from_u64(5);
        // 31 + 20 chars: the tail exceeds half a line
        let name = "Kawa ziarnista Lavazza Crema e Gusto Classico 1kg x";
        assert_eq!(name.chars().count(), 51);
        let layout = engine(&[name])
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let row = &layout.boxes.products[0];
        assert_eq!(row.wrap, NameWrap::VeryLong { price_inline: false });
        assert_eq!(row.name_lines.len(), 2);
        assert_eq!(row.price.rect.width, 270);
        assert_eq!(row.price.rect.y, row.name_lines[1].placed.rect.y + 25);
    }

    #[test]
    fn absent_separators_take_no_space() {
        let mut config = LayoutConfig::default();
        let locations = &mut config.separators.locations;
        locations.header = 0.0;
        locations.title = 0.0;
        locations.products = 0.0;
        locations.vat = 0.0;
        locations.payment = 0.0;
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let engine = LayoutEngine::new(config, 0.05)
            .with_corpus(corpus_with(&["Mleko"]))
            .with_products_count([1, 1])
            .with_reference_time(reference);
        let mut rng = StdRng::seed_from_u64(6);
        let layout = engine
            .generate(rect(), &FormattingChoice::default(), &mut rng)
            .unwrap();
        let b = &layout.boxes;
        assert!(b.header_separator.is_none());
        assert!(b.title_separator.is_none());
        assert!(b.products_separator.is_none());
        assert!(b.vat_separator.is_none());
        assert!(b.payment_separator.is_none());
        // tax id ends at 80; date row follows directly
        assert_eq!(b.date_number.left.rect.y, 80);
        assert_eq!(b.receipt_header.rect.y, 105);
        // title ends at 140; first product directly after
        assert_eq!(b.products[0].price.rect.y, 140);
    }

    #[test]
    fn rows_never_overlap_vertically() {
        let mut rng = StdRng::seed_from_u64(7);
        let engine = engine(&["Mleko", "Ser żółty Gouda 250g", "Bardzo długa nazwa produktu spożywczego 500g"])
            .with_products_count([3, 15]);
        for _ in 0..20 {
            let layout = engine
                .generate(rect(), &FormattingChoice::default(), &mut rng)
                .unwrap();
            let mut rows: Vec<(i32, i32)> = layout
                .boxes
                .all()
                .iter()
                .map(|b| (b.rect.y, b.rect.bottom()))
                .collect();
            rows.dedup();
            for pair in rows.windows(2) {
                assert!(pair[1].0 >= pair[0].1, "rows {:?} overlap", pair);
            }
            assert_eq!(layout.bottom, layout.boxes.footer.rect.bottom());
        }
    }
}
