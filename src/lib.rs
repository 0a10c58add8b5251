//! # receipt-synth
//!
//! Synthetic Polish retail receipts for training document-understanding
//! models. Each sample is a render plan (positioned, aligned text boxes)
//! plus the structured ground truth it was printed from.
//!
//! All monetary values use [`rust_decimal::Decimal`]; VAT is extracted from
//! gross line totals and rounded to grosze.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use receipt_synth::compose::ContentComposer;
//! use receipt_synth::config::ContentConfig;
//! use receipt_synth::core::BoxRect;
//! use receipt_synth::corpus::Corpus;
//!
//! let corpus = Corpus::from_json_str(r#"{
//!     "shop_names": [{"name": "Lewiatan"}],
//!     "company_info": {"addresses": ["ul. Polna 1, Kraków"], "tax_ids": ["NIP: 676-00-00-000"]},
//!     "receipt_headers": ["PARAGON FISKALNY"],
//!     "receipt_footers": ["Zapraszamy ponownie"],
//!     "payment_methods": [{"method": "Karta"}],
//!     "products": {"grocery": [
//!         {"name": "Jogurt naturalny", "unit": "szt.", "price_range": [1.99, 3.49], "vat_symbol": "C", "vat_rate": "5%"}
//!     ]}
//! }"#).unwrap();
//!
//! let composer = ContentComposer::new(ContentConfig::default(), Arc::new(corpus));
//! let mut rng = StdRng::seed_from_u64(7);
//! let receipt = composer.compose(BoxRect::new(0, 0, 300, 1200), &mut rng).unwrap();
//!
//! assert_eq!(receipt.boxes().len(), receipt.texts().len());
//! assert_eq!(receipt.structured.shop.name, "Lewiatan");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `dataset` (default) | Train/validation/test split and JSONL dataset writer |
//! | `cli` (default) | `receipt-synth` binary |

pub mod compose;
pub mod config;
pub mod core;
pub mod corpus;
pub mod format;
pub mod layout;
pub mod products;
pub mod synth;
pub mod vat;

#[cfg(feature = "dataset")]
pub mod dataset;

pub use crate::core::{SynthError, ValidationError};
