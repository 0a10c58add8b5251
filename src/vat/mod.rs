//! VAT rate parsing and per-symbol summaries.
//!
//! Polish receipts list one net ("Sprzedaż opod.") and one tax ("Kwota")
//! line per VAT symbol. The amounts are derived from gross line totals:
//!
//! ```rust
//! use receipt_synth::core::Product;
//! use receipt_synth::vat::summarize;
//! use rust_decimal_macros::dec;
//!
//! let products = vec![
//!     Product::new("Chleb", dec!(1), "szt.", dec!(4.99), "C", "5%"),
//!     Product::new("Piwo", dec!(4), "szt.", dec!(3.29), "A", "23%"),
//! ];
//! let summary = summarize(&products);
//! assert_eq!(summary.get("C").unwrap().net, dec!(4.75));
//! assert_eq!(summary.get("A").unwrap().tax, dec!(2.46));
//! ```

mod rate;
mod summary;

pub use rate::parse_vat_rate;
pub use summary::{split_gross, summarize};
