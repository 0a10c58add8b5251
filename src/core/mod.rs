//! Core receipt types, errors, numbering and validation helpers.
//!
//! Everything a generated receipt is made of lives here: products, the
//! per-symbol VAT summary, payment methods and the integer box geometry the
//! layout engine emits.

mod error;
mod numbering;
mod types;
pub mod units;
mod validation;

pub use error::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
