//! Dataset export: train/validation/test assignment and on-disk layout.
//!
//! Image rendering is out of scope; the writer stores the `.jpg` file name
//! a renderer would produce next to a JSON render plan that contains
//! everything needed to draw it.

mod split;
mod writer;

pub use split::{SPLIT_TABLE_SIZE, Split, SplitAssignment};
pub use writer::{DatasetEntry, DatasetWriter, MetadataRecord};
