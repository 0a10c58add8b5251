//! Receipt composition: text for every laid-out box.
//!
//! [`ContentComposer::compose`] draws a [`FormattingChoice`](crate::format::FormattingChoice),
//! requests a layout, then walks the sections in
//! [`Section::RENDER_ORDER`](crate::layout::Section::RENDER_ORDER) and emits
//! one [`RenderItem`] per non-empty, drawable box. Alongside the render plan
//! it returns [`StructuredData`], the receipt's content as plain numbers.

mod composer;
mod ground_truth;
mod separator;

pub use composer::{ComposedReceipt, ContentComposer, Emphasis, RenderItem};
pub use ground_truth::{GroundTruth, ShopInfo, ShopName, StructuredData, StructuredProduct};
pub use separator::SeparatorStyle;
