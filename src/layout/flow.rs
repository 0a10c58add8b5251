use crate::core::{Align, BoxPair, BoxRect, PlacedBox};

/// Truncating `width * fraction`, matching integer pixel placement.
fn share(width: i32, fraction: f64) -> i32 {
    (f64::from(width) * fraction) as i32
}

/// Top-to-bottom cursor over a content column.
///
/// Placement methods return boxes at the current `y` without moving;
/// [`advance`](Self::advance) moves the cursor down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowCursor {
    left: i32,
    width: i32,
    y: i32,
}

impl FlowCursor {
    pub fn new(left: i32, width: i32, y: i32) -> Self {
        Self { left, width, y }
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn advance(&mut self, dy: i32) {
        self.y += dy;
    }

    /// A box spanning the whole column.
    pub fn full_width(&self, height: i32, align: Align) -> PlacedBox {
        PlacedBox::new(BoxRect::new(self.left, self.y, self.width, height), align)
    }

    /// Two side-by-side boxes: left-aligned label, right-aligned value.
    ///
    /// The value box starts where the label box ends.
    pub fn split(&self, height: i32, left_fraction: f64, right_fraction: f64) -> BoxPair {
        let left_width = share(self.width, left_fraction);
        let right_width = share(self.width, right_fraction);
        BoxPair {
            left: PlacedBox::new(
                BoxRect::new(self.left, self.y, left_width, height),
                Align::Left,
            ),
            right: PlacedBox::new(
                BoxRect::new(self.left + left_width, self.y, right_width, height),
                Align::Right,
            ),
        }
    }

    /// Name and price boxes sharing a row and overlapping horizontally.
    ///
    /// The price box starts `overlap` before the end of the name box so a
    /// right-aligned price can use the name box's unused tail.
    pub fn overlapped(
        &self,
        height: i32,
        name_fraction: f64,
        price_fraction: f64,
        overlap_fraction: f64,
    ) -> BoxPair {
        let name_width = share(self.width, name_fraction);
        let price_width = share(self.width, price_fraction);
        let overlap = share(self.width, overlap_fraction);
        BoxPair {
            left: PlacedBox::new(
                BoxRect::new(self.left, self.y, name_width, height),
                Align::Left,
            ),
            right: PlacedBox::new(
                BoxRect::new(
                    self.left + name_width - overlap,
                    self.y,
                    price_width,
                    height,
                ),
                Align::Right,
            ),
        }
    }
}
