use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SeparatorConfig;
use crate::format::weighted_index;

/// Separator glyph and length chosen for one receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatorStyle {
    pub symbol: String,
    pub name: String,
    /// Glyph count per pixel of box width.
    pub length_factor: f64,
}

impl Default for SeparatorStyle {
    fn default() -> Self {
        Self {
            symbol: "-".into(),
            name: "dash".into(),
            length_factor: 0.35,
        }
    }
}

impl SeparatorStyle {
    /// Draw a separator type by weight and a length factor from
    /// `config.length`. A type with its own `length` keeps that instead.
    pub fn choose<R: Rng + ?Sized>(config: &SeparatorConfig, rng: &mut R) -> Self {
        let chosen = weighted_index(config.types.iter().map(|t| t.weight), rng)
            .and_then(|i| config.types.get(i));
        let [lo, hi] = config.length;
        let drawn = if lo < hi {
            rng.random_range(lo..=hi)
        } else {
            lo
        };

        match chosen {
            Some(sep) => Self {
                symbol: sep.symbol.clone(),
                name: sep.name.clone(),
                length_factor: sep.length.unwrap_or(drawn),
            },
            None => Self {
                length_factor: drawn,
                ..Self::default()
            },
        }
    }

    /// Separator text for a box `width` pixels wide.
    pub fn render(&self, width: i32) -> String {
        let count = (f64::from(width) * self.length_factor).max(0.0) as usize;
        self.symbol.repeat(count)
    }
}
