use rand::Rng;
use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// A value together with its relative selection weight.
///
/// Deserializes from the `{"symbol": ..., "weight": ...}` and
/// `{"format": ..., "weight": ...}` shapes used in configuration files.
/// A missing weight counts as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOption<T> {
    #[serde(alias = "symbol", alias = "format")]
    pub value: T,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl<T> WeightedOption<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Pick an index proportionally to `weights`.
///
/// Draws `r` uniformly in `[0, total]` and returns the first index whose
/// cumulative weight reaches `r`. Falls back to index 0 when no weight
/// qualifies (all-zero tables, float drift). Returns `None` only for an
/// empty table.
pub fn weighted_index<R, I>(weights: I, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let weights = weights.into_iter();
    let total: f64 = weights.clone().filter(|w| *w > 0.0).sum();
    let mut seen_any = false;
    let r = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, weight) in weights.enumerate() {
        seen_any = true;
        if weight > 0.0 {
            cumulative += weight;
            if r <= cumulative {
                return Some(i);
            }
        }
    }
    seen_any.then_some(0)
}

/// Choose one option's value by weight. `None` for an empty list.
pub fn weighted_choice<'a, T, R>(options: &'a [WeightedOption<T>], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let index = weighted_index(options.iter().map(|o| o.weight), rng)?;
    options.get(index).map(|o| &o.value)
}
