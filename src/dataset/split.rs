use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::SynthError;

/// Number of precomputed split entries; sample indices wrap around it.
pub const SPLIT_TABLE_SIZE: usize = 10_000;

/// Dataset partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed table mapping sample indices to splits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment {
    table: Vec<Split>,
}

impl SplitAssignment {
    /// Draw [`SPLIT_TABLE_SIZE`] entries weighted by `ratio`
    /// (train, validation, test) from a stream seeded with `seed`.
    pub fn new(ratio: [f64; 3], seed: u64) -> Result<Self, SynthError> {
        let dist = WeightedIndex::new(ratio)
            .map_err(|e| SynthError::Config(format!("split_ratio {ratio:?}: {e}")))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let table = (0..SPLIT_TABLE_SIZE)
            .map(|_| Split::ALL[dist.sample(&mut rng)])
            .collect();
        Ok(Self { table })
    }

    /// Split of sample `index`.
    pub fn split_for(&self, index: usize) -> Split {
        self.table[index % self.table.len()]
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of table entries assigned to `split`.
    pub fn count(&self, split: Split) -> usize {
        self.table.iter().filter(|s| **s == split).count()
    }
}
