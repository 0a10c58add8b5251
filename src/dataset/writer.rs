use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::split::{Split, SplitAssignment};
use crate::core::SynthError;
use crate::synth::Sample;

/// One line of `metadata_<split>.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Image path relative to the dataset root.
    pub file_name: String,
    /// Ground truth serialized as a JSON string.
    pub ground_truth: String,
}

/// Files produced for one sample, before anything touches the disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub split: Split,
    pub metadata: MetadataRecord,
    /// Sidecar path relative to the dataset root.
    pub plan_path: String,
    /// Render plan and sample metadata as pretty JSON.
    pub plan_json: String,
}

impl DatasetEntry {
    pub fn new(split: Split, index: usize, sample: &Sample) -> Result<Self, SynthError> {
        let ground_truth = serde_json::to_string(&sample.structured.ground_truth())?;
        Ok(Self {
            split,
            metadata: MetadataRecord {
                file_name: format!("{split}/receipt_{index}.jpg"),
                ground_truth,
            },
            plan_path: format!("{split}/receipt_{index}.json"),
            plan_json: serde_json::to_string_pretty(sample)?,
        })
    }
}

/// Appends generated samples to a dataset directory.
///
/// Layout under `root`:
/// - `metadata_<split>.jsonl`, one [`MetadataRecord`] per line
/// - `<split>/receipt_<i>.json`, the sample's render plan
#[derive(Debug)]
pub struct DatasetWriter {
    root: PathBuf,
    splits: SplitAssignment,
    written: usize,
}

impl DatasetWriter {
    /// Create `root` if needed.
    pub fn create(root: impl AsRef<Path>, splits: SplitAssignment) -> Result<Self, SynthError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            splits,
            written: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Samples written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write sample `index` and return where it went.
    pub fn write(&mut self, index: usize, sample: &Sample) -> Result<DatasetEntry, SynthError> {
        let entry = DatasetEntry::new(self.splits.split_for(index), index, sample)?;

        let plan_path = self.root.join(&entry.plan_path);
        if let Some(dir) = plan_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&plan_path, &entry.plan_json)?;

        let metadata_path = self.root.join(format!("metadata_{}.jsonl", entry.split));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&metadata_path)?;
        let line = serde_json::to_string(&entry.metadata)?;
        writeln!(file, "{line}")?;

        self.written += 1;
        Ok(entry)
    }
}
