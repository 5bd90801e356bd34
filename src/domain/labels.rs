//! Class-index to label mapping.
//!
//! The mapping is a configuration constant external to the model file; the
//! integrator keeps it in sync with the model's training label order.

use crate::core::errors::ClassifyError;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// The ten waste-material categories of the bundled models, in training
/// order.
pub const WASTE_LABELS: [&str; 10] = [
    "battery",
    "biological",
    "cardboard",
    "clothes",
    "glass",
    "metal",
    "paper",
    "plastic",
    "shoes",
    "trash",
];

/// A fixed mapping from class index to human-readable label.
///
/// Built once, never mutated. Out-of-range lookups return `None`.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Vec<Arc<str>>,
}

impl LabelMap {
    /// Creates the mapping for the bundled waste-material label set.
    pub fn waste_materials() -> Self {
        Self::from_labels(WASTE_LABELS)
    }

    /// Creates a mapping from labels in index order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|label| Arc::from(label.as_ref()))
                .collect(),
        }
    }

    /// Loads a mapping from a text file with one label per line.
    ///
    /// Blank lines are skipped; surrounding whitespace is trimmed. Line
    /// order defines index order.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                labels.push(Arc::from(trimmed));
            }
        }
        Ok(Self { labels })
    }

    /// Returns the label for a class index, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|label| label.as_ref())
    }

    /// Returns the label for a class index as a shared string.
    pub fn get_shared(&self, index: usize) -> Option<Arc<str>> {
        self.labels.get(index).cloned()
    }

    /// Returns the number of labels in the mapping.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when the mapping holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
