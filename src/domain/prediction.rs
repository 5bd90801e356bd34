//! Presentation-ready prediction built from a score vector and a label map.

use crate::domain::labels::LabelMap;
use crate::processors::topk::top1;
use std::sync::Arc;

/// The top-1 class of a score vector, resolved against a label map.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Class index of the maximum score, `-1` for an empty vector.
    pub class_id: i64,
    /// The resolved label, when the index is in range of the map.
    pub label: Option<Arc<str>>,
    /// The maximum score.
    pub confidence: f32,
}

impl Prediction {
    /// Builds the top-1 prediction for `scores`.
    pub fn from_scores(scores: &[f32], labels: &LabelMap) -> Self {
        let best = top1(scores);
        let label = usize::try_from(best.index)
            .ok()
            .and_then(|index| labels.get_shared(index));
        Self {
            class_id: best.index,
            label,
            confidence: best.confidence,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(
                f,
                "{} ({:.2}%)",
                label,
                self.confidence * 100.0
            ),
            None => write!(
                f,
                "class {} ({:.2}%)",
                self.class_id,
                self.confidence * 100.0
            ),
        }
    }
}
