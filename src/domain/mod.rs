//! Domain types: class label mapping and presentation-ready predictions.

pub mod labels;
pub mod prediction;

pub use labels::{LabelMap, WASTE_LABELS};
pub use prediction::Prediction;
