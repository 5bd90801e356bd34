//! # wastesort
//!
//! A Rust library that classifies an image into one of ten waste-material
//! categories using a pre-trained on-device ONNX model.
//!
//! ## Features
//!
//! - Load-once model hosting with an explicit acquire/release lifecycle
//! - Fixed preprocessing policy: canonical RGBA conversion, bilinear
//!   stretch-resize, float or quantized value ranges
//! - Class count read from model metadata, never hardcoded
//! - A narrow runtime seam so any inference engine is substitutable
//! - ONNX Runtime integration for on-device inference
//!
//! ## Modules
//!
//! * [`core`] - Resource stores, error handling, model hosting, the runtime seam
//! * [`classifier`] - Image-to-score-vector classification
//! * [`domain`] - Class label mapping and presentation-ready predictions
//! * [`processors`] - Preprocessing and top-k postprocessing
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wastesort::prelude::*;
//!
//! # fn main() -> Result<(), wastesort::core::errors::ClassifyError> {
//! let mut host = ModelHost::new(
//!     DirAssets::new("assets"),
//!     OrtRuntime::new(),
//!     SessionOptions::default(),
//! );
//! let classifier = Classifier::new(host.acquire("wastesort.onnx")?);
//!
//! let image = wastesort::load_image("bottle.jpg")?;
//! let scores = classifier.classify(&image)?;
//!
//! let labels = LabelMap::waste_materials();
//! println!("{}", Prediction::from_scores(&scores, &labels));
//!
//! host.release();
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod core;
pub mod domain;
pub mod processors;
pub mod utils;

pub use classifier::{Classifier, ScoreVector};
pub use utils::load_image;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use wastesort::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classifier::{Classifier, ScoreVector};
    pub use crate::core::assets::{DirAssets, MemoryAssets, ResourceStore};
    pub use crate::core::errors::ClassifyError;
    pub use crate::core::inference::{
        InferenceHandle, InferenceRuntime, ModelHost, OrtRuntime, RuntimeSession, SessionOptions,
    };
    pub use crate::domain::labels::LabelMap;
    pub use crate::domain::prediction::Prediction;
    pub use crate::processors::topk::{Top1, top1, topk};
}
