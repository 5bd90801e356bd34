//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components of the pipeline:
//! - Resource stores for packaged model artifacts
//! - Constants used throughout the pipeline
//! - Error handling
//! - Model hosting and the inference runtime seam
//!
//! It also re-exports commonly used types for convenience.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod inference;

pub use assets::{AssetBytes, DirAssets, MemoryAssets, ResourceStore};
pub use constants::*;
pub use errors::{ClassifyError, SimpleError};
pub use inference::{
    GraphOptLevel, InferenceHandle, InferenceRuntime, ModelHost, OrtRuntime, RuntimeSession,
    SessionOptions, TensorInput,
};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and a
/// formatting layer. Typically called once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
