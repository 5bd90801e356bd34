//! Model hosting and the inference runtime seam.
//!
//! The runtime is a capability behind a narrow interface
//! ([`InferenceRuntime`] / [`RuntimeSession`]); any engine implementing it is
//! substitutable. The crate ships an ONNX Runtime implementation
//! ([`OrtRuntime`]), and [`ModelHost`] owns the load-once/release-once
//! lifecycle of the handle built on top of it.

mod host;
mod ort_runtime;
mod runtime;

pub use host::{InferenceHandle, ModelHost};
pub use ort_runtime::OrtRuntime;
pub use runtime::{
    GraphOptLevel, InferenceRuntime, RuntimeSession, SessionOptions, TensorInput,
};
