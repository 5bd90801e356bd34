//! The narrow interface every inference engine must satisfy.
//!
//! `load(bytes, options) -> session`, `run(session, input) -> output`, and
//! dropping the session to release it. The pipeline never talks to a
//! concrete engine directly; it goes through these traits so the engine can
//! be swapped without touching preprocessing or host logic.

use crate::core::constants::DEFAULT_INTRA_THREADS;
use crate::core::errors::ClassifyError;
use ndarray::Array4;
use serde::{Deserialize, Serialize};

/// Graph optimization levels understood by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphOptLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Basic optimizations.
    Level1,
    /// Extended optimizations.
    Level2,
    /// All optimizations.
    Level3,
}

impl Default for GraphOptLevel {
    fn default() -> Self {
        Self::Level3
    }
}

/// Options applied when a session is built from artifact bytes.
///
/// The thread count is a fixed parallelism hint internal to the runtime's
/// matrix computation. It does not affect call ordering or results and is
/// not a concurrency contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Number of intra-op worker threads.
    pub intra_threads: usize,
    /// Graph optimization level.
    pub optimization: GraphOptLevel,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            intra_threads: DEFAULT_INTRA_THREADS,
            optimization: GraphOptLevel::default(),
        }
    }
}

impl SessionOptions {
    /// Creates options with the default thread hint and optimization level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the intra-op thread hint.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads;
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization(mut self, level: GraphOptLevel) -> Self {
        self.optimization = level;
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.intra_threads == 0 {
            return Err(ClassifyError::config(
                "intra_threads must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// A fixed-shape input tensor derived from one image.
///
/// Layout is NHWC `[1, H, W, 3]`. Float tensors carry values rescaled to
/// `[0, 1]`; quantized tensors carry the native `[0, 255]` byte values.
#[derive(Debug, Clone)]
pub enum TensorInput {
    /// Normalized floating-point input for float models.
    Float32(Array4<f32>),
    /// Native integer input for quantized models.
    Uint8(Array4<u8>),
}

impl TensorInput {
    /// Returns the tensor shape as `[batch, height, width, channels]`.
    pub fn shape(&self) -> &[usize] {
        match self {
            TensorInput::Float32(arr) => arr.shape(),
            TensorInput::Uint8(arr) => arr.shape(),
        }
    }
}

/// A stateful session bound to one loaded model artifact.
///
/// Sessions are not safe for concurrent invocation; the owning handle
/// serializes access. Dropping the session releases the engine's native
/// resources.
pub trait RuntimeSession: Send {
    /// Returns the class count `N` declared by the model's output metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Inference`] when the declared output shape
    /// is malformed or its class dimension is not statically known.
    fn output_classes(&self) -> Result<usize, ClassifyError>;

    /// Runs the model synchronously on one input, blocking until inference
    /// completes, and returns the `N` scores in model-output order.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Inference`] on input shape/type mismatch or
    /// an engine fault. Such failures are fatal to this call only.
    fn run(&mut self, input: &TensorInput) -> Result<Vec<f32>, ClassifyError>;
}

/// An inference engine capable of building sessions from artifact bytes.
pub trait InferenceRuntime: Send + Sync {
    /// Parses `bytes` as a model artifact and builds a session configured
    /// with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::ModelLoad`] when the bytes cannot be parsed
    /// as a valid model, and [`ClassifyError::Config`] when `options` are
    /// invalid.
    fn load(
        &self,
        bytes: &[u8],
        options: &SessionOptions,
    ) -> Result<Box<dyn RuntimeSession>, ClassifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_carry_four_thread_hint() {
        let options = SessionOptions::default();
        assert_eq!(options.intra_threads, 4);
        assert_eq!(options.optimization, GraphOptLevel::Level3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_threads_rejected() {
        let options = SessionOptions::new().with_intra_threads(0);
        assert!(matches!(
            options.validate(),
            Err(ClassifyError::Config { .. })
        ));
    }

    #[test]
    fn tensor_input_reports_shape() {
        let input = TensorInput::Float32(Array4::zeros((1, 224, 224, 3)));
        assert_eq!(input.shape(), &[1, 224, 224, 3]);

        let input = TensorInput::Uint8(Array4::zeros((1, 32, 32, 3)));
        assert_eq!(input.shape(), &[1, 32, 32, 3]);
    }
}
