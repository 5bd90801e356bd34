//! The classifier: one color image in, one score vector out.

use crate::core::errors::ClassifyError;
use crate::core::inference::{InferenceHandle, TensorInput};
use crate::processors::Preprocessor;
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// An ordered sequence of per-class scores in model-output order.
///
/// There is no invariant that the scores sum to 1; whether softmax was
/// applied is a property of the model, not of this component.
pub type ScoreVector = Vec<f32>;

/// Transforms one image into one score vector using a bound inference
/// handle, encapsulating all preprocessing policy.
///
/// ```rust,no_run
/// use wastesort::Classifier;
/// use wastesort::core::assets::DirAssets;
/// use wastesort::core::inference::{ModelHost, OrtRuntime, SessionOptions};
///
/// # fn main() -> Result<(), wastesort::core::errors::ClassifyError> {
/// let mut host = ModelHost::new(
///     DirAssets::new("assets"),
///     OrtRuntime::new(),
///     SessionOptions::default(),
/// );
/// let classifier = Classifier::new(host.acquire("wastesort.onnx")?);
/// let image = wastesort::load_image("sample.jpg")?;
/// let scores = classifier.classify(&image)?;
/// # host.release();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    handle: Arc<InferenceHandle>,
    preprocessor: Preprocessor,
}

impl Classifier {
    /// Creates a classifier bound to `handle` with the default policy:
    /// 224x224 input, float (non-quantized) normalization.
    pub fn new(handle: Arc<InferenceHandle>) -> Self {
        Self {
            handle,
            preprocessor: Preprocessor::default(),
        }
    }

    /// Overrides the target square edge length.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Config`] if `input_size` is zero.
    pub fn with_input_size(mut self, input_size: u32) -> Result<Self, ClassifyError> {
        self.preprocessor = Preprocessor::new(input_size, self.preprocessor.is_quantized())?;
        Ok(self)
    }

    /// Selects the quantized normalization policy: native `[0, 255]` values
    /// are passed through instead of being rescaled to `[0, 1]`.
    pub fn quantized(mut self, quantized: bool) -> Self {
        self.preprocessor = self.preprocessor.with_quantized(quantized);
        self
    }

    /// Returns the target square edge length.
    pub fn input_size(&self) -> u32 {
        self.preprocessor.input_size()
    }

    /// Returns true when the quantized policy is active.
    pub fn is_quantized(&self) -> bool {
        self.preprocessor.is_quantized()
    }

    /// Classifies one image, blocking until inference completes.
    ///
    /// The returned vector has length exactly `N`, the class count declared
    /// by the bound model's output metadata, regardless of the input image
    /// dimensions.
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::InvalidInput`] — degenerate (zero-sized) image.
    /// * [`ClassifyError::Inference`] — closed handle, input shape mismatch,
    ///   or a runtime fault. Fatal to this call only; errors are never
    ///   caught or muted here.
    pub fn classify(&self, image: &DynamicImage) -> Result<ScoreVector, ClassifyError> {
        let tensor = self.preprocessor.process(image)?;
        let scores = self.run_prepared(&tensor)?;
        debug!(
            model = %self.handle.model_name(),
            classes = scores.len(),
            "classification complete"
        );
        Ok(scores)
    }

    /// Classifies a batch of images.
    ///
    /// Preprocessing runs in parallel; inference runs sequentially because
    /// the handle is not concurrently invocable. Per-image semantics are
    /// identical to [`classify`](Self::classify).
    pub fn classify_batch(
        &self,
        images: &[DynamicImage],
    ) -> Result<Vec<ScoreVector>, ClassifyError> {
        let tensors = self.preprocessor.process_batch(images)?;
        tensors
            .iter()
            .map(|tensor| self.run_prepared(tensor))
            .collect()
    }

    fn run_prepared(&self, tensor: &TensorInput) -> Result<ScoreVector, ClassifyError> {
        let classes = self.handle.output_classes()?;
        let scores = self.handle.run(tensor)?;
        if scores.len() != classes {
            return Err(ClassifyError::inference(format!(
                "model declared {} classes but produced {} scores",
                classes,
                scores.len()
            )));
        }
        Ok(scores)
    }
}
