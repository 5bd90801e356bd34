//! ONNX Runtime implementation of the inference seam.

use super::runtime::{
    GraphOptLevel, InferenceRuntime, RuntimeSession, SessionOptions, TensorInput,
};
use crate::core::errors::ClassifyError;
use ort::logging::LogLevel;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::{TensorRef, ValueType};
use tracing::debug;

/// The ONNX Runtime engine.
///
/// Sessions run on the CPU execution provider with the intra-op thread hint
/// from [`SessionOptions`].
#[derive(Debug, Clone, Default)]
pub struct OrtRuntime;

impl OrtRuntime {
    /// Creates a new ONNX Runtime engine.
    pub fn new() -> Self {
        Self
    }
}

impl InferenceRuntime for OrtRuntime {
    fn load(
        &self,
        bytes: &[u8],
        options: &SessionOptions,
    ) -> Result<Box<dyn RuntimeSession>, ClassifyError> {
        options.validate()?;

        let builder = Session::builder()
            .and_then(|b| b.with_log_level(LogLevel::Error))
            .and_then(|b| b.with_optimization_level(opt_level(options.optimization)))
            .and_then(|b| b.with_intra_threads(options.intra_threads))
            .map_err(|e| {
                ClassifyError::model_load_with("failed to configure session builder", e)
            })?;

        let session = builder.commit_from_memory(bytes).map_err(|e| {
            ClassifyError::model_load_with("artifact bytes are not a valid ONNX model", e)
        })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| ClassifyError::model_load("model declares no inputs"))?;

        let output = session
            .outputs
            .first()
            .ok_or_else(|| ClassifyError::model_load("model declares no outputs"))?;
        let output_name = output.name.clone();
        let output_shape = match &output.output_type {
            ValueType::Tensor { shape, .. } => shape.iter().copied().collect::<Vec<i64>>(),
            other => {
                return Err(ClassifyError::model_load(format!(
                    "model output '{}' is not a tensor: {:?}",
                    output_name, other
                )));
            }
        };

        debug!(
            input = %input_name,
            output = %output_name,
            output_shape = ?output_shape,
            intra_threads = options.intra_threads,
            "ONNX session ready"
        );

        Ok(Box::new(OrtSession {
            session,
            input_name,
            output_name,
            output_shape,
        }))
    }
}

struct OrtSession {
    session: Session,
    input_name: String,
    output_name: String,
    output_shape: Vec<i64>,
}

impl RuntimeSession for OrtSession {
    fn output_classes(&self) -> Result<usize, ClassifyError> {
        classes_from_shape(&self.output_shape)
    }

    fn run(&mut self, input: &TensorInput) -> Result<Vec<f32>, ClassifyError> {
        let expected = classes_from_shape(&self.output_shape)?;
        let input_shape = input.shape().to_vec();

        let outputs = match input {
            TensorInput::Float32(arr) => {
                let tensor = TensorRef::from_array_view(arr.view()).map_err(|e| {
                    ClassifyError::inference_with(
                        format!("failed to convert input tensor with shape {:?}", input_shape),
                        e,
                    )
                })?;
                let inputs = ort::inputs![self.input_name.as_str() => tensor];
                self.session.run(inputs)
            }
            TensorInput::Uint8(arr) => {
                let tensor = TensorRef::from_array_view(arr.view()).map_err(|e| {
                    ClassifyError::inference_with(
                        format!("failed to convert input tensor with shape {:?}", input_shape),
                        e,
                    )
                })?;
                let inputs = ort::inputs![self.input_name.as_str() => tensor];
                self.session.run(inputs)
            }
        }
        .map_err(|e| {
            ClassifyError::inference_with(
                format!(
                    "forward pass failed with input '{}' of shape {:?}",
                    self.input_name, input_shape
                ),
                e,
            )
        })?;

        let (shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifyError::inference_with(
                    format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        if data.len() != expected {
            return Err(ClassifyError::inference(format!(
                "output size mismatch: declared {} classes, runtime produced {} values with shape {:?}",
                expected,
                data.len(),
                shape
            )));
        }

        Ok(data.to_vec())
    }
}

fn opt_level(level: GraphOptLevel) -> GraphOptimizationLevel {
    match level {
        GraphOptLevel::DisableAll => GraphOptimizationLevel::Disable,
        GraphOptLevel::Level1 => GraphOptimizationLevel::Level1,
        GraphOptLevel::Level2 => GraphOptimizationLevel::Level2,
        GraphOptLevel::Level3 => GraphOptimizationLevel::Level3,
    }
}

/// Reads the class count from a declared classification output shape.
///
/// Accepts `[N]` and `[batch, N]` layouts. A malformed rank or a class
/// dimension that is dynamic or non-positive is an inference error; the
/// component refuses to guess rather than returning silent zeros.
fn classes_from_shape(shape: &[i64]) -> Result<usize, ClassifyError> {
    let classes = match shape {
        [n] => *n,
        [_, n] => *n,
        other => {
            return Err(ClassifyError::inference(format!(
                "expected classification output of rank 1 or 2, model declares shape {:?}",
                other
            )));
        }
    };
    if classes <= 0 {
        return Err(ClassifyError::inference(format!(
            "class dimension is not statically declared: {:?}",
            shape
        )));
    }
    Ok(classes as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_from_batched_shape() {
        assert_eq!(classes_from_shape(&[1, 10]).unwrap(), 10);
        assert_eq!(classes_from_shape(&[-1, 4]).unwrap(), 4);
        assert_eq!(classes_from_shape(&[7]).unwrap(), 7);
    }

    #[test]
    fn malformed_shapes_rejected() {
        assert!(classes_from_shape(&[]).is_err());
        assert!(classes_from_shape(&[1, 3, 224, 224]).is_err());
        assert!(classes_from_shape(&[1, 0]).is_err());
        assert!(classes_from_shape(&[1, -1]).is_err());
    }
}
