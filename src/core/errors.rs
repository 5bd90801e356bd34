//! Error types for the classification pipeline.
//!
//! This module defines the error taxonomy for the crate: resource lookup
//! failures, model loading failures, per-call inference failures, and
//! configuration/input validation errors. Constructor helpers attach context
//! strings the same way across call sites.

use thiserror::Error;

/// A plain string error used as a source where no richer error exists.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

/// Enum representing the errors that can occur in the classification pipeline.
///
/// The taxonomy mirrors the component boundaries: `ResourceNotFound` and
/// `ModelLoad` are fatal to [`ModelHost::acquire`](crate::core::inference::ModelHost::acquire),
/// `Inference` is fatal to a single classify call only, and `Config` /
/// `InvalidInput` reject bad construction parameters or degenerate inputs
/// before any native resources are touched.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The named model artifact is absent from the resource store.
    #[error("resource not found: {name}")]
    ResourceNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The artifact bytes were present but could not be loaded as a model.
    #[error("model load failed: {context}")]
    ModelLoad {
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Inference failed: closed handle, shape mismatch, or a runtime fault.
    ///
    /// Fatal to the current call only; the host and handle bookkeeping stay
    /// intact and the caller may retry with a corrected input.
    #[error("inference failed: {context}")]
    Inference {
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error indicating invalid caller input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a `ResourceNotFound` error for the given resource name.
    pub fn resource_not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Creates a `ModelLoad` error with context only.
    pub fn model_load(context: impl Into<String>) -> Self {
        Self::ModelLoad {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a `ModelLoad` error wrapping an underlying error.
    pub fn model_load_with(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an `Inference` error with context only.
    pub fn inference(context: impl Into<String>) -> Self {
        Self::Inference {
            context: context.into(),
            source: None,
        }
    }

    /// Creates an `Inference` error wrapping an underlying error.
    pub fn inference_with(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ClassifyError::resource_not_found("model.onnx");
        assert_eq!(format!("{}", err), "resource not found: model.onnx");

        let err = ClassifyError::model_load("bytes are not a valid model");
        assert_eq!(
            format!("{}", err),
            "model load failed: bytes are not a valid model"
        );

        let err = ClassifyError::inference("handle is closed");
        assert_eq!(format!("{}", err), "inference failed: handle is closed");

        let err = ClassifyError::config("input size must be greater than 0");
        assert_eq!(
            format!("{}", err),
            "configuration: input size must be greater than 0"
        );
    }

    #[test]
    fn inference_error_preserves_source() {
        use std::error::Error;

        let err = ClassifyError::inference_with(
            "output extraction failed",
            SimpleError::new("tensor type mismatch"),
        );
        let source = err.source().expect("source should be attached");
        assert_eq!(format!("{}", source), "tensor type mismatch");
    }
}
