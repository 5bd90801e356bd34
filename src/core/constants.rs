//! Constants used throughout the classification pipeline.

/// The default square edge length images are resized to before inference.
///
/// Matches the input layout the bundled waste-material models are exported
/// with. Callers targeting a model variant with a different input size
/// override this on the classifier.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// The default number of intra-op worker threads for the inference runtime.
///
/// A parallelism hint only; it is internal to the runtime and never exposed
/// to callers as a concurrency primitive.
pub const DEFAULT_INTRA_THREADS: usize = 4;

/// The number of color channels fed to the model (alpha is dropped).
pub const TENSOR_CHANNELS: usize = 3;
