//! End-to-end pipeline tests over a scripted inference engine.
//!
//! The engine behind the runtime seam is substitutable; these tests plug in
//! a deterministic stub so the whole host -> classifier -> prediction chain
//! runs without a real model artifact.

use image::{DynamicImage, Rgb, RgbImage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wastesort::core::assets::{AssetBytes, MemoryAssets, ResourceStore};
use wastesort::core::errors::ClassifyError;
use wastesort::core::inference::{
    InferenceRuntime, ModelHost, RuntimeSession, SessionOptions, TensorInput,
};
use wastesort::domain::labels::LabelMap;
use wastesort::domain::prediction::Prediction;
use wastesort::{Classifier, ScoreVector};

const MAGIC: &[u8] = b"WSRT";

/// A deterministic stand-in for a real inference engine.
///
/// Artifacts are `WSRT` followed by the class count; scores are a fixed
/// ramp peaking at the last class.
struct ScriptedRuntime;

struct ScriptedSession {
    classes: usize,
}

impl InferenceRuntime for ScriptedRuntime {
    fn load(
        &self,
        bytes: &[u8],
        options: &SessionOptions,
    ) -> Result<Box<dyn RuntimeSession>, ClassifyError> {
        options.validate()?;
        if bytes.len() < MAGIC.len() + 1 || &bytes[..MAGIC.len()] != MAGIC {
            return Err(ClassifyError::model_load(
                "artifact bytes are not a valid model",
            ));
        }
        Ok(Box::new(ScriptedSession {
            classes: bytes[MAGIC.len()] as usize,
        }))
    }
}

impl RuntimeSession for ScriptedSession {
    fn output_classes(&self) -> Result<usize, ClassifyError> {
        Ok(self.classes)
    }

    fn run(&mut self, input: &TensorInput) -> Result<Vec<f32>, ClassifyError> {
        let shape = input.shape();
        if shape.len() != 4 || shape[0] != 1 || shape[3] != 3 {
            return Err(ClassifyError::inference(format!(
                "input shape {:?} does not match the model's expected layout",
                shape
            )));
        }
        Ok((0..self.classes).map(|i| (i + 1) as f32 * 0.05).collect())
    }
}

/// Store wrapper counting how often the underlying store is read.
struct CountingStore {
    inner: MemoryAssets,
    reads: Arc<AtomicUsize>,
}

impl ResourceStore for CountingStore {
    fn get(&self, name: &str) -> Result<AssetBytes, ClassifyError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(name)
    }
}

fn artifact(classes: u8) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.push(classes);
    bytes
}

fn host_with(classes: u8) -> (ModelHost, Arc<AtomicUsize>) {
    let reads = Arc::new(AtomicUsize::new(0));
    let store = CountingStore {
        inner: MemoryAssets::new([("waste.model", artifact(classes))]),
        reads: Arc::clone(&reads),
    };
    (
        ModelHost::new(store, ScriptedRuntime, SessionOptions::default()),
        reads,
    )
}

fn uniform_gray_300x300() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, Rgb([128, 128, 128])))
}

#[test]
fn end_to_end_ten_class_scenario() {
    let (mut host, _) = host_with(10);
    let classifier = Classifier::new(host.acquire("waste.model").unwrap());

    let scores: ScoreVector = classifier.classify(&uniform_gray_300x300()).unwrap();
    assert_eq!(scores.len(), 10);
    assert!(scores.iter().all(|score| score.is_finite()));

    let labels = LabelMap::waste_materials();
    let prediction = Prediction::from_scores(&scores, &labels);
    assert_eq!(prediction.class_id, 9);
    assert_eq!(prediction.label.as_deref(), Some("trash"));

    host.release();
}

#[test]
fn second_acquire_reuses_the_loaded_artifact() {
    let (mut host, reads) = host_with(10);
    let first = host.acquire("waste.model").unwrap();
    let second = host.acquire("waste.model").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[test]
fn release_is_idempotent_and_fails_live_calls() {
    let (mut host, _) = host_with(10);
    let classifier = Classifier::new(host.acquire("waste.model").unwrap());

    host.release();
    host.release();

    let err = classifier.classify(&uniform_gray_300x300()).unwrap_err();
    assert!(matches!(err, ClassifyError::Inference { .. }));

    // The host itself is intact: a fresh acquire serves classification again.
    let classifier = Classifier::new(host.acquire("waste.model").unwrap());
    assert_eq!(classifier.classify(&uniform_gray_300x300()).unwrap().len(), 10);
}

#[test]
fn missing_and_corrupt_artifacts_surface_typed_errors() {
    let (mut host, _) = host_with(10);
    assert!(matches!(
        host.acquire("absent.model").unwrap_err(),
        ClassifyError::ResourceNotFound { .. }
    ));

    let mut host = ModelHost::new(
        MemoryAssets::new([("broken.model", b"not a model".to_vec())]),
        ScriptedRuntime,
        SessionOptions::default(),
    );
    assert!(matches!(
        host.acquire("broken.model").unwrap_err(),
        ClassifyError::ModelLoad { .. }
    ));
}

#[test]
fn class_count_follows_model_metadata() {
    for classes in [2u8, 5, 10] {
        let (mut host, _) = host_with(classes);
        let classifier = Classifier::new(host.acquire("waste.model").unwrap());
        let scores = classifier.classify(&uniform_gray_300x300()).unwrap();
        assert_eq!(scores.len(), classes as usize);
    }
}

#[test]
fn quantized_and_float_policies_share_the_pipeline() {
    let (mut host, _) = host_with(10);
    let handle = host.acquire("waste.model").unwrap();

    let float = Classifier::new(Arc::clone(&handle));
    let quantized = Classifier::new(handle).quantized(true);

    let image = uniform_gray_300x300();
    assert_eq!(float.classify(&image).unwrap().len(), 10);
    assert_eq!(quantized.classify(&image).unwrap().len(), 10);
}
