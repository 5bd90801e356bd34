//! Model artifact hosting: load once, hand out one shared handle.

use super::runtime::{InferenceRuntime, RuntimeSession, SessionOptions, TensorInput};
use crate::core::assets::ResourceStore;
use crate::core::errors::ClassifyError;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// A live inference handle bound to one loaded model artifact.
///
/// The handle owns the runtime session behind a mutex so that invocations
/// are serialized and close happens exactly once. After [`ModelHost::release`]
/// every further call fails with [`ClassifyError::Inference`]; the handle is
/// never reusable once closed.
pub struct InferenceHandle {
    name: String,
    session: Mutex<Option<Box<dyn RuntimeSession>>>,
}

impl std::fmt::Debug for InferenceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceHandle")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl InferenceHandle {
    fn new(name: String, session: Box<dyn RuntimeSession>) -> Self {
        Self {
            name,
            session: Mutex::new(Some(session)),
        }
    }

    /// Returns the resource name the bound artifact was loaded from.
    pub fn model_name(&self) -> &str {
        &self.name
    }

    /// Returns true once the handle has been released.
    pub fn is_closed(&self) -> bool {
        match self.session.lock() {
            Ok(guard) => guard.is_none(),
            Err(_) => true,
        }
    }

    /// Returns the class count `N` declared by the model's output metadata.
    pub fn output_classes(&self) -> Result<usize, ClassifyError> {
        let guard = self
            .session
            .lock()
            .map_err(|_| ClassifyError::inference("session lock poisoned"))?;
        match guard.as_ref() {
            Some(session) => session.output_classes(),
            None => Err(ClassifyError::inference(format!(
                "handle for '{}' is closed",
                self.name
            ))),
        }
    }

    /// Runs the model synchronously on one prepared input.
    ///
    /// Blocks the calling thread until inference completes. Concurrent
    /// callers are serialized on the internal lock; results are identical to
    /// sequential invocation.
    pub fn run(&self, input: &TensorInput) -> Result<Vec<f32>, ClassifyError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| ClassifyError::inference("session lock poisoned"))?;
        match guard.as_mut() {
            Some(session) => session.run(input),
            None => Err(ClassifyError::inference(format!(
                "handle for '{}' is closed",
                self.name
            ))),
        }
    }

    /// Drops the runtime session. Idempotent.
    fn close(&self) {
        if let Ok(mut guard) = self.session.lock() {
            if guard.take().is_some() {
                debug!(model = %self.name, "inference handle closed");
            }
        }
    }
}

/// Loads a model artifact from a resource store exactly once and hands out a
/// single shared inference handle.
///
/// The host is an explicit ownership object: callers thread it through their
/// code instead of relying on ambient global state. At most one handle is
/// live per host at any time.
///
/// ```rust,no_run
/// use wastesort::core::assets::DirAssets;
/// use wastesort::core::inference::{ModelHost, OrtRuntime, SessionOptions};
///
/// # fn main() -> Result<(), wastesort::core::errors::ClassifyError> {
/// let mut host = ModelHost::new(
///     DirAssets::new("assets"),
///     OrtRuntime::new(),
///     SessionOptions::default(),
/// );
/// let handle = host.acquire("wastesort.onnx")?;
/// // ... classify ...
/// host.release();
/// # Ok(())
/// # }
/// ```
pub struct ModelHost {
    store: Box<dyn ResourceStore>,
    runtime: Box<dyn InferenceRuntime>,
    options: SessionOptions,
    handle: Option<Arc<InferenceHandle>>,
}

impl std::fmt::Debug for ModelHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHost")
            .field("options", &self.options)
            .field("acquired", &self.handle.is_some())
            .finish()
    }
}

impl ModelHost {
    /// Creates a host over the given store and runtime.
    pub fn new(
        store: impl ResourceStore + 'static,
        runtime: impl InferenceRuntime + 'static,
        options: SessionOptions,
    ) -> Self {
        Self {
            store: Box::new(store),
            runtime: Box::new(runtime),
            options,
            handle: None,
        }
    }

    /// Returns true while a handle is live.
    pub fn is_acquired(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns the inference handle, loading the artifact on first call.
    ///
    /// The first call reads the artifact bytes from the store, builds a
    /// session with the configured parallelism hint, and caches the handle.
    /// While the host is initialized every further call returns the same
    /// handle without touching the store again — including calls with a
    /// different `name`, which is ignored until [`release`](Self::release).
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::ResourceNotFound`] — `name` is absent from the store.
    /// * [`ClassifyError::ModelLoad`] — the bytes are not a valid model.
    pub fn acquire(&mut self, name: &str) -> Result<Arc<InferenceHandle>, ClassifyError> {
        if let Some(handle) = &self.handle {
            return Ok(Arc::clone(handle));
        }

        let bytes = self.store.get(name)?;
        debug!(model = %name, len = bytes.len(), "loading model artifact");
        let session = self.runtime.load(&bytes, &self.options)?;
        let handle = Arc::new(InferenceHandle::new(name.to_string(), session));
        info!(model = %name, "model artifact loaded");

        self.handle = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// Releases the live handle's resources. Idempotent.
    ///
    /// Safe to call when never acquired (no-op) or already released. After
    /// release, [`acquire`](Self::acquire) may legitimately be called again
    /// to reload.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
        }
    }
}

impl Drop for ModelHost {
    fn drop(&mut self) {
        self.release();
    }
}
