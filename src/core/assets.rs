//! Read-only, name-addressed byte stores for packaged model artifacts.
//!
//! A [`ResourceStore`] is the only way model bytes enter the pipeline. The
//! store is read-only by contract; there is no write interface. Two
//! implementations ship with the crate: [`DirAssets`] maps files from an
//! assets directory, and [`MemoryAssets`] serves byte blobs registered at
//! construction (useful for artifacts embedded with `include_bytes!`).

use crate::core::errors::ClassifyError;
use memmap2::Mmap;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

/// Bytes handed out by a resource store.
///
/// Filesystem stores return a read-only memory mapping so large artifacts
/// are not copied into the heap just to be parsed once; in-memory stores
/// return an owned copy.
pub enum AssetBytes {
    /// A read-only memory mapping of the artifact file.
    Mapped(Mmap),
    /// Owned artifact bytes.
    Owned(Vec<u8>),
}

impl AsRef<[u8]> for AssetBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            AssetBytes::Mapped(map) => map,
            AssetBytes::Owned(bytes) => bytes,
        }
    }
}

impl std::ops::Deref for AssetBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

impl std::fmt::Debug for AssetBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            AssetBytes::Mapped(_) => "mapped",
            AssetBytes::Owned(_) => "owned",
        };
        f.debug_struct("AssetBytes")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

/// A read-only, name-addressed byte-blob store bundled with the application.
pub trait ResourceStore: Send + Sync {
    /// Returns the bytes stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::ResourceNotFound`] if no blob is stored
    /// under `name`, and [`ClassifyError::Io`] if the blob exists but cannot
    /// be read.
    fn get(&self, name: &str) -> Result<AssetBytes, ClassifyError>;
}

/// A resource store backed by a directory of asset files.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Creates a store rooted at the given assets directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of the store.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ResourceStore for DirAssets {
    fn get(&self, name: &str) -> Result<AssetBytes, ClassifyError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ClassifyError::resource_not_found(name));
        }
        let file = File::open(&path)?;
        // Safety: the mapping is read-only and asset files are treated as
        // immutable for the lifetime of the map.
        let map = unsafe { Mmap::map(&file)? };
        Ok(AssetBytes::Mapped(map))
    }
}

/// A resource store serving blobs registered at construction.
///
/// ```rust
/// use wastesort::core::assets::{MemoryAssets, ResourceStore};
///
/// let store = MemoryAssets::new([("model.onnx", vec![0u8; 16])]);
/// assert!(store.get("model.onnx").is_ok());
/// assert!(store.get("missing.onnx").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Creates a store from `(name, bytes)` pairs.
    pub fn new<N, B, I>(blobs: I) -> Self
    where
        N: Into<String>,
        B: Into<Vec<u8>>,
        I: IntoIterator<Item = (N, B)>,
    {
        Self {
            blobs: blobs
                .into_iter()
                .map(|(name, bytes)| (name.into(), bytes.into()))
                .collect(),
        }
    }
}

impl ResourceStore for MemoryAssets {
    fn get(&self, name: &str) -> Result<AssetBytes, ClassifyError> {
        self.blobs
            .get(name)
            .map(|bytes| AssetBytes::Owned(bytes.clone()))
            .ok_or_else(|| ClassifyError::resource_not_found(name))
    }
}
