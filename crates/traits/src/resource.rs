//! ResourceProvider trait for abstracting asset resolution.
//!
//! Signature images, letterhead backgrounds, and barcodes are referenced
//! by URL or path in the report data. This trait lets the pipeline
//! resolve those references without being tied to filesystem access,
//! and its error variant is the failure marker the inliner degrades on:
//! a provider failure is never fatal to a render.

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for asset resolution.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of asset bytes.
///
/// Implementations must not raise for network-style failures; they
/// return the error variant and the caller decides how to degrade.
///
/// # Implementations
///
/// - `FilesystemResourceProvider` (reflow-resource): loads from a base
///   directory on native platforms
/// - [`InMemoryResourceProvider`]: pre-populated map, useful for tests
///   and embedded assets
pub trait ResourceProvider: Send + Sync + Debug {
    /// Resolve a reference (URL or provider-relative path) to bytes.
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError>;

    /// Whether the reference can be resolved without loading it.
    fn exists(&self, reference: &str) -> bool;

    /// Human-readable provider name for log lines.
    fn name(&self) -> &'static str;
}

/// An in-memory resource provider.
///
/// Assets are stored under their reference string and must be
/// pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: std::sync::RwLock<std::collections::HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes under a reference.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is
    /// poisoned.
    pub fn add(&self, reference: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let reference = reference.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: reference.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(reference, Arc::new(data));
        Ok(())
    }

    /// Number of stored assets. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: reference.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(reference)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(reference.to_string()))
    }

    fn exists(&self, reference: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(reference))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
