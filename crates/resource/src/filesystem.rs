//! Filesystem-based resource provider for native platforms.
//!
//! Report data commonly references signature and letterhead files
//! relative to an asset directory. This provider resolves those
//! references under a base path, with checks to keep a hostile
//! reference from escaping it (e.g. `../../../etc/passwd`).

use reflow_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A resource provider that loads assets from the local filesystem.
///
/// References are resolved relative to a base path, typically the
/// directory next to the report data file. Attempts to reach outside
/// the base path return `NotFound`.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for the escape check.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// Creates a provider rooted at the given base path. The base is
    /// canonicalized up front so resolved references can be checked
    /// against it.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Returns the base path for this provider.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a reference relative to the base path, or `None` when
    /// the reference would escape it.
    fn resolve_path_safe(&self, reference: &str) -> Option<PathBuf> {
        if Path::new(reference).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(reference);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // Canonicalization fails for files that don't exist; fall back
        // to rejecting any ".." component.
        for component in Path::new(reference).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve_path_safe(reference).ok_or_else(|| {
            ResourceError::NotFound(format!("{} (path traversal blocked)", reference))
        })?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(reference.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: reference.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, reference: &str) -> bool {
        self.resolve_path_safe(reference)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
