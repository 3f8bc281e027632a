//! Asset slots and inline asset data.
//!
//! Every image the report can carry (letterhead background, barcode,
//! doctor signatures) lives in an [`AssetSlot`]. A slot starts out
//! `Unresolved` with the reference string taken from the input data,
//! and is either joined with resolved bytes by the asset inliner or
//! degraded to `Absent`. A degraded slot renders as nothing; it never
//! fails the surrounding document.

use std::sync::Arc;

/// Reference-counted asset bytes shared between pages and bands.
pub type SharedAssetData = Arc<Vec<u8>>;

/// Resolved binary content for one image slot.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAsset {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    pub bytes: SharedAssetData,
}

impl InlineAsset {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: Arc::new(bytes),
        }
    }
}

/// One image slot of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssetSlot {
    /// A reference (URL or provider path) that has not been resolved yet.
    Unresolved { reference: String },
    /// Inline content ready for the emitter.
    Resolved(InlineAsset),
    /// Nothing to render. Empty references and failed resolutions end here.
    #[default]
    Absent,
}

impl AssetSlot {
    /// Builds a slot from a raw reference string. Empty or
    /// whitespace-only references collapse to `Absent`.
    pub fn from_reference(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        if reference.trim().is_empty() {
            AssetSlot::Absent
        } else {
            AssetSlot::Unresolved { reference }
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            AssetSlot::Unresolved { reference } => Some(reference),
            _ => None,
        }
    }

    pub fn as_resolved(&self) -> Option<&InlineAsset> {
        match self {
            AssetSlot::Resolved(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AssetSlot::Absent)
    }
}
