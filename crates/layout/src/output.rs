//! Output types from the pagination engine.

use crate::config::PageGeometry;
use reflow_types::{AssetSlot, ContentBlock, Diagnostic, FooterBand, HeaderBand};
use std::sync::Arc;

/// One placed unit in a page's body flow.
///
/// Spacers reserve the band overlays' space inside the flow; they
/// bracket the content so the first real block begins below the header
/// and the last ends above the footer.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicBlock {
    Spacer { height_mm: f32 },
    Content { block: ContentBlock, height_mm: f32 },
}

/// One finished page: the body flow plus the two overlay bands. Band
/// content is shared, not copied, so it is identical across pages by
/// construction.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub header: Arc<HeaderBand>,
    pub body: Vec<AtomicBlock>,
    pub footer: Arc<FooterBand>,
}

impl Page {
    /// The real content blocks on this page, spacers skipped.
    pub fn content_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.body.iter().filter_map(|slot| match slot {
            AtomicBlock::Content { block, .. } => Some(block),
            AtomicBlock::Spacer { .. } => None,
        })
    }

    /// Total measured height of the content placed on this page.
    pub fn content_height_mm(&self) -> f32 {
        self.body
            .iter()
            .map(|slot| match slot {
                AtomicBlock::Content { height_mm, .. } => *height_mm,
                AtomicBlock::Spacer { .. } => 0.0,
            })
            .sum()
    }
}

/// The engine's result: the page list plus every non-fatal condition
/// collected along the way.
#[derive(Debug, Clone)]
pub struct PaginatedReport {
    pub pages: Vec<Page>,
    pub geometry: PageGeometry,
    /// Full-page letterhead background, repeated on every page.
    pub background: AssetSlot,
    pub diagnostics: Vec<Diagnostic>,
}

impl PaginatedReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
