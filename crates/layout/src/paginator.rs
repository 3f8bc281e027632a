//! The pagination engine.
//!
//! A single-pass, greedy first-fit reducer over the flattened block
//! sequence. The usable height per page is the page height minus the
//! two band heights; a block that fits the remaining space is placed,
//! a block that doesn't closes the page and retries on a fresh one,
//! and a block taller than any empty page is placed anyway — alone,
//! extending past the nominal content area — with a non-fatal
//! overflow diagnostic. Content blocks are never split.

use crate::config::PageGeometry;
use crate::measure::BlockMeasurer;
use crate::output::{AtomicBlock, Page, PaginatedReport};
use reflow_types::{AssetSlot, ContentBlock, Diagnostic, FooterBand, HeaderBand};
use std::sync::Arc;
use thiserror::Error;

/// Tolerance for floating point inaccuracies in fit checks.
const FIT_EPSILON: f32 = 0.01;

/// Height used for a block whose measurement fails.
pub const DEFAULT_FALLBACK_HEIGHT_MM: f32 = 40.0;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(
        "header ({header_mm:.1}mm) and footer ({footer_mm:.1}mm) bands leave no usable area on a {page_mm:.1}mm page"
    )]
    BandsExceedPage {
        header_mm: f32,
        footer_mm: f32,
        page_mm: f32,
    },
}

pub struct Paginator<'a> {
    geometry: PageGeometry,
    measurer: &'a dyn BlockMeasurer,
    fallback_height_mm: f32,
}

impl<'a> Paginator<'a> {
    pub fn new(geometry: PageGeometry, measurer: &'a dyn BlockMeasurer) -> Self {
        Self {
            geometry,
            measurer,
            fallback_height_mm: DEFAULT_FALLBACK_HEIGHT_MM,
        }
    }

    pub fn with_fallback_height(mut self, height_mm: f32) -> Self {
        self.fallback_height_mm = height_mm;
        self
    }

    /// Assigns the block sequence to pages, attaching the bands to
    /// every page.
    pub fn paginate(
        &self,
        blocks: Vec<ContentBlock>,
        header: HeaderBand,
        footer: FooterBand,
        background: AssetSlot,
    ) -> Result<PaginatedReport, LayoutError> {
        let capacity = self
            .geometry
            .content_height(header.height_mm, footer.height_mm);
        if capacity <= FIT_EPSILON {
            return Err(LayoutError::BandsExceedPage {
                header_mm: header.height_mm,
                footer_mm: footer.height_mm,
                page_mm: self.geometry.page_height_mm,
            });
        }

        let mut diagnostics = Vec::new();
        let mut flow = Flow::new(Arc::new(header), Arc::new(footer), capacity);

        for block in blocks {
            let height_mm = match self.measurer.measure(&block) {
                Ok(h) => h,
                Err(e) => {
                    log::warn!(
                        "measurement failed for {}; using fallback height {:.1}mm: {e}",
                        block.label(),
                        self.fallback_height_mm
                    );
                    diagnostics.push(Diagnostic::MeasurementFallback {
                        block: block.label(),
                        fallback_mm: self.fallback_height_mm,
                        reason: e.to_string(),
                    });
                    self.fallback_height_mm
                }
            };

            if height_mm <= flow.remaining + FIT_EPSILON {
                flow.place(block, height_mm);
            } else if flow.has_content() {
                flow.close_page();
                if height_mm <= flow.capacity + FIT_EPSILON {
                    flow.place(block, height_mm);
                } else {
                    flow.place_overflow(block, height_mm, &mut diagnostics);
                }
            } else {
                flow.place_overflow(block, height_mm, &mut diagnostics);
            }
        }

        if flow.has_content() {
            flow.close_page();
        }
        // A report with no content still renders its letterhead.
        if flow.pages.is_empty() {
            flow.close_page();
        }

        log::debug!(
            "paginated into {} pages ({} diagnostics)",
            flow.pages.len(),
            diagnostics.len()
        );

        Ok(PaginatedReport {
            pages: flow.pages,
            geometry: self.geometry,
            background,
            diagnostics,
        })
    }
}

/// The reducer state: one open page plus the committed pages.
struct Flow {
    header: Arc<HeaderBand>,
    footer: Arc<FooterBand>,
    capacity: f32,
    remaining: f32,
    open: Vec<AtomicBlock>,
    pages: Vec<Page>,
}

impl Flow {
    fn new(header: Arc<HeaderBand>, footer: Arc<FooterBand>, capacity: f32) -> Self {
        Self {
            header,
            footer,
            capacity,
            remaining: capacity,
            open: Vec::new(),
            pages: Vec::new(),
        }
    }

    fn has_content(&self) -> bool {
        !self.open.is_empty()
    }

    fn place(&mut self, block: ContentBlock, height_mm: f32) {
        self.open.push(AtomicBlock::Content { block, height_mm });
        self.remaining -= height_mm;
    }

    /// Overflow policy: the block goes alone on the current (empty)
    /// page and the page is committed immediately, so the next block
    /// starts fresh.
    fn place_overflow(
        &mut self,
        block: ContentBlock,
        height_mm: f32,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let page = self.pages.len() + 1;
        log::warn!(
            "{} ({height_mm:.1}mm) exceeds usable page area ({:.1}mm); placing alone on page {page}",
            block.label(),
            self.capacity
        );
        diagnostics.push(Diagnostic::BlockOverflow {
            page,
            block: block.label(),
            height_mm,
            capacity_mm: self.capacity,
        });
        self.place(block, height_mm);
        self.close_page();
    }

    /// Commits the open page: spacers bracket the content so the flow
    /// clears the overlay bands, and the bands themselves attach to
    /// the page.
    fn close_page(&mut self) {
        let mut body = Vec::with_capacity(self.open.len() + 2);
        body.push(AtomicBlock::Spacer {
            height_mm: self.header.height_mm,
        });
        body.append(&mut self.open);
        body.push(AtomicBlock::Spacer {
            height_mm: self.footer.height_mm,
        });
        self.pages.push(Page {
            number: self.pages.len() + 1,
            header: Arc::clone(&self.header),
            body,
            footer: Arc::clone(&self.footer),
        });
        self.remaining = self.capacity;
    }
}
