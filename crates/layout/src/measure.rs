//! The measurement seam between the pagination engine and the emitter.
//!
//! Exact text shaping is backend-specific, so the engine treats height
//! measurement as an opaque callback: `measure(block) -> height_mm`.
//! Implementations must be deterministic for a given block and page
//! width. A measurement failure never drops a block; the engine places
//! it with a fallback height and records a diagnostic.

use reflow_types::{ContentBlock, SectionRun};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MeasureError {
    #[error("block cannot be measured: {0}")]
    Unmeasurable(String),
}

pub trait BlockMeasurer: Send + Sync {
    fn measure(&self, block: &ContentBlock) -> Result<f32, MeasureError>;
}

/// Row-count based height estimation.
///
/// Good enough to paginate for backends that tolerate a few millimeters
/// of slack (the reference HTML emitter does); backends with real font
/// metrics supply their own measurer instead.
#[derive(Debug, Clone, Copy)]
pub struct EstimatingMeasurer {
    /// Category line + test title + separator rule.
    pub section_chrome_mm: f32,
    pub table_header_mm: f32,
    pub table_row_mm: f32,
    pub plain_entry_mm: f32,
    pub markup_fragment_base_mm: f32,
    pub markup_row_mm: f32,
    pub markup_paragraph_mm: f32,
    pub markup_break_mm: f32,
    pub note_line_mm: f32,
}

impl Default for EstimatingMeasurer {
    fn default() -> Self {
        Self {
            section_chrome_mm: 14.0,
            table_header_mm: 6.0,
            table_row_mm: 5.0,
            plain_entry_mm: 5.5,
            markup_fragment_base_mm: 4.0,
            markup_row_mm: 6.0,
            markup_paragraph_mm: 4.5,
            markup_break_mm: 3.0,
            note_line_mm: 6.0,
        }
    }
}

impl EstimatingMeasurer {
    fn run_height(&self, run: &SectionRun) -> f32 {
        match run {
            SectionRun::StructuredTable { rows } => {
                self.table_header_mm + rows.len() as f32 * self.table_row_mm
            }
            SectionRun::PlainText { entries } => entries.len() as f32 * self.plain_entry_mm,
            SectionRun::EmbeddedMarkup { fragments } => fragments
                .iter()
                .map(|fragment| self.fragment_height(fragment))
                .sum(),
        }
    }

    fn fragment_height(&self, fragment: &str) -> f32 {
        let lower = fragment.to_ascii_lowercase();
        let rows = lower.matches("<tr").count() as f32;
        let paragraphs = lower.matches("<p").count() as f32;
        let breaks = lower.matches("<br").count() as f32;
        self.markup_fragment_base_mm
            + rows * self.markup_row_mm
            + paragraphs * self.markup_paragraph_mm
            + breaks * self.markup_break_mm
    }
}

impl BlockMeasurer for EstimatingMeasurer {
    fn measure(&self, block: &ContentBlock) -> Result<f32, MeasureError> {
        let height = match block {
            ContentBlock::Section(section) => {
                self.section_chrome_mm
                    + section
                        .runs
                        .iter()
                        .map(|run| self.run_height(run))
                        .sum::<f32>()
            }
            ContentBlock::ClosingNote { text, .. } => {
                text.lines().count().max(1) as f32 * self.note_line_mm
            }
        };
        Ok(height)
    }
}
