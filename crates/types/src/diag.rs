//! Non-fatal render diagnostics.
//!
//! Nothing in the pipeline aborts a render because of a missing image
//! or an unmeasurable block; those conditions are collected here and
//! returned alongside the successful output.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An asset reference could not be resolved; the slot was degraded
    /// to absent and the render continued.
    AssetUnavailable {
        /// Which slot degraded, e.g. `"background"` or
        /// `"signature for Dr. A. Sharma"`.
        slot: String,
        reference: String,
        reason: String,
    },
    /// A block taller than the usable page area was placed alone on
    /// its page, extending past the nominal content area.
    BlockOverflow {
        page: usize,
        block: String,
        height_mm: f32,
        capacity_mm: f32,
    },
    /// Measurement failed; the block was placed with the fallback
    /// height instead of being dropped.
    MeasurementFallback {
        block: String,
        fallback_mm: f32,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AssetUnavailable {
                slot,
                reference,
                reason,
            } => write!(f, "asset for {slot} unavailable ({reference}): {reason}"),
            Diagnostic::BlockOverflow {
                page,
                block,
                height_mm,
                capacity_mm,
            } => write!(
                f,
                "{block} is {height_mm:.1}mm tall and exceeds the {capacity_mm:.1}mm usable area; placed alone on page {page}"
            ),
            Diagnostic::MeasurementFallback {
                block,
                fallback_mm,
                reason,
            } => write!(
                f,
                "could not measure {block} ({reason}); placed with fallback height {fallback_mm:.1}mm"
            ),
        }
    }
}
