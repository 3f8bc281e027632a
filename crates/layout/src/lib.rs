//! # reflow-layout
//!
//! The pagination engine: assigns atomic content blocks to pages,
//! reserving fixed header/footer band space on every page and never
//! splitting a block that fits within the usable area. Height
//! measurement is delegated to the emitter through the
//! [`BlockMeasurer`] callback.

pub mod config;
pub mod measure;
pub mod output;
pub mod paginator;

pub use config::PageGeometry;
pub use measure::{BlockMeasurer, EstimatingMeasurer, MeasureError};
pub use output::{AtomicBlock, Page, PaginatedReport};
pub use paginator::{DEFAULT_FALLBACK_HEIGHT_MM, LayoutError, Paginator};
