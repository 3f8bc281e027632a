//! # reflow
//!
//! Lab-report layout and pagination engine.
//!
//! The pipeline normalizes nested test-result JSON into a canonical
//! content tree, classifies each section into a rendering mode,
//! resolves asset references concurrently, computes the repeating
//! header/footer bands, and assigns atomic content blocks to pages —
//! never splitting a block that fits the usable area. A pluggable
//! emitter turns the page list into the rendered artifact; the
//! reference backend produces paginated HTML.
//!
//! ```no_run
//! use reflow::PipelineBuilder;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), reflow::PipelineError> {
//! let pipeline = PipelineBuilder::new().with_asset_dir("assets").build();
//! let diagnostics = pipeline.render_to_file(&json!({ "tests": [] }), "report.html")?;
//! for warning in &diagnostics {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{PipelineBuilder, ReportPipeline};

// Re-export the member crates under their concern names.
pub use reflow_core as report_core;
pub use reflow_layout as layout;
pub use reflow_render_html as render_html;
pub use reflow_resource as resource;
pub use reflow_traits as traits;
pub use reflow_types as types;

// Commonly used types at the crate root.
pub use reflow_layout::{
    BlockMeasurer, EstimatingMeasurer, MeasureError, Page, PageGeometry, PaginatedReport,
};
pub use reflow_render_html::{DocumentEmitter, EmitError, HtmlEmitter};
pub use reflow_traits::{
    InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData,
};
pub use reflow_types::{Diagnostic, ReportDocument};
