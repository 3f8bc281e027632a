//! The unified error type for pipeline operations.

use reflow_core::NormalizeError;
use reflow_layout::LayoutError;
use reflow_render_html::EmitError;
use thiserror::Error;

/// The main error enum for high-level operations within the engine.
/// Every variant is fatal for the invocation; recoverable conditions
/// travel as diagnostics instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Render error: {0}")]
    Emit(#[from] EmitError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
