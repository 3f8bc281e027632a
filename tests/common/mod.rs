pub mod fixtures;

use reflow::{PaginatedReport, PipelineBuilder, PipelineError, ReportPipeline};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Render a report with the default pipeline (estimating measurer,
/// empty in-memory provider).
pub fn render_report(data: &Value) -> Result<PaginatedReport, PipelineError> {
    render_with_pipeline(&PipelineBuilder::new().build(), data)
}

/// Render a report with a custom-built pipeline.
pub fn render_with_pipeline(
    pipeline: &ReportPipeline,
    data: &Value,
) -> Result<PaginatedReport, PipelineError> {
    tokio::runtime::Runtime::new()?.block_on(pipeline.render(data))
}
