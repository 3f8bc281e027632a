//! The render pipeline.
//!
//! One invocation per report: normalize the raw data, join the
//! concurrent asset fan-out, classify and flatten the sections,
//! compose the bands, and paginate. Only structurally malformed input
//! is fatal; every degraded asset, overflow, and measurement fallback
//! travels out as a diagnostic beside the page list.

use crate::assets::resolve_report_assets;
use crate::error::PipelineError;
use log::{debug, info};
use reflow_core::{compose_footer, compose_header, flatten_document, normalize};
use reflow_layout::{
    BlockMeasurer, EstimatingMeasurer, DEFAULT_FALLBACK_HEIGHT_MM, PageGeometry, PaginatedReport,
    Paginator,
};
use reflow_render_html::{DocumentEmitter, HtmlEmitter};
use reflow_traits::{InMemoryResourceProvider, ResourceProvider};
use reflow_types::Diagnostic;
use serde_json::Value;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Builder;

pub struct ReportPipeline {
    provider: Arc<dyn ResourceProvider>,
    measurer: Box<dyn BlockMeasurer>,
    geometry: PageGeometry,
    fallback_height_mm: f32,
}

impl ReportPipeline {
    /// Runs the full pipeline and returns the page assignment with its
    /// diagnostics.
    pub async fn render(&self, data: &Value) -> Result<PaginatedReport, PipelineError> {
        let mut doc = normalize(data)?;
        debug!(
            "rendering report {} ({} sections)",
            doc.report.report_number,
            doc.sections.len()
        );

        let mut diagnostics = resolve_report_assets(&mut doc, &self.provider).await;

        let blocks = flatten_document(&doc);
        let header = compose_header(&doc);
        let footer = compose_footer(&doc);

        let paginator = Paginator::new(self.geometry, self.measurer.as_ref())
            .with_fallback_height(self.fallback_height_mm);
        let mut report =
            paginator.paginate(blocks, header, footer, doc.settings.background.clone())?;

        diagnostics.append(&mut report.diagnostics);
        report.diagnostics = diagnostics;

        info!(
            "report {} paginated into {} pages ({} diagnostics)",
            doc.report.report_number,
            report.page_count(),
            report.diagnostics.len()
        );
        Ok(report)
    }

    /// Renders and emits the reference HTML artifact to a writer.
    /// Returns the diagnostics collected along the way.
    pub async fn render_to_writer<W: io::Write>(
        &self,
        data: &Value,
        mut writer: W,
    ) -> Result<Vec<Diagnostic>, PipelineError> {
        let report = self.render(data).await?;
        let title = report
            .pages
            .first()
            .map(|page| format!("Lab Report {}", page.header.report_id))
            .unwrap_or_else(|| "Lab Report".to_string());
        HtmlEmitter::new(title).emit_to(&report, &mut writer)?;
        Ok(report.diagnostics)
    }

    /// Blocking convenience wrapper around [`Self::render_to_writer`].
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        data: &Value,
        path: P,
    ) -> Result<Vec<Diagnostic>, PipelineError> {
        let file = std::fs::File::create(path)?;
        let rt = Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");
        rt.block_on(self.render_to_writer(data, file))
    }
}

pub struct PipelineBuilder {
    provider: Option<Arc<dyn ResourceProvider>>,
    measurer: Option<Box<dyn BlockMeasurer>>,
    geometry: PageGeometry,
    fallback_height_mm: f32,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Resolves asset references against a local directory.
    pub fn with_asset_dir<P: AsRef<Path>>(self, path: P) -> Self {
        self.with_provider(Arc::new(
            reflow_resource::FilesystemResourceProvider::new(path),
        ))
    }

    /// Replaces the default estimating measurer, typically with one
    /// backed by the target backend's real metrics.
    pub fn with_measurer(mut self, measurer: Box<dyn BlockMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_fallback_height(mut self, height_mm: f32) -> Self {
        self.fallback_height_mm = height_mm;
        self
    }

    pub fn build(self) -> ReportPipeline {
        ReportPipeline {
            provider: self
                .provider
                .unwrap_or_else(|| Arc::new(InMemoryResourceProvider::new())),
            measurer: self
                .measurer
                .unwrap_or_else(|| Box::new(EstimatingMeasurer::default())),
            geometry: self.geometry,
            fallback_height_mm: self.fallback_height_mm,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            measurer: None,
            geometry: PageGeometry::a4(),
            fallback_height_mm: DEFAULT_FALLBACK_HEIGHT_MM,
        }
    }
}
