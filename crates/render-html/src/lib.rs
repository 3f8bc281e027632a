//! # reflow-render-html
//!
//! The reference emitter: turns a paginated report into one
//! self-contained HTML artifact with fixed-size page boxes, overlay
//! bands, and inline data-URI images, ready for a headless browser to
//! print. Backends with real font metrics implement [`DocumentEmitter`]
//! themselves and plug in their own measurer.

mod html;

use reflow_layout::PaginatedReport;
use std::io;
use thiserror::Error;

pub use html::HtmlEmitter;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A backend that turns the final page list into a rendered artifact.
pub trait DocumentEmitter {
    fn emit_to(&self, report: &PaginatedReport, writer: &mut dyn io::Write)
    -> Result<(), EmitError>;
}
