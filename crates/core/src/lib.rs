//! # reflow-core
//!
//! The report-shaped half of the engine: turning raw lab-report JSON
//! into classified, band-annotated content ready for pagination.
//!
//! - **normalize**: raw nested JSON → canonical [`reflow_types::ReportDocument`]
//! - **classify**: render-mode derivation and block flattening
//! - **sanitize**: the first-row markup cleaning pass
//! - **bands**: header/footer band composition
//!
//! Everything here is a synchronous, pure transform over immutable
//! input. Asset resolution and pagination live in their own crates.

pub mod bands;
pub mod classify;
pub mod error;
pub mod normalize;
pub mod sanitize;

pub use bands::{DEFAULT_FOOTER_HEIGHT_MM, DEFAULT_HEADER_HEIGHT_MM, compose_footer, compose_header};
pub use classify::{classify_section, flatten_document, is_markup_bearing, MARKUP_MARKERS};
pub use error::NormalizeError;
pub use normalize::normalize;
pub use sanitize::clean_markup;
