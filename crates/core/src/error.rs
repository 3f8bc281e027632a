//! Fatal error types for document normalization.
//!
//! Only structurally invalid input aborts a render; every other
//! condition in this crate degrades into a diagnostic.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The content tree violated its structural contract. The path
    /// names the offending node, e.g. `tests[2].fields[0].sub_fields`.
    #[error("malformed report input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// The report envelope (patient, report, dates, doctors, settings)
    /// could not be deserialized.
    #[error("invalid report envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

impl NormalizeError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        NormalizeError::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }
}
