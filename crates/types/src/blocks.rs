//! The flattened block model.
//!
//! After classification each section collapses into a [`SectionBlock`]:
//! the ordered render runs the emitter will draw, with the recursive
//! field tree flattened into indented table rows. These blocks (plus
//! the optional closing note) are the content units the pagination
//! engine places on pages.

use crate::tree::AbnormalFlag;
use serde::Serialize;

/// The rendering strategy chosen for one run of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    StructuredTable,
    EmbeddedMarkup,
    PlainText,
}

/// One row of a structured table run. Groups contribute a label-only
/// row; their children follow one indent level deeper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum TableRow {
    Field {
        label: String,
        value: String,
        reference_range: String,
        unit: String,
        abnormal: AbnormalFlag,
        indent: usize,
    },
    GroupLabel {
        label: String,
        indent: usize,
    },
}

impl TableRow {
    pub fn indent(&self) -> usize {
        match self {
            TableRow::Field { indent, .. } | TableRow::GroupLabel { indent, .. } => *indent,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TableRow::Field { label, .. } | TableRow::GroupLabel { label, .. } => label,
        }
    }
}

/// One `name: value` pair of a plain-text run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainEntry {
    pub label: String,
    pub value: String,
}

/// One render run of a section, in document order. A section may carry
/// an `EmbeddedMarkup` run followed by a `StructuredTable` run, or a
/// single `PlainText` run, never `PlainText` mixed with the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "run", rename_all = "snake_case")]
pub enum SectionRun {
    EmbeddedMarkup { fragments: Vec<String> },
    StructuredTable { rows: Vec<TableRow> },
    PlainText { entries: Vec<PlainEntry> },
}

impl SectionRun {
    pub fn mode(&self) -> RenderMode {
        match self {
            SectionRun::EmbeddedMarkup { .. } => RenderMode::EmbeddedMarkup,
            SectionRun::StructuredTable { .. } => RenderMode::StructuredTable,
            SectionRun::PlainText { .. } => RenderMode::PlainText,
        }
    }
}

/// A classified section ready for placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub category: String,
    pub title: String,
    pub runs: Vec<SectionRun>,
}

impl SectionBlock {
    pub fn modes(&self) -> Vec<RenderMode> {
        self.runs.iter().map(SectionRun::mode).collect()
    }
}

/// An atomic content unit in the pagination flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum ContentBlock {
    Section(SectionBlock),
    /// The trailing note from the report settings, flowing after the
    /// last section.
    ClosingNote { text: String, font_size: f32 },
}

impl ContentBlock {
    /// Short label used in diagnostics and log lines.
    pub fn label(&self) -> String {
        match self {
            ContentBlock::Section(s) if s.title.is_empty() => format!("section '{}'", s.category),
            ContentBlock::Section(s) => format!("section '{}'", s.title),
            ContentBlock::ClosingNote { .. } => "closing note".to_string(),
        }
    }
}
