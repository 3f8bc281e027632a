//! Render-mode classification and block flattening.
//!
//! The source data carries no rendering flag; the strategy for each
//! section is derived by sniffing its field values. A value is
//! markup-bearing when it contains any token from a fixed marker set —
//! a shallow substring heuristic, kept deliberately shallow because
//! compatibility with existing report data depends on it.
//!
//! A section may emit an embedded-markup run followed by a structured
//! table run; a section with neither falls back to plain `name: value`
//! pairs. The recursive field tree flattens into indented table rows,
//! groups contributing a label-only row ahead of their children.

use crate::sanitize::clean_markup;
use reflow_types::{
    ContentBlock, FieldNode, PlainEntry, ReportDocument, Section, SectionBlock, SectionRun,
    TableRow,
};

/// Tokens that mark a field value as embedded markup.
pub const MARKUP_MARKERS: &[&str] = &["<table", "<p>", "<br", "<strong", "<b>", "</"];

/// Default point size for the closing note when the settings leave it
/// unset.
pub const DEFAULT_ENDING_LINE_FONT_SIZE: f32 = 12.0;

/// Shallow substring test for embedded markup.
pub fn is_markup_bearing(value: &str) -> bool {
    MARKUP_MARKERS.iter().any(|marker| value.contains(marker))
}

/// Classifies one section and flattens it into its render runs.
/// Deterministic: the decision depends only on the section content.
pub fn classify_section(section: &Section) -> SectionBlock {
    let mut runs = Vec::new();

    if markup_eligible(&section.fields) {
        let fragments = section
            .fields
            .iter()
            .filter_map(|node| match node {
                FieldNode::Field(f) if is_markup_bearing(&f.value) => Some(clean_markup(&f.value)),
                _ => None,
            })
            .collect();
        runs.push(SectionRun::EmbeddedMarkup { fragments });
    }

    if table_eligible(&section.fields) {
        let mut rows = Vec::new();
        collect_rows(&section.fields, 0, &mut rows);
        if !rows.is_empty() {
            runs.push(SectionRun::StructuredTable { rows });
        }
    }

    if runs.is_empty() {
        runs.push(SectionRun::PlainText {
            entries: plain_entries(&section.fields),
        });
    }

    SectionBlock {
        category: section.category.clone(),
        title: section.title.clone(),
        runs,
    }
}

/// Flattens the whole document into the content blocks handed to the
/// pagination engine: classified sections in order, then the closing
/// note when the settings carry one.
pub fn flatten_document(doc: &ReportDocument) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = doc
        .sections
        .iter()
        .map(|section| ContentBlock::Section(classify_section(section)))
        .collect();

    if !doc.settings.ending_line.trim().is_empty() {
        blocks.push(ContentBlock::ClosingNote {
            text: doc.settings.ending_line.clone(),
            font_size: doc
                .settings
                .ending_line_font_size
                .unwrap_or(DEFAULT_ENDING_LINE_FONT_SIZE),
        });
    }

    log::debug!("flattened {} content blocks", blocks.len());
    blocks
}

fn markup_eligible(fields: &[FieldNode]) -> bool {
    fields
        .iter()
        .any(|node| matches!(node, FieldNode::Field(f) if is_markup_bearing(&f.value)))
}

fn table_eligible(fields: &[FieldNode]) -> bool {
    fields.iter().any(|node| match node {
        FieldNode::Field(f) => {
            !f.value.is_empty()
                && !is_markup_bearing(&f.value)
                && (f.unit.is_some() || f.reference_range.is_some())
        }
        FieldNode::Group { .. } => true,
    })
}

fn collect_rows(nodes: &[FieldNode], indent: usize, rows: &mut Vec<TableRow>) {
    for node in nodes {
        match node {
            FieldNode::Field(f) => {
                // Markup-bearing values are handled by the markup run.
                if f.value.is_empty() || is_markup_bearing(&f.value) {
                    continue;
                }
                rows.push(TableRow::Field {
                    label: f.name.clone(),
                    value: f.shown_value().to_string(),
                    reference_range: f.reference_range.clone().unwrap_or_default(),
                    unit: f.unit.clone().unwrap_or_default(),
                    abnormal: f.abnormal,
                    indent,
                });
            }
            FieldNode::Group { name, children } => {
                rows.push(TableRow::GroupLabel {
                    label: name.clone(),
                    indent,
                });
                collect_rows(children, indent + 1, rows);
            }
        }
    }
}

fn plain_entries(fields: &[FieldNode]) -> Vec<PlainEntry> {
    fields
        .iter()
        .filter_map(|node| match node {
            FieldNode::Field(f) if !f.value.is_empty() => Some(PlainEntry {
                label: f.name.clone(),
                value: f.value.clone(),
            }),
            _ => None,
        })
        .collect()
}
