//! The canonical content tree.
//!
//! The normalizer turns each raw test record into a [`Section`] whose
//! fields form a strictly acyclic tree of [`FieldNode`]s: leaves carry
//! a measured value, groups nest further nodes to arbitrary (finite)
//! depth. Field order is rendering order and is preserved end-to-end.

use serde::Serialize;

/// Abnormality marker on a leaf field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbnormalFlag {
    #[default]
    None,
    High,
    Low,
}

impl AbnormalFlag {
    /// One-letter flag for the table's flag column.
    pub fn marker(self) -> &'static str {
        match self {
            AbnormalFlag::None => "",
            AbnormalFlag::High => "H",
            AbnormalFlag::Low => "L",
        }
    }

    pub fn is_abnormal(self) -> bool {
        self != AbnormalFlag::None
    }
}

/// A leaf name/value data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    /// The raw value. Markup sniffing always reads this string.
    pub value: String,
    /// Optional presentation override for table cells.
    pub display_value: Option<String>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    pub abnormal: AbnormalFlag,
}

impl Field {
    /// The value to show in a table cell: `display_value` when present,
    /// the raw value otherwise.
    pub fn shown_value(&self) -> &str {
        self.display_value.as_deref().unwrap_or(&self.value)
    }
}

/// A node of the section tree: a closed sum of exactly two variants.
/// The normalizer rejects any other tag in the source data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldNode {
    Field(Field),
    Group { name: String, children: Vec<FieldNode> },
}

impl FieldNode {
    pub fn name(&self) -> &str {
        match self {
            FieldNode::Field(f) => &f.name,
            FieldNode::Group { name, .. } => name,
        }
    }

    /// Depth of the subtree rooted at this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            FieldNode::Field(_) => 1,
            FieldNode::Group { children, .. } => {
                1 + children.iter().map(FieldNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// One diagnostic test's results: the atomic layout unit handed to the
/// pagination engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    /// Department line, e.g. `"HAEMATOLOGY"`.
    pub category: String,
    /// Test name, e.g. `"Complete Blood Count"`.
    pub title: String,
    pub fields: Vec<FieldNode>,
}
