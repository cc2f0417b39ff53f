//! Display node types produced by the tree projector.

use super::Variable;

/// Kind of node in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// File-level node.
    Root,
    /// The `Dimensions` group.
    Dimensions,
    /// The `Coordinates` group.
    Coordinates,
    /// The `Data Variables` group.
    DataVariables,
    /// A coordinate or data variable.
    Variable,
    /// Attributes of a variable.
    Attributes,
    /// Sample values of a variable.
    SampleData,
    /// Encoding of a variable.
    Encoding,
    /// Terminal entry.
    Leaf,
}

impl NodeKind {
    /// Fixed label for group kinds.
    pub fn group_label(self) -> Option<&'static str> {
        match self {
            NodeKind::Dimensions => Some("Dimensions"),
            NodeKind::Coordinates => Some("Coordinates"),
            NodeKind::DataVariables => Some("Data Variables"),
            NodeKind::Attributes => Some("Attributes"),
            NodeKind::SampleData => Some("Sample Data"),
            NodeKind::Encoding => Some("Encoding"),
            NodeKind::Root | NodeKind::Variable | NodeKind::Leaf => None,
        }
    }
}

/// Whether a node can be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Leaf, nothing to expand.
    None,
    /// Has children, currently hidden.
    Collapsed,
    /// Has children, currently shown.
    Expanded,
}

/// A node in the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    /// Text shown for the node.
    pub label: String,
    /// Expandability of the node.
    pub expansion: Expansion,
    /// The variable this node belongs to, if any.
    pub variable: Option<Variable>,
    /// Node kind.
    pub kind: NodeKind,
}

impl DisplayNode {
    /// Create a leaf node.
    pub fn leaf(label: String) -> Self {
        Self {
            label,
            expansion: Expansion::None,
            variable: None,
            kind: NodeKind::Leaf,
        }
    }

    /// Create a collapsed group node with its fixed label.
    pub fn group(kind: NodeKind, variable: Option<Variable>) -> Self {
        Self {
            label: kind.group_label().unwrap_or_default().to_string(),
            expansion: Expansion::Collapsed,
            variable,
            kind,
        }
    }

    /// Create a collapsed variable node.
    pub fn variable(variable: &Variable) -> Self {
        Self {
            label: variable.name.clone(),
            expansion: Expansion::Collapsed,
            variable: Some(variable.clone()),
            kind: NodeKind::Variable,
        }
    }

    /// Check if this node can have children.
    pub fn is_expandable(&self) -> bool {
        self.expansion != Expansion::None
    }

    /// Check if this node is a variable.
    pub fn is_variable(&self) -> bool {
        self.kind == NodeKind::Variable
    }

    /// Get display name with icon.
    pub fn display_name(&self) -> String {
        let icon = match self.kind {
            NodeKind::Root => "🏠",
            NodeKind::Dimensions => "📏",
            NodeKind::Coordinates | NodeKind::DataVariables => "📂",
            NodeKind::Variable => "🌡️",
            NodeKind::Attributes | NodeKind::SampleData | NodeKind::Encoding => "📋",
            NodeKind::Leaf => "·",
        };

        format!("{} {}", icon, self.label)
    }
}
