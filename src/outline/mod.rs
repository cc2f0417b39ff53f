//! Tree projection of the cached dataset.
//!
//! The outline is never stored. Each expansion asks [`children`] for the
//! children of one node, computed from the cached session. The explorer
//! expands incrementally; the text outline and the HTML document
//! materialize every level up front.

mod text;
mod values;

pub use text::format_outline;
pub use values::{coerce_display, json_text};

use crate::data::{CachedSession, DisplayNode, Expansion, NodeKind, ValueMap};

/// Node standing for the whole file, labeled with its file name.
///
/// Its children are the same as asking for the children of no parent.
pub fn root_node(session: &CachedSession) -> DisplayNode {
    DisplayNode {
        label: session.display_name(),
        expansion: Expansion::Expanded,
        variable: None,
        kind: NodeKind::Root,
    }
}

/// Children of `parent`, or of the root when `parent` is `None`.
///
/// Returns an empty list when no session exists or the node has no
/// children.
pub fn children(session: Option<&CachedSession>, parent: Option<&DisplayNode>) -> Vec<DisplayNode> {
    let Some(session) = session else {
        return Vec::new();
    };
    let dataset = &session.dataset;

    let Some(parent) = parent else {
        return group_nodes();
    };

    match parent.kind {
        NodeKind::Root => group_nodes(),
        NodeKind::Dimensions => dataset
            .dims
            .iter()
            .map(|dim| DisplayNode::leaf(format!("{} ({})", dim.name, dim.size)))
            .collect(),
        NodeKind::Coordinates => dataset.coords.iter().map(DisplayNode::variable).collect(),
        NodeKind::DataVariables => dataset.data_vars.iter().map(DisplayNode::variable).collect(),
        NodeKind::Variable => match &parent.variable {
            Some(var) => [NodeKind::Attributes, NodeKind::SampleData, NodeKind::Encoding]
                .into_iter()
                .map(|kind| DisplayNode::group(kind, Some(var.clone())))
                .collect(),
            None => Vec::new(),
        },
        NodeKind::Attributes => match &parent.variable {
            Some(var) => mapping_leaves(&var.attrs),
            None => Vec::new(),
        },
        NodeKind::Encoding => match &parent.variable {
            Some(var) => mapping_leaves(&var.encoding),
            None => Vec::new(),
        },
        NodeKind::SampleData => match &parent.variable {
            Some(var) => var
                .samples()
                .iter()
                .enumerate()
                .map(|(i, value)| DisplayNode::leaf(format!("[{}]: {}", i, coerce_display(value))))
                .collect(),
            None => Vec::new(),
        },
        NodeKind::Leaf => Vec::new(),
    }
}

fn group_nodes() -> Vec<DisplayNode> {
    [NodeKind::Dimensions, NodeKind::Coordinates, NodeKind::DataVariables]
        .into_iter()
        .map(|kind| DisplayNode::group(kind, None))
        .collect()
}

/// `key: <json>` leaves for an attribute or encoding mapping.
fn mapping_leaves(map: &ValueMap) -> Vec<DisplayNode> {
    map.iter()
        .map(|(key, value)| DisplayNode::leaf(format!("{}: {}", key, json_text(value))))
        .collect()
}
