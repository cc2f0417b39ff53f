//! Plain-text rendering of the fully expanded outline.

use super::{children, root_node};
use crate::data::{CachedSession, DisplayNode};

/// Render every node of the outline as an indented tree.
pub fn format_outline(session: &CachedSession) -> String {
    let root = root_node(session);
    let mut text = format!("{}\n", root.label);

    let top = children(Some(session), Some(&root));
    for (i, node) in top.iter().enumerate() {
        format_node(session, node, "", i + 1 == top.len(), &mut text);
    }

    text
}

fn format_node(
    session: &CachedSession,
    node: &DisplayNode,
    prefix: &str,
    is_last: bool,
    out: &mut String,
) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(&format!("{}{}{}\n", prefix, connector, node.label));

    if !node.is_expandable() {
        return;
    }

    let new_prefix = format!("{}{}   ", prefix, if is_last { " " } else { "│" });
    let kids = children(Some(session), Some(node));
    for (i, child) in kids.iter().enumerate() {
        format_node(session, child, &new_prefix, i + 1 == kids.len(), out);
    }
}
