//! Explorer feature - incremental outline of the cached dataset.
//!
//! This module keeps the outline's cursor and expansion state. Children
//! are asked from the projector every time the visible list is rebuilt.

pub mod details;
pub mod tree;

use crate::data::{CachedSession, DisplayNode, Expansion};
use crate::outline;
use std::collections::HashSet;
use std::sync::Arc;

/// Explorer state - combines tree navigation and details display.
#[derive(Debug)]
pub struct ExplorerState {
    /// All tree items in display order (only visible items).
    items: Vec<TreeItem>,
    /// Cursor position (index into items).
    cursor: usize,
    /// Session the outline is projected from.
    session: Option<Arc<CachedSession>>,
    /// Keys of expanded nodes.
    expanded_paths: HashSet<String>,
    /// Scroll offset for the tree view.
    scroll_offset: usize,
    /// Show preview/details panel.
    pub show_preview: bool,
    /// Preview scroll offset.
    pub preview_scroll: u16,
}

/// A single item in the tree view.
#[derive(Debug, Clone)]
pub struct TreeItem {
    /// The display node.
    pub node: DisplayNode,
    /// Kind and label of every ancestor and the node itself.
    pub path: String,
    /// Nesting level.
    pub level: usize,
}

impl TreeItem {
    /// Whether this node is expanded.
    pub fn expanded(&self) -> bool {
        self.node.expansion == Expansion::Expanded
    }
}

impl ExplorerState {
    /// Create a new explorer state.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            session: None,
            expanded_paths: HashSet::new(),
            scroll_offset: 0,
            show_preview: true,
            preview_scroll: 0,
        }
    }

    /// Show the outline of a session, collapsed.
    pub fn load_session(&mut self, session: Arc<CachedSession>) {
        self.session = Some(session);
        self.expanded_paths.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.preview_scroll = 0;
        self.rebuild_visible_items();
    }

    /// Session being shown.
    pub fn session(&self) -> Option<&CachedSession> {
        self.session.as_deref()
    }

    /// Rebuild the visible items list based on expanded state.
    fn rebuild_visible_items(&mut self) {
        self.items.clear();
        let session = self.session.clone();
        for node in outline::children(session.as_deref(), None) {
            self.add_visible_recursive(session.as_deref(), node, "", 0);
        }
        if self.cursor >= self.items.len() {
            self.cursor = self.items.len().saturating_sub(1);
        }
    }

    fn add_visible_recursive(
        &mut self,
        session: Option<&CachedSession>,
        mut node: DisplayNode,
        parent_path: &str,
        level: usize,
    ) {
        let path = format!("{}/{:?}:{}", parent_path, node.kind, node.label);
        let is_expanded = node.is_expandable() && self.expanded_paths.contains(&path);
        if node.is_expandable() {
            node.expansion = if is_expanded {
                Expansion::Expanded
            } else {
                Expansion::Collapsed
            };
        }

        let kids = if is_expanded {
            outline::children(session, Some(&node))
        } else {
            Vec::new()
        };

        self.items.push(TreeItem {
            node,
            path: path.clone(),
            level,
        });

        for child in kids {
            self.add_visible_recursive(session, child, &path, level + 1);
        }
    }

    /// Move the cursor up one position.
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.preview_scroll = 0;
        }
    }

    /// Move the cursor down one position.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
            self.preview_scroll = 0;
        }
    }

    /// Adjust scroll to keep cursor visible.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }

        if self.cursor >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor.saturating_sub(viewport_height - 1);
        }
    }

    /// Get the current scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Expand the node at the current cursor position.
    pub fn expand_current(&mut self) {
        if let Some(item) = self.items.get(self.cursor) {
            if item.node.is_expandable() && !item.expanded() {
                let path = item.path.clone();
                self.expanded_paths.insert(path);
                self.rebuild_visible_items();
            }
        }
    }

    /// Collapse the node at the cursor, or jump to its parent if it is not expanded.
    pub fn collapse_current(&mut self) {
        let Some(item) = self.items.get(self.cursor) else {
            return;
        };

        if item.expanded() {
            let path = item.path.clone();
            self.expanded_paths.remove(&path);
            self.rebuild_visible_items();
        } else if item.level > 0 {
            let level = item.level;
            if let Some(parent) = self.items[..self.cursor]
                .iter()
                .rposition(|candidate| candidate.level < level)
            {
                self.cursor = parent;
            }
        }
    }

    /// Go to the first item.
    pub fn goto_first(&mut self) {
        self.cursor = 0;
    }

    /// Go to the last visible item.
    pub fn goto_last(&mut self) {
        if !self.items.is_empty() {
            self.cursor = self.items.len() - 1;
        }
    }

    /// Get all currently visible items in the tree.
    pub fn visible_items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Get the current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the current node.
    pub fn current_node(&self) -> Option<&DisplayNode> {
        self.items.get(self.cursor).map(|item| &item.node)
    }

    /// Toggle preview panel.
    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    /// Scroll preview down.
    pub fn scroll_down(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_add(5);
    }

    /// Scroll preview up.
    pub fn scroll_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(5);
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}
