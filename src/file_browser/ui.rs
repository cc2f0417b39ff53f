//! File browser UI rendering.

use super::{FileBrowserState, FileEntry};
use crate::inspector::DATASET_EXTENSIONS;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the dataset picker.
pub fn draw_file_browser(
    f: &mut Frame<'_>,
    state: &mut FileBrowserState,
    area: Rect,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .title(format!(" Open dataset: {} ", state.current_dir.display()))
        .title_bottom(filter_hint())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    if state.entries.iter().all(|e| e.name == "..") {
        let hint = Paragraph::new(vec![
            Line::from(".."),
            Line::from(""),
            Line::from(format!("No dataset files here ({})", DATASET_EXTENSIONS.join(", "))),
        ])
        .style(Style::default().fg(colors.text))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let viewport_height = area.height.saturating_sub(2) as usize;
    state.adjust_scroll(viewport_height);

    let items: Vec<ListItem<'_>> = state
        .entries
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(viewport_height)
        .map(|(idx, entry)| {
            let style = if idx == state.cursor {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else if entry.is_dir {
                Style::default().fg(colors.label)
            } else {
                Style::default().fg(colors.text)
            };
            ListItem::new(Line::from(entry_label(entry))).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Row text for one entry: directories end in `/`, symlinks are marked.
fn entry_label(entry: &FileEntry) -> String {
    let icon = if entry.is_dir { "📁" } else { "🌐" };
    let slash = if entry.is_dir && entry.name != ".." { "/" } else { "" };
    let link = if entry.is_symlink { " →" } else { "" };
    format!("{} {}{}{}", icon, entry.name, slash, link)
}

fn filter_hint() -> String {
    let patterns: Vec<String> = DATASET_EXTENSIONS.iter().map(|e| format!("*.{}", e)).collect();
    format!(" {} ", patterns.join(" "))
}
