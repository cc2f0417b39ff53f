//! User interface rendering.

mod keymap_bar;
mod status_bar;
mod theme;

pub use keymap_bar::{draw_keymap, KeymapMode};
pub use status_bar::{draw_status, StatusLevel};
pub use theme::{Theme, ThemeColors};

use crate::app::App;
use crate::explorer::details::format_node_details;
use crate::explorer::tree::draw_tree;
use crate::file_browser::ui::draw_file_browser;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    if app.file_browser_mode {
        draw_file_browser(f, &mut app.file_browser, chunks[0], &colors);
    } else if app.explorer.show_preview {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        draw_tree(f, &mut app.explorer, content[0], &colors);
        draw_details(f, app, content[1], &colors);
    } else {
        draw_tree(f, &mut app.explorer, chunks[0], &colors);
    }

    draw_status(f, chunks[1], &app.status, app.status_level, &colors);

    let mode = if app.is_inspecting() {
        KeymapMode::Inspecting
    } else if app.file_browser_mode {
        KeymapMode::FileBrowser
    } else {
        KeymapMode::Explorer
    };
    draw_keymap(f, chunks[2], mode, &colors);
}

fn draw_details(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let lines = if let Some(node) = app.current_node() {
        format_node_details(node, app.explorer.session(), colors)
    } else {
        vec![Line::from(Span::styled(
            "Select a node to view details",
            Style::default().fg(colors.text),
        ))]
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: true })
        .scroll((app.explorer.preview_scroll, 0));

    f.render_widget(paragraph, area);
}
