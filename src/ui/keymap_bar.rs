//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Which keymap to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapMode {
    /// Outline navigation.
    Explorer,
    /// Picking a file.
    FileBrowser,
    /// Waiting for an inspection.
    Inspecting,
}

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, mode: KeymapMode, colors: &ThemeColors) {
    let keymap_text = match mode {
        KeymapMode::FileBrowser => "jk/↑↓:nav | Enter/l:select | h:parent | .:hidden | Esc:back | q:quit",
        KeymapMode::Inspecting => "Esc:cancel inspection | q:quit",
        KeymapMode::Explorer => {
            "q:quit | hjkl:nav | o:open | Enter:preview | H:html | t:details | T:theme | ?:help"
        },
    };

    let paragraph = Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
