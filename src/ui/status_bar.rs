//! Status bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Severity of the current status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Plain feedback.
    #[default]
    Info,
    /// Advisory, e.g. missing dependencies.
    Warning,
    /// A failed action.
    Error,
}

/// Draw the status bar.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, status: &str, level: StatusLevel, colors: &ThemeColors) {
    let fg = match level {
        StatusLevel::Info => colors.status_fg,
        StatusLevel::Warning => colors.warning,
        StatusLevel::Error => colors.error,
    };

    let paragraph = Paragraph::new(status.to_string()).style(Style::default().fg(fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
