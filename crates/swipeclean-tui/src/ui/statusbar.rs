//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the directory under review, the review progress, and the latest
//! status message.

use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use swipeclean_core::config::theme::{parse_color, Theme};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub directory: &'a Path,
    /// `"3 / 10"` while reviewing.
    pub progress: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub delete_pending: bool,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let fg = parse_color(&theme.statusbar.fg);
    let message_fg = parse_color(&theme.statusbar.message_fg);

    let status_span = status_text(props)
        .map(|msg| {
            Span::styled(
                format!("  {msg}"),
                Style::default()
                    .fg(message_fg)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            position_text(props),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", props.directory.display()),
            Style::default().fg(fg).bg(bg),
        ),
        status_span,
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn position_text(props: &StatusBarProps<'_>) -> String {
    match props.progress {
        Some(progress) => format!(" {progress}"),
        None => " -".to_owned(),
    }
}

fn status_text<'a>(props: &StatusBarProps<'a>) -> Option<&'a str> {
    if props.delete_pending {
        Some("Deleting...")
    } else {
        props.status_message
    }
}
