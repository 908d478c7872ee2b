use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use swipeclean_core::action::Action;
use swipeclean_core::config::keymap::Keymap;
use swipeclean_core::config::theme::{parse_color, Theme};
use swipeclean_core::review::view::{SessionView, SummaryView};
use swipeclean_core::review::ReviewSession;

use crate::app::{App, AppMode};
use crate::image_preview::ImagePreviewState;
use crate::ui::card::{render_card, CardProps};
use crate::ui::popup::{help_lines, render_popup};
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Main render function: composes the full UI layout each frame.
pub fn render(
    f: &mut Frame,
    app: &App,
    session: &ReviewSession,
    image_state: Option<&mut ImagePreviewState>,
) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let view = session.view(&app.config().ui.date_format);
    let progress = match &view {
        SessionView::Reviewing(card) => Some(card.progress_label.as_str()),
        _ => None,
    };

    match &view {
        SessionView::Loading => render_message(f, chunks[0], "Loading files...", theme),
        SessionView::Empty => render_message(f, chunks[0], "No files to display.", theme),
        SessionView::Finished(summary) => render_summary(f, chunks[0], summary, theme),
        SessionView::Reviewing(card) => {
            let keymap = app.keymap();
            let delete_keys = keys_label(keymap, Action::Delete);
            let keep_keys = keys_label(keymap, Action::Keep);
            let reveal_keys = keys_label(keymap, Action::Reveal);
            let props = CardProps {
                index: session.cursor(),
                show_icons: app.config().ui.show_icons,
                delete_keys: &delete_keys,
                keep_keys: &keep_keys,
                reveal_keys: &reveal_keys,
            };
            render_card(f, chunks[0], card, &props, theme, image_state);
        }
    }

    let status = StatusBarProps {
        directory: app.directory(),
        progress,
        status_message: app.status_message(),
        delete_pending: session.is_delete_pending(),
    };
    render_statusbar(f, chunks[1], &status, theme);

    if app.mode() == AppMode::Help {
        let lines = help_lines(app.action_registry(), app.keymap());
        render_popup(f, "Help", &lines, theme);
    }
}

/// Joins the keys bound to `action`, e.g. `"Left/x"`.
fn keys_label(keymap: &Keymap, action: Action) -> String {
    keymap
        .keys_for_action(action)
        .map(|keys| keys.join("/"))
        .unwrap_or_default()
}

fn render_message(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = centered_lines(
        area,
        vec![Line::from(Span::styled(
            message.to_owned(),
            Style::default().fg(parse_color(&theme.card.meta_fg)),
        ))],
    );
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_summary(f: &mut Frame, area: Rect, summary: &SummaryView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(parse_color(&theme.card.border_fg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text: Vec<Line> = summary_lines(summary)
        .into_iter()
        .enumerate()
        .map(|(i, l)| {
            let style = if i == 0 {
                Style::default()
                    .fg(parse_color(&theme.card.name_fg))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(parse_color(&theme.header.total_fg))
            };
            Line::from(Span::styled(l, style))
        })
        .collect();
    let lines = centered_lines(inner, text);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// The three lines of the completion screen.
fn summary_lines(summary: &SummaryView) -> Vec<String> {
    vec![
        "Finished! All files have been reviewed.".to_owned(),
        format!("Total Deleted: {}", summary.total_deleted_label),
        format!("Total Files Deleted: {}", summary.count_deleted),
    ]
}

/// Pads `lines` with blank lines so they sit in the vertical middle of `area`.
fn centered_lines(area: Rect, lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let top_pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    let mut out: Vec<Line<'static>> = (0..top_pad).map(|_| Line::from("")).collect();
    out.extend(lines);
    out
}
