//! The review card: header totals, the file card with its preview area, and
//! the decision buttons.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use swipeclean_core::config::theme::{parse_color, Theme};
use swipeclean_core::fs::entry::FileEntry;
use swipeclean_core::review::view::{CardView, PreviewSlot};

use crate::icons::icon_for_entry;
use crate::image_preview::{placeholder_text, ImagePreviewState};

/// Everything the card needs besides the view itself.
pub struct CardProps<'a> {
    /// Cursor index of the entry, used as the image cache key.
    pub index: usize,
    pub show_icons: bool,
    pub delete_keys: &'a str,
    pub keep_keys: &'a str,
    pub reveal_keys: &'a str,
}

/// Renders the header, card and buttons into `area`.
pub fn render_card(
    f: &mut Frame,
    area: Rect,
    card: &CardView<'_>,
    props: &CardProps<'_>,
    theme: &Theme,
    image_state: Option<&mut ImagePreviewState>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, chunks[0], card, theme);
    render_body(f, chunks[1], card, props, theme, image_state);
    render_buttons(f, chunks[2], card.decisions_locked, props, theme);
}

fn render_header(f: &mut Frame, area: Rect, card: &CardView<'_>, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("Total Deleted: {}", card.total_deleted_label),
            Style::default()
                .fg(parse_color(&theme.header.total_fg))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            remaining_label(card.remaining),
            Style::default().fg(parse_color(&theme.header.remaining_fg)),
        ),
        Span::raw(" "),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn render_body(
    f: &mut Frame,
    area: Rect,
    card: &CardView<'_>,
    props: &CardProps<'_>,
    theme: &Theme,
    image_state: Option<&mut ImagePreviewState>,
) {
    let title = if props.show_icons {
        format!(" {}{} ", icon_for_entry(card.entry), card.display_name)
    } else {
        format!(" {} ", card.display_name)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(parse_color(&theme.card.name_fg))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(parse_color(&theme.card.border_fg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    render_preview_area(f, chunks[0], card, props, theme, image_state);

    let meta_fg = parse_color(&theme.card.meta_fg);
    let meta = vec![
        Line::from(Span::styled(
            format!("Size: {}", card.size_label),
            Style::default().fg(meta_fg),
        )),
        Line::from(Span::styled(
            format!("Created: {}", card.date_label),
            Style::default().fg(meta_fg),
        )),
        Line::from(Span::styled(
            card.progress_label.clone(),
            Style::default().fg(parse_color(&theme.card.progress_fg)),
        )),
    ];
    f.render_widget(Paragraph::new(meta).alignment(Alignment::Center), chunks[1]);
}

fn render_preview_area(
    f: &mut Frame,
    area: Rect,
    card: &CardView<'_>,
    props: &CardProps<'_>,
    theme: &Theme,
    image_state: Option<&mut ImagePreviewState>,
) {
    let placeholder_style = Style::default()
        .fg(parse_color(&theme.card.placeholder_fg))
        .add_modifier(Modifier::ITALIC);

    let text = match card.slot {
        PreviewSlot::Image(image) => {
            if let Some(state) = image_state {
                if let Some(protocol) =
                    state.get_or_encode(props.index, image, area.width, area.height)
                {
                    let widget = ratatui_image::StatefulImage::default();
                    f.render_stateful_widget(widget, area, protocol);
                    return;
                }
            }
            placeholder_text(image)
        }
        PreviewSlot::ImageFallback => IMAGE_FALLBACK.to_owned(),
        PreviewSlot::Placeholder => placeholder_label(card.entry),
    };

    let top_pad = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(text, placeholder_style)));
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Drawn in the image area when an image has no preview yet.
const IMAGE_FALLBACK: &str = "[ image ]";

/// Generic placeholder naming the file type, e.g. `"[ PDF file ]"`.
fn placeholder_label(entry: &FileEntry) -> String {
    match entry.path().extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("[ {} file ]", ext.to_uppercase()),
        _ => "[ file ]".to_owned(),
    }
}

fn remaining_label(remaining: usize) -> String {
    format!("Remaining: {remaining} files")
}

fn render_buttons(
    f: &mut Frame,
    area: Rect,
    locked: bool,
    props: &CardProps<'_>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let fg = parse_color(&theme.buttons.fg);
    let disabled_fg = parse_color(&theme.buttons.disabled_fg);
    let decision_style = |bg: &str| {
        if locked {
            Style::default().fg(disabled_fg)
        } else {
            Style::default()
                .fg(fg)
                .bg(parse_color(bg))
                .add_modifier(Modifier::BOLD)
        }
    };

    let buttons = [
        (
            format!("← Delete [{}]", props.delete_keys),
            decision_style(&theme.buttons.delete_bg),
        ),
        (
            format!("Reveal [{}]", props.reveal_keys),
            Style::default()
                .fg(fg)
                .bg(parse_color(&theme.buttons.reveal_bg)),
        ),
        (
            format!("Keep [{}] →", props.keep_keys),
            decision_style(&theme.buttons.keep_bg),
        ),
    ];

    for ((label, style), chunk) in buttons.into_iter().zip(chunks.iter()) {
        let button = Paragraph::new(Line::from(label))
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, *chunk);
    }
}
