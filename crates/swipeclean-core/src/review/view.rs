//! Display state derived from a [`ReviewSession`].
//!
//! Everything here is a pure function of the session; nothing is stored.
//! Frontends render a [`SessionView`] and never inspect the session's
//! internals directly.

use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::fs::entry::FileEntry;
use crate::fs::preview::{previewable_suffix, EncodedImage};
use crate::review::session::{Phase, ReviewSession};

/// Names longer than this many characters are shortened for display.
const MAX_NAME_CHARS: usize = 30;
/// Characters kept from a shortened name.
const TRUNCATED_NAME_CHARS: usize = 20;
/// Appended to a shortened name.
const ELLIPSIS: &str = "...";
/// Shown when an entry has no creation time.
pub const UNKNOWN_DATE: &str = "Unknown";
/// Used when the configured date format cannot be rendered.
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shortens `name` to its first 20 characters plus `"..."` when it is
/// longer than 30 characters.
pub fn display_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        name.to_string()
    }
}

/// Formats a byte count as megabytes with two decimals, e.g. `"1.00 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Formats a timestamp in local time using a chrono `strftime` pattern.
///
/// Returns [`UNKNOWN_DATE`] for `None`. An unrenderable `format` falls back
/// to `%Y-%m-%d`.
pub fn date_label(time: Option<SystemTime>, format: &str) -> String {
    let Some(time) = time else {
        return UNKNOWN_DATE.to_string();
    };
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.format(FALLBACK_DATE_FORMAT).to_string();
    }
    out
}

/// Returns `"{cursor + 1} / {total}"`.
pub fn progress_label(cursor: usize, total: usize) -> String {
    format!("{} / {}", cursor + 1, total)
}

/// What the card's image area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSlot<'a> {
    /// The fetched preview, for a path with a renderable suffix.
    Image(&'a EncodedImage),
    /// The image area is used, but no preview is available; draw the
    /// placeholder graphic in it.
    ImageFallback,
    /// No image area; draw the generic file placeholder.
    Placeholder,
}

/// Decides what the image area shows for `entry`.
///
/// The suffix test is case-sensitive and independent of
/// [`FileEntry::is_image`]. A `.png` path takes the image area only once a
/// preview is present; `.jpg`, `.jpeg`, `.gif` and `.webp` paths always take
/// it, falling back to the placeholder graphic inside it.
pub fn preview_slot<'a>(entry: &FileEntry, preview: Option<&'a EncodedImage>) -> PreviewSlot<'a> {
    match (previewable_suffix(entry.path()), preview) {
        (Some(_), Some(image)) => PreviewSlot::Image(image),
        (Some(".png"), None) => PreviewSlot::Placeholder,
        (Some(_), None) => PreviewSlot::ImageFallback,
        (None, _) => PreviewSlot::Placeholder,
    }
}

/// Everything needed to draw the card for the entry under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub entry: &'a FileEntry,
    pub display_name: String,
    pub size_label: String,
    pub date_label: String,
    pub progress_label: String,
    pub remaining: usize,
    pub total_deleted_label: String,
    pub slot: PreviewSlot<'a>,
    /// `true` while a delete is in flight; decision controls are disabled.
    pub decisions_locked: bool,
}

/// Final statistics shown once every entry has been decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_deleted_label: String,
    pub count_deleted: usize,
}

/// The screen a frontend should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView<'a> {
    Loading,
    /// The listing returned nothing: "no files", without statistics.
    Empty,
    Reviewing(CardView<'a>),
    Finished(SummaryView),
}

impl ReviewSession {
    /// Derives the current screen. `date_format` is a chrono pattern.
    pub fn view(&self, date_format: &str) -> SessionView<'_> {
        match self.phase() {
            Phase::Loading => SessionView::Loading,
            Phase::Empty => SessionView::Empty,
            Phase::Finished => SessionView::Finished(SummaryView {
                total_deleted_label: format_megabytes(self.bytes_deleted()),
                count_deleted: self.count_deleted(),
            }),
            Phase::Reviewing => match self.current_entry() {
                Some(entry) => SessionView::Reviewing(CardView {
                    entry,
                    display_name: display_name(entry.name()),
                    size_label: format_megabytes(entry.size()),
                    date_label: date_label(entry.created(), date_format),
                    progress_label: progress_label(self.cursor(), self.entries().len()),
                    remaining: self.remaining(),
                    total_deleted_label: format_megabytes(self.bytes_deleted()),
                    slot: preview_slot(entry, self.preview()),
                    decisions_locked: self.is_delete_pending(),
                }),
                None => SessionView::Loading,
            },
        }
    }
}
