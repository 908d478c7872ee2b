//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which the review driver
//! processes; the session reports what happened through [`Event`]s sent to
//! every subscriber. This decoupling lets any frontend drive the same core
//! logic.

/// A decision or request the UI asks the core to perform.
///
/// Commands flow **UI → Core** and always target the entry under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Keep the current file and advance.
    Keep,
    /// Delete the current file from disk, advancing once the delete succeeds.
    Delete,
    /// Show the current file in the system file browser.
    Reveal,
}

impl Command {
    /// Maps the swipe direction to a command: `keep == true` keeps the file.
    pub fn decide(keep: bool) -> Self {
        if keep {
            Self::Keep
        } else {
            Self::Delete
        }
    }
}

/// A notification the session sends back to the UI.
///
/// Events flow **Core → UI**. Indices refer to positions in the session's
/// entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The listing finished; `count` entries are queued for review.
    ListingLoaded { count: usize },
    /// The listing failed; the session stays in `Loading`.
    ListingFailed { error: String },
    /// A preview arrived for the entry currently under review.
    PreviewReady { index: usize },
    /// A preview could not be loaded.
    PreviewFailed { index: usize, error: String },
    /// A preview arrived after the cursor had moved on and was dropped.
    PreviewDiscarded { index: usize },
    /// The entry was kept.
    Kept { index: usize },
    /// The entry was deleted from disk.
    Deleted { index: usize, size: u64 },
    /// Deleting the entry failed; it stays under review.
    DeleteFailed { index: usize, error: String },
    /// Revealing the entry in the file browser failed.
    RevealFailed { index: usize, error: String },
    /// Every entry has been decided.
    Finished {
        count_deleted: usize,
        bytes_deleted: u64,
    },
}
