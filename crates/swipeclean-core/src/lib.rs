//! SwipeClean core library: UI-agnostic file triage logic.
//!
//! `swipeclean-core` walks a user through the files of one directory, one at
//! a time, recording a keep or delete decision for each and tallying the
//! bytes reclaimed. It has no terminal dependencies beyond colour parsing, so
//! any frontend can drive the same [`ReviewDriver`].
//!
//! # Modules
//!
//! - [`review`]: The review session state machine, derived views, the
//!   [`ReviewBackend`] seam and the async [`ReviewDriver`].
//! - [`fs`]: File system abstractions: [`FileEntry`], directory listing, deletion, previews.
//! - [`config`]: User-facing configuration (TOML-based settings, keymaps, themes).
//! - [`action`]: Actions that key bindings resolve to.
//! - [`event`]: Command and event types for UI ↔ Core communication.
//! - [`error`]: Error types ([`CoreError`], [`ReviewError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod review;

pub use error::{CoreError, CoreResult, ReviewError};
pub use event::{Command, Event};
pub use fs::entry::FileEntry;
pub use fs::ops::{delete_file, read_directory, reveal_in_file_browser};
pub use fs::preview::{is_image, read_preview, EncodedImage};

pub use review::{
    CardView, Completion, Decision, DeleteRequest, LocalBackend, Phase, PreviewRequest,
    PreviewSlot, PreviewTicket, Rejection, RevealRequest, ReviewBackend, ReviewDriver,
    ReviewSession, SessionView, SummaryView,
};

pub use action::{Action, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
