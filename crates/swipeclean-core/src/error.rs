//! Error types for `swipeclean-core`.
//!
//! Filesystem and configuration operations return [`CoreResult<T>`], an alias
//! for `Result<T, CoreError>`. Failures crossing the review session's
//! collaborator boundary are classified by [`ReviewError`].

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to log a
/// meaningful message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file exceeds the configured preview size limit.
    #[error("file too large to preview: {path} ({size} bytes, limit {limit})")]
    TooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// Failed to parse a TOML configuration file or a config value.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The system file browser could not be launched.
    #[error("failed to launch file browser: {0}")]
    Launch(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `swipeclean-core`.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Maps an I/O error on `path` to the most specific variant.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }
}

/// A failure reported by one of the review session's collaborators.
///
/// None of these originate in the session itself; they are logged and
/// swallowed, never propagated to the frontend.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("listing failed: {0}")]
    Listing(#[source] CoreError),

    #[error("preview failed for {path}: {source}")]
    Preview {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("delete failed for {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("reveal failed for {path}: {source}")]
    Reveal {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}
