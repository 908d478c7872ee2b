//! Collaborators the review session depends on.
//!
//! [`ReviewBackend`] is the seam between the session and the outside world.
//! [`LocalBackend`] implements it against the local filesystem; tests
//! substitute their own implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::fs::ops::{delete_file, read_directory, reveal_in_file_browser};
use crate::fs::preview::{read_preview, EncodedImage};

/// The four operations the review session calls out to.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Lists the files to review, in review order.
    async fn list_files(&self) -> CoreResult<Vec<FileEntry>>;
    /// Reads a file as a renderable preview.
    async fn read_preview(&self, path: &Path) -> CoreResult<EncodedImage>;
    /// Removes a file from disk.
    async fn delete_file(&self, path: &Path) -> CoreResult<()>;
    /// Shows a file in the system file browser.
    async fn reveal_in_browser(&self, path: &Path) -> CoreResult<()>;
}

/// A [`ReviewBackend`] over one local directory.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
    show_hidden: bool,
    max_preview_bytes: u64,
}

impl LocalBackend {
    /// Creates a backend listing `root`, skipping dotfiles and refusing
    /// previews larger than `max_preview_bytes`.
    pub fn new(root: PathBuf, max_preview_bytes: u64) -> Self {
        Self {
            root,
            show_hidden: false,
            max_preview_bytes,
        }
    }

    /// Returns a copy that also lists dotfiles when `show_hidden` is set.
    pub fn with_show_hidden(self, show_hidden: bool) -> Self {
        Self {
            show_hidden,
            ..self
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Runs blocking filesystem work off the async runtime's worker threads.
async fn blocking<T, F>(work: F) -> CoreResult<T>
where
    F: FnOnce() -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| CoreError::Io(std::io::Error::other(e)))?
}

#[async_trait]
impl ReviewBackend for LocalBackend {
    async fn list_files(&self) -> CoreResult<Vec<FileEntry>> {
        let root = self.root.clone();
        let show_hidden = self.show_hidden;
        blocking(move || read_directory(&root, show_hidden)).await
    }

    async fn read_preview(&self, path: &Path) -> CoreResult<EncodedImage> {
        let path = path.to_path_buf();
        let limit = self.max_preview_bytes;
        blocking(move || read_preview(&path, limit)).await
    }

    async fn delete_file(&self, path: &Path) -> CoreResult<()> {
        let path = path.to_path_buf();
        blocking(move || delete_file(&path)).await
    }

    async fn reveal_in_browser(&self, path: &Path) -> CoreResult<()> {
        let path = path.to_path_buf();
        blocking(move || reveal_in_file_browser(&path)).await
    }
}
