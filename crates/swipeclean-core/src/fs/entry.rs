//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

use crate::fs::preview::is_image;

/// A metadata snapshot of one file, taken when the session's listing runs.
///
/// `FileEntry` is immutable: the review session never re-reads a file's
/// metadata after the initial listing, even once the file is deleted.
///
/// # Examples
///
/// ```no_run
/// use swipeclean_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("photo.png").unwrap();
/// let entry = FileEntry::new("photo.png".into(), &metadata);
/// assert_eq!(entry.name(), "photo.png");
/// assert!(entry.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    created: Option<SystemTime>,
    modified: Option<SystemTime>,
    is_image: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Timestamps the platform cannot report are stored as `None`.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_image = is_image(&path);

        Self {
            path,
            name,
            size: metadata.len(),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            is_image,
        }
    }

    /// Creates a `FileEntry` from already-known values.
    ///
    /// Used by listing backends that do not go through `std::fs::Metadata`.
    pub fn from_parts(
        path: PathBuf,
        name: String,
        size: u64,
        created: Option<SystemTime>,
        modified: Option<SystemTime>,
        is_image: bool,
    ) -> Self {
        Self {
            path,
            name,
            size,
            created,
            modified,
            is_image,
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the creation time, if the platform reports one.
    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if the listing classified this file as an image.
    pub fn is_image(&self) -> bool {
        self.is_image
    }
}
