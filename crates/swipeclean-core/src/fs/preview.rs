//! Image preview loading.
//!
//! A preview is the raw file payload tagged with its MIME type
//! ([`EncodedImage`]). Frontends either embed it as a data URI or decode it
//! into pixels themselves.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;

use crate::error::{CoreError, CoreResult};

/// Image file extensions recognised by [`is_image`] (compared lowercase).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Path suffixes the renderer accepts, compared case-sensitively.
pub const PREVIEWABLE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Returns `true` if the path has a recognised image extension, ignoring case.
///
/// This is the listing-time classification stored in
/// [`FileEntry::is_image`](crate::FileEntry::is_image).
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Returns the first renderer suffix `path` ends with, matched case-sensitively.
pub fn previewable_suffix(path: &Path) -> Option<&'static str> {
    let text = path.to_string_lossy();
    PREVIEWABLE_SUFFIXES
        .iter()
        .copied()
        .find(|suffix| text.ends_with(suffix))
}

/// Returns the MIME type for an image path, by lowercase extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// An opaque, renderable image payload.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime: &'static str,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl EncodedImage {
    pub fn new(mime: &'static str, bytes: Vec<u8>) -> Self {
        Self { mime, bytes }
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encodes the payload as a `data:<mime>;base64,...` URI.
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, encoded)
    }

    /// Reads the pixel dimensions from the image header without a full decode.
    ///
    /// Returns `None` when the payload is not a decodable image.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// Reads the file at `path` as a preview payload.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not point to a file.
/// - [`CoreError::TooLarge`] if the file is larger than `max_bytes`.
/// - [`CoreError::Io`] on other I/O failures.
pub fn read_preview(path: &Path, max_bytes: u64) -> CoreResult<EncodedImage> {
    let metadata = fs::metadata(path).map_err(|e| CoreError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if metadata.len() > max_bytes {
        return Err(CoreError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|e| CoreError::from_io(path, e))?;
    Ok(EncodedImage::new(mime_for_path(path), bytes))
}
