//! Image preview caching and protocol state management.
//!
//! Decodes the preview bytes delivered by the review session and caches the
//! encoded terminal protocol so the image is not re-encoded every frame.

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use swipeclean_core::fs::preview::EncodedImage;

/// Cache key: entry index + render area dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImageCacheKey {
    index: usize,
    width: u16,
    height: u16,
}

/// Holds the picker and cached encoded image protocol.
pub struct ImagePreviewState {
    picker: Picker,
    cached_protocol: Option<StatefulProtocol>,
    cache_key: Option<ImageCacheKey>,
}

impl ImagePreviewState {
    pub fn new(picker: Picker) -> Self {
        Self {
            picker,
            cached_protocol: None,
            cache_key: None,
        }
    }

    /// Returns `&mut StatefulProtocol` (cached or newly encoded) for the
    /// preview of the entry at `index`.
    ///
    /// Re-encodes only when the entry or render area size changes.
    pub fn get_or_encode(
        &mut self,
        index: usize,
        image: &EncodedImage,
        width: u16,
        height: u16,
    ) -> Option<&mut StatefulProtocol> {
        let new_key = ImageCacheKey {
            index,
            width,
            height,
        };

        if self.cache_key != Some(new_key) {
            let dyn_img = match image::load_from_memory(image.bytes()) {
                Ok(img) => img,
                Err(e) => {
                    tracing::debug!("Image decode failed for entry {index}: {e}");
                    self.invalidate();
                    return None;
                }
            };

            let protocol = self.picker.new_resize_protocol(dyn_img);
            self.cached_protocol = Some(protocol);
            self.cache_key = Some(new_key);
        }

        self.cached_protocol.as_mut()
    }

    /// Drops the cached protocol.
    pub fn invalidate(&mut self) {
        self.cached_protocol = None;
        self.cache_key = None;
    }
}

/// Text shown instead of the image when the terminal cannot draw graphics.
pub fn placeholder_text(image: &EncodedImage) -> String {
    match image.dimensions() {
        Some((w, h)) => format!("[{} image, {w}x{h} px]", image.mime()),
        None => format!("[{} image]", image.mime()),
    }
}
