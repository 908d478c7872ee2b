//! File system abstractions for SwipeClean.
//!
//! This module provides the [`entry::FileEntry`] snapshot type, directory
//! listing and deletion ([`ops`]), and image preview payloads
//! ([`preview::EncodedImage`]).

pub mod entry;
pub mod ops;
pub mod preview;

pub use preview::{EncodedImage, PREVIEWABLE_SUFFIXES};
