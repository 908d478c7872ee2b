//! Nerd Font icon mapping for file entries.
//!
//! Downloads folders are mostly images, archives, installers and documents,
//! so only those categories get their own glyph.

use swipeclean_core::fs::entry::FileEntry;

/// Returns a Nerd Font icon for the given file entry.
pub fn icon_for_entry(entry: &FileEntry) -> &'static str {
    if entry.is_image() {
        return "\u{f1c5} ";
    }
    let ext = entry
        .path()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    icon_for_extension(ext)
}

fn icon_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "zip" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "7z" | "rar" => "\u{f410} ",
        "dmg" | "iso" | "pkg" | "msi" | "exe" | "deb" | "rpm" | "appimage" => "\u{f0c7} ",
        "pdf" => "\u{f1c1} ",
        "doc" | "docx" | "odt" | "rtf" => "\u{f1c2} ",
        "xls" | "xlsx" | "ods" | "csv" => "\u{f1c3} ",
        "ppt" | "pptx" | "odp" => "\u{f1c4} ",
        "mp4" | "mkv" | "mov" | "avi" | "webm" => "\u{f1c8} ",
        "mp3" | "wav" | "flac" | "ogg" | "m4a" => "\u{f1c7} ",
        "txt" | "md" | "log" => "\u{f15c} ",
        _ => "\u{f15b} ",
    }
}
