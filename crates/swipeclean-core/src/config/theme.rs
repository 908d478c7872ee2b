//! Theme configuration for SwipeClean.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Complete theme configuration with per-component color groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub card: CardTheme,
    #[serde(default)]
    pub header: HeaderTheme,
    #[serde(default)]
    pub buttons: ButtonTheme,
    #[serde(default)]
    pub statusbar: StatusBarTheme,
    #[serde(default)]
    pub popup: PopupTheme,
}

impl Theme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// The file card in the middle of the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTheme {
    pub border_fg: String,
    pub name_fg: String,
    pub meta_fg: String,
    pub progress_fg: String,
    pub placeholder_fg: String,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            border_fg: "magenta".to_string(),
            name_fg: "white".to_string(),
            meta_fg: "gray".to_string(),
            progress_fg: "dark_gray".to_string(),
            placeholder_fg: "dark_gray".to_string(),
        }
    }
}

/// Running totals in the top-right corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderTheme {
    pub total_fg: String,
    pub remaining_fg: String,
}

impl Default for HeaderTheme {
    fn default() -> Self {
        Self {
            total_fg: "light_red".to_string(),
            remaining_fg: "gray".to_string(),
        }
    }
}

/// Decision button colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonTheme {
    pub delete_bg: String,
    pub reveal_bg: String,
    pub keep_bg: String,
    pub fg: String,
    pub disabled_fg: String,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            delete_bg: "red".to_string(),
            reveal_bg: "gray".to_string(),
            keep_bg: "green".to_string(),
            fg: "white".to_string(),
            disabled_fg: "dark_gray".to_string(),
        }
    }
}

/// Status bar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBarTheme {
    pub bg: String,
    pub fg: String,
    pub message_fg: String,
}

impl Default for StatusBarTheme {
    fn default() -> Self {
        Self {
            bg: "white".to_string(),
            fg: "black".to_string(),
            message_fg: "magenta".to_string(),
        }
    }
}

/// Popup/dialog colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupTheme {
    pub border_fg: String,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
        }
    }
}

/// Parses a color string into a `ratatui::style::Color`.
///
/// Supports named colors (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}
