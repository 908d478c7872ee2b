//! Application configuration loaded from a TOML file.
//!
//! Every field is defaulted, so SwipeClean runs without a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// The directory to review: `general.directory` if set, else the
    /// platform downloads folder.
    pub fn review_directory(&self) -> PathBuf {
        self.general
            .directory
            .clone()
            .unwrap_or_else(default_directory)
    }
}

/// Which directory to review and what to list from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub show_hidden: bool,
}

/// Image preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: String,
}

impl PreviewConfig {
    /// `max_file_size` in bytes.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] if the value is not a size like `"10MB"`.
    pub fn max_file_size_bytes(&self) -> CoreResult<u64> {
        parse_size(&self.max_file_size)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_file_size: default_max_file_size(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_true")]
    pub show_icons: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            show_icons: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> String {
    "10MB".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// The platform downloads folder, or `$HOME/Downloads` when the platform
/// does not report one.
pub fn default_directory() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Downloads")
    })
}

/// Parses a human size such as `"512"`, `"64KB"` or `"1.5 GB"` into bytes.
///
/// Units are binary multiples and case-insensitive; a bare number is bytes.
pub fn parse_size(s: &str) -> CoreResult<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CoreError::ConfigParse("empty size".to_string()));
    }

    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if num_end == 0 {
        return Err(CoreError::ConfigParse(format!(
            "size must start with a number: {s}"
        )));
    }

    let (num_str, unit) = s.split_at(num_end);
    let num: f64 = num_str
        .parse()
        .map_err(|_| CoreError::ConfigParse(format!("invalid number in size: {s}")))?;

    let multiplier: u64 = match unit.trim().to_uppercase().as_str() {
        "" | "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        other => {
            return Err(CoreError::ConfigParse(format!(
                "unknown size unit {other:?}, expected B, KB, MB or GB"
            )))
        }
    };

    Ok((num * multiplier as f64) as u64)
}
