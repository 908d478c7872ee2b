use std::path::{Path, PathBuf};

use swipeclean_core::action::ActionRegistry;
use swipeclean_core::config::keymap::Keymap;
use swipeclean_core::config::settings::Config;
use swipeclean_core::config::theme::Theme;
use swipeclean_core::event::Event;
use swipeclean_core::review::view::{display_name, format_megabytes};
use swipeclean_core::review::ReviewSession;

/// Application mode: determines how input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
}

/// Frontend state around the review session: mode, status line, and the
/// loaded configuration.
#[derive(Debug, Clone)]
pub struct App {
    mode: AppMode,
    should_quit: bool,
    status_message: Option<String>,
    directory: PathBuf,
    config: Config,
    keymap: Keymap,
    theme: Theme,
    action_registry: ActionRegistry,
}

/// Returns the path to the config directory.
pub fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("swipeclean")
}

impl App {
    pub fn new(directory: PathBuf, config: Config, keymap: Keymap, theme: Theme) -> Self {
        Self {
            mode: AppMode::Normal,
            should_quit: false,
            status_message: None,
            directory,
            config,
            keymap,
            theme,
            action_registry: ActionRegistry::new(),
        }
    }

    /// Loads configuration from `cfg_dir`, falling back to defaults for any
    /// missing or unreadable file. `directory` overrides the configured one.
    pub fn load(cfg_dir: &Path, directory: Option<PathBuf>) -> Self {
        let config = Config::load(&cfg_dir.join("config.toml")).unwrap_or_else(|e| {
            tracing::debug!("Using default config: {e}");
            Config::default()
        });
        let keymap = Keymap::load(&cfg_dir.join("keymap.toml")).unwrap_or_default();
        let theme = Theme::load(&cfg_dir.join("theme.toml")).unwrap_or_default();
        let directory = directory.unwrap_or_else(|| config.review_directory());
        Self::new(directory, config, keymap, theme)
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The directory under review.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    /// Maximum preview size in bytes; falls back to the default limit when
    /// the configured value does not parse.
    pub fn max_preview_bytes(&self) -> u64 {
        match self.config.preview.max_file_size_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Invalid preview.max_file_size: {e}");
                Config::default()
                    .preview
                    .max_file_size_bytes()
                    .unwrap_or(10 * 1024 * 1024)
            }
        }
    }

    /// Transition to a new mode.
    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    /// Mark the app for quitting.
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    /// Set a status message.
    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    /// Clear the status message.
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    /// Reflects a session event in the status line.
    pub fn with_event(self, event: &Event, session: &ReviewSession) -> Self {
        let name_at = |index: usize| {
            session
                .entries()
                .get(index)
                .map(|e| display_name(e.name()))
                .unwrap_or_default()
        };
        match event {
            Event::ListingLoaded { count } => {
                let msg = format!("{count} files in {}", self.directory.display());
                self.with_status(msg)
            }
            Event::Deleted { index, size } => self.with_status(format!(
                "Deleted {} ({})",
                name_at(*index),
                format_megabytes(*size)
            )),
            Event::Kept { .. } => self.with_clear_status(),
            // Failures are logged by the session; the screen only shows the
            // absence of the expected change.
            Event::ListingFailed { .. }
            | Event::DeleteFailed { .. }
            | Event::RevealFailed { .. }
            | Event::PreviewReady { .. }
            | Event::PreviewFailed { .. }
            | Event::PreviewDiscarded { .. }
            | Event::Finished { .. } => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swipeclean_core::fs::entry::FileEntry;
    use tempfile::TempDir;

    fn app() -> App {
        App::new(
            PathBuf::from("/tmp/inbox"),
            Config::default(),
            Keymap::default(),
            Theme::default(),
        )
    }

    fn session_with(names: &[&str]) -> ReviewSession {
        let entries = names
            .iter()
            .map(|n| {
                FileEntry::from_parts(
                    PathBuf::from("/tmp/inbox").join(n),
                    n.to_string(),
                    1024,
                    None,
                    None,
                    false,
                )
            })
            .collect();
        let mut session = ReviewSession::new();
        session.load_entries(entries);
        session
    }

    #[test]
    fn app_new_starts_in_normal_mode() {
        let app = app();
        assert_eq!(app.mode(), AppMode::Normal);
        assert!(!app.should_quit());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn with_mode_changes_mode() {
        let app = app().with_mode(AppMode::Help);
        assert_eq!(app.mode(), AppMode::Help);
    }

    #[test]
    fn with_quit_sets_should_quit() {
        assert!(app().with_quit().should_quit());
    }

    #[test]
    fn with_status_and_clear() {
        let app = app().with_status("hello".to_string());
        assert_eq!(app.status_message(), Some("hello"));
        assert!(app.with_clear_status().status_message().is_none());
    }

    #[test]
    fn load_from_empty_dir_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let app = App::load(tmp.path(), Some(PathBuf::from("/data")));
        assert_eq!(app.directory(), Path::new("/data"));
        assert_eq!(app.config().ui.date_format, "%Y-%m-%d");
        assert_eq!(app.max_preview_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn load_reads_config_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[general]\ndirectory = \"/srv/inbox\"\n[preview]\nmax_file_size = \"1KB\"\n",
        )
        .unwrap();
        fs::write(tmp.path().join("keymap.toml"), "[bindings]\nd = \"delete\"\n").unwrap();

        let app = App::load(tmp.path(), None);
        assert_eq!(app.directory(), Path::new("/srv/inbox"));
        assert_eq!(app.max_preview_bytes(), 1024);
        assert!(app.keymap().action_for_key("d").is_some());
    }

    #[test]
    fn invalid_max_file_size_falls_back() {
        let mut config = Config::default();
        config.preview.max_file_size = "lots".to_string();
        let app = App::new(PathBuf::from("."), config, Keymap::default(), Theme::default());
        assert_eq!(app.max_preview_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn deleted_event_sets_status() {
        let session = session_with(&["a.png", "b.png"]);
        let app = app().with_event(
            &Event::Deleted {
                index: 0,
                size: 1024 * 1024,
            },
            &session,
        );
        assert_eq!(app.status_message(), Some("Deleted a.png (1.00 MB)"));
    }

    fn failure_events() -> Vec<Event> {
        vec![
            Event::ListingFailed {
                error: "no such directory".to_string(),
            },
            Event::DeleteFailed {
                index: 0,
                error: "permission denied".to_string(),
            },
            Event::RevealFailed {
                index: 0,
                error: "no file browser".to_string(),
            },
        ]
    }

    #[test]
    fn failure_events_leave_status_untouched() {
        let session = session_with(&["a.png"]);
        for event in failure_events() {
            let app = app().with_event(&event, &session);
            assert!(app.status_message().is_none(), "{event:?}");

            let app = app
                .with_status("3 files in /tmp/inbox".to_string())
                .with_event(&event, &session);
            assert_eq!(
                app.status_message(),
                Some("3 files in /tmp/inbox"),
                "{event:?}"
            );
        }
    }

    #[test]
    fn kept_event_clears_status() {
        let session = session_with(&["a.png"]);
        let app = app()
            .with_status("old".to_string())
            .with_event(&Event::Kept { index: 0 }, &session);
        assert!(app.status_message().is_none());
    }
}
