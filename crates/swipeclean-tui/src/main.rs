//! SwipeClean: review a directory one file at a time, keeping or deleting
//! each, in the terminal.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod icons;
mod image_preview;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use swipeclean_core::review::{LocalBackend, ReviewDriver};
use tracing_subscriber::EnvFilter;

use crate::app::{config_dir, App};
use crate::input::{handle_key, InputAction};
use crate::render::render;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so output never lands on the alternate screen.
fn init_tracing() -> anyhow::Result<()> {
    let log_path = std::env::temp_dir().join("swipeclean.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    install_panic_hook();

    let directory = std::env::args().nth(1).map(PathBuf::from);
    let app = App::load(&config_dir(), directory);
    tracing::info!("Reviewing {}", app.directory().display());

    let mut terminal = setup_terminal()?;

    // Picker must be created after alternate screen (raw mode) but before event loop
    let picker = match ratatui_image::picker::Picker::from_query_stdio() {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!("Terminal image protocol detection failed: {e}");
            None
        }
    };

    let result = run_app(&mut terminal, app, picker).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    picker: Option<ratatui_image::picker::Picker>,
) -> anyhow::Result<()> {
    let backend = LocalBackend::new(app.directory().to_path_buf(), app.max_preview_bytes())
        .with_show_hidden(app.config().general.show_hidden);
    let mut driver =
        ReviewDriver::new(Arc::new(backend)).with_previews(app.config().preview.enabled);
    let mut events = driver.subscribe();
    let mut image_state = picker.map(image_preview::ImagePreviewState::new);

    driver.start();

    loop {
        // 1. Apply finished collaborator calls
        driver.apply_pending();

        // 2. Reflect session events in the status line
        while let Ok(ev) = events.try_recv() {
            tracing::debug!("Session event: {ev:?}");
            app = app.with_event(&ev, driver.session());
        }

        // 3. Render
        terminal.draw(|f| render(f, &app, driver.session(), image_state.as_mut()))?;

        if app.should_quit() {
            break;
        }

        // 4. Poll for crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app = match handle_key(key, app.mode(), app.keymap()) {
                    InputAction::Command(cmd) => {
                        if !driver.handle(cmd) {
                            tracing::debug!("Command {cmd:?} rejected");
                        }
                        app
                    }
                    InputAction::EnterMode(mode) => app.with_mode(mode),
                    InputAction::Quit => app.with_quit(),
                    InputAction::None => app,
                };
            }
        }
    }

    Ok(())
}
