use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use swipeclean_core::action::Action;
use swipeclean_core::config::keymap::Keymap;
use swipeclean_core::event::Command;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a core Command to the review driver.
    Command(Command),
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit the application.
    Quit,
    /// No action for this key.
    None,
}

/// Returns the keymap name for a key event: `"x"`, `"Left"`, `"Enter"`.
///
/// Returns `None` for keys that cannot be bound.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    Some(name)
}

/// Maps a key event to an InputAction based on the current mode.
///
/// In Normal mode keys are resolved through the `Keymap`; Ctrl+C always
/// quits. The help popup closes on any of Esc, `q` or `?`.
pub fn handle_key(key: KeyEvent, mode: AppMode, keymap: &Keymap) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::None;
    }
    match mode {
        AppMode::Normal => handle_normal_key(key, keymap),
        AppMode::Help => handle_help_key(key),
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action.command() {
        Some(command) => InputAction::Command(command),
        None => match action {
            Action::Help => InputAction::EnterMode(AppMode::Help),
            Action::Quit => InputAction::Quit,
            Action::Keep | Action::Delete | Action::Reveal => InputAction::None,
        },
    }
}

fn handle_normal_key(key: KeyEvent, keymap: &Keymap) -> InputAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }
    key_name(&key)
        .and_then(|name| keymap.action_for_key(&name))
        .map(action_to_input_action)
        .unwrap_or(InputAction::None)
}

fn handle_help_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            InputAction::EnterMode(AppMode::Normal)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        _ => InputAction::None,
    }
}
