//! User-triggerable actions.
//!
//! Every key binding resolves to an [`Action`]. [`ActionRegistry`] holds
//! the display metadata used by the help popup and the identifiers used in
//! `keymap.toml`.

use crate::event::Command;

/// Every user-triggerable action in SwipeClean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Keep,
    Delete,
    Reveal,
    Help,
    Quit,
}

impl Action {
    /// Returns the session command for decision actions.
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Keep => Some(Command::Keep),
            Self::Delete => Some(Command::Delete),
            Self::Reveal => Some(Command::Reveal),
            Self::Help | Self::Quit => None,
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"keep"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Keep"`).
    pub name: &'static str,
    pub description: &'static str,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            ActionDescriptor {
                action: Action::Delete,
                id: "delete",
                name: "Delete",
                description: "Delete the file from disk and move on",
            },
            ActionDescriptor {
                action: Action::Keep,
                id: "keep",
                name: "Keep",
                description: "Keep the file and move on",
            },
            ActionDescriptor {
                action: Action::Reveal,
                id: "reveal",
                name: "Reveal",
                description: "Show the file in the system file browser",
            },
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show key bindings",
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit SwipeClean",
            },
        ];
        Self { descriptors }
    }

    /// Returns all descriptors in display order.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Resolves a `keymap.toml` identifier.
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for `action`.
    pub fn get(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
