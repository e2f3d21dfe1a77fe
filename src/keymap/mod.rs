//! Keymap configuration
//!
//! Customizable keyboard shortcuts: a preset (standard, vim, emacs) plus
//! user overrides from the config file.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// Checked before the preset. Overriding an action hides every preset
    /// binding for that action.
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// The action bound to a key combination, if any
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// The action for a key press. Releases and repeats map to nothing.
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.get_action(key.code, key.modifiers)
    }

    /// Overrides followed by the preset bindings they do not shadow
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|p| !self.overrides.iter().any(|o| o.action == p.action)),
        );
        bindings
    }

    /// Display string of the first key bound to `action`
    pub fn key_display(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hints for a table screen. `panes` adds the table-switch hint.
    pub fn footer_hints(&self, can_go_back: bool, panes: bool) -> String {
        let mut hints = vec![
            format!(
                "{}/{}: Navigate",
                self.key_display(Action::MoveUp),
                self.key_display(Action::MoveDown)
            ),
            format!("{}: Open", self.key_display(Action::Confirm)),
        ];
        if panes {
            hints.push(format!("{}: Switch table", self.key_display(Action::NextPane)));
        }
        if can_go_back {
            hints.push(format!("{}: Back", self.key_display(Action::Cancel)));
        }
        hints.push(format!("{}: Quit", self.key_display(Action::Quit)));
        hints.push(format!("{}: Help", self.key_display(Action::Help)));
        hints.join(" | ")
    }
}
