//! Preset keymaps: Standard, Vim, Emacs

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc
    #[default]
    Standard,
    /// hjkl navigation
    Vim,
    /// Ctrl+N/P navigation
    Emacs,
}

impl KeymapPreset {
    /// All key bindings of this preset
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => vim_bindings(),
            KeymapPreset::Emacs => emacs_bindings(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

/// Bindings shared by every preset. Terminals report Shift+Tab as BackTab,
/// with or without the shift modifier.
fn common_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("end", Action::GoToEnd),
        KeyBinding::new("tab", Action::NextPane),
        KeyBinding::new("backtab", Action::PrevPane),
        KeyBinding::new("shift+backtab", Action::PrevPane),
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("?", Action::Help),
    ]
}

fn standard_bindings() -> Vec<KeyBinding> {
    let mut bindings = common_bindings();
    bindings.push(KeyBinding::new("backspace", Action::Cancel));
    bindings
}

fn vim_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("k", Action::MoveUp),
        KeyBinding::new("j", Action::MoveDown),
        KeyBinding::new("ctrl+u", Action::PageUp),
        KeyBinding::new("ctrl+d", Action::PageDown),
        KeyBinding::new("g", Action::GoToTop),
        KeyBinding::new("shift+g", Action::GoToEnd),
        KeyBinding::new("l", Action::NextPane),
        KeyBinding::new("h", Action::PrevPane),
    ];
    bindings.extend(common_bindings());
    bindings
}

fn emacs_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("alt+v", Action::PageUp),
        KeyBinding::new("ctrl+v", Action::PageDown),
        KeyBinding::new("ctrl+f", Action::NextPane),
        KeyBinding::new("ctrl+b", Action::PrevPane),
        KeyBinding::new("ctrl+g", Action::Cancel),
    ];
    bindings.extend(common_bindings());
    bindings
}
