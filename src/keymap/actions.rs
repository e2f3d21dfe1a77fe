//! Semantic actions triggered by key bindings.

use serde::{Deserialize, Serialize};

/// Every action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move the table selection up
    MoveUp,
    /// Move the table selection down
    MoveDown,
    /// Jump up by a page
    PageUp,
    /// Jump down by a page
    PageDown,
    /// Select the first row
    GoToTop,
    /// Select the last row
    GoToEnd,
    /// Focus the next table on screens with more than one
    NextPane,
    /// Focus the previous table
    PrevPane,

    // ============ Selection ============
    /// Open the selected row
    Confirm,
    /// Go back to the previous screen
    Cancel,

    // ============ Global ============
    /// Quit the application
    Quit,
    /// Toggle the help overlay
    Help,
}

impl Action {
    /// Human-readable description shown in the help overlay
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::NextPane => "Next table",
            Action::PrevPane => "Previous table",
            Action::Confirm => "Open",
            Action::Cancel => "Back",
            Action::Quit => "Quit",
            Action::Help => "Show help",
        }
    }

    /// Group name used by the help overlay
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToEnd
            | Action::NextPane
            | Action::PrevPane => "Navigation",

            Action::Confirm | Action::Cancel => "Selection",

            Action::Quit | Action::Help => "Global",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_description() {
        assert_eq!(Action::Confirm.description(), "Open");
        assert_eq!(Action::Cancel.description(), "Back");
    }

    #[test]
    fn test_action_category() {
        assert_eq!(Action::NextPane.category(), "Navigation");
        assert_eq!(Action::Quit.category(), "Global");
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&Action::NextPane).unwrap();
        assert_eq!(json, "\"next_pane\"");
        let action: Action = serde_json::from_str("\"go_to_end\"").unwrap();
        assert_eq!(action, Action::GoToEnd);
    }
}
