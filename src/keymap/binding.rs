//! Key strings such as "ctrl+n", "shift+backtab" or "j", and their matching
//! against crossterm key events.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Maps one key combination to an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string (e.g., "j", "down", "ctrl+n")
    pub key: String,

    /// The action this key triggers
    pub action: Action,

    /// Overrides the action description in the help overlay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A key string resolved to crossterm terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
            description: None,
        }
    }

    /// Whether this binding fires for the given key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match parse_key_string(&self.key) {
            Ok(parsed) => parsed.code == code && parsed.modifiers == modifiers,
            Err(_) => false,
        }
    }

    /// Display form, e.g. "Ctrl+N"
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    pub fn get_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }
}

/// Parse "ctrl+shift+n" style strings.
///
/// Shifted letters are stored upper-case, which is how crossterm reports them.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    let (modifier_parts, key_part) = match key.rsplit_once('+') {
        // A trailing "+" is the plus key itself.
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, last)) => (mods, last),
        None => ("", key.as_str()),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        modifiers |= match part {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            "super" | "meta" | "cmd" => KeyModifiers::SUPER,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    let mut code = parse_key_code(key_part.trim())?;
    if let KeyCode::Char(c) = code {
        if modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_alphabetic() {
            code = KeyCode::Char(c.to_ascii_uppercase());
        }
    }
    Ok(ParsedKey { code, modifiers })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {}", key)),
            }
        }
    };
    Ok(code)
}

/// Format a key string for display ("ctrl+n" -> "Ctrl+N")
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "ctrl" | "control" => "Ctrl".to_string(),
                "alt" | "option" => "Alt".to_string(),
                "shift" => "Shift".to_string(),
                "super" | "meta" | "cmd" => "Cmd".to_string(),
                "up" => "↑".to_string(),
                "down" => "↓".to_string(),
                "left" => "←".to_string(),
                "right" => "→".to_string(),
                "enter" | "return" => "Enter".to_string(),
                "esc" | "escape" => "Esc".to_string(),
                "space" => "Space".to_string(),
                "tab" => "Tab".to_string(),
                "backtab" => "Shift+Tab".to_string(),
                "backspace" | "bs" => "Backspace".to_string(),
                "pageup" | "pgup" => "PgUp".to_string(),
                "pagedown" | "pgdn" => "PgDn".to_string(),
                "home" => "Home".to_string(),
                "end" => "End".to_string(),
                _ => part.to_uppercase(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}
