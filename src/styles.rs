//! Theme and style system
//!
//! A small palette with dark, light and no-color variants. The active theme
//! is set once at startup from the config (or `NO_COLOR`).

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Marker drawn next to the selected table row
pub const ROW_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Replace the global theme
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// The current theme
pub fn theme() -> Theme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Modifiers only, no colors (`NO_COLOR=1` / `--no-colors`)
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    /// Titles and table headers
    pub primary: Color,
    /// Checked items
    pub success: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_emphasis: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Cyan,
            success: Color::Green,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Yellow,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            highlight_bg: Color::DarkGray,
        }
    }

    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Blue,
            success: Color::Green,
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Blue,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            highlight_bg: Color::Gray,
        }
    }

    /// Palette values are ignored by the style helpers in this mode.
    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            success: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            highlight_bg: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    pub fn title_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    pub fn emphasis_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.text_emphasis)
    }

    pub fn checked_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::CROSSED_OUT);
        }
        Style::default().fg(self.success)
    }

    pub fn border_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.border_focused)
    }

    /// Selected table row
    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>().unwrap(), ThemeType::Dark);
        assert_eq!("Light".parse::<ThemeType>().unwrap(), ThemeType::Light);
        assert_eq!("no-color".parse::<ThemeType>().unwrap(), ThemeType::NoColor);
        assert_eq!("unknown".parse::<ThemeType>().unwrap(), ThemeType::Dark);
    }

    #[test]
    fn test_no_color_styles_do_not_set_colors() {
        let t = Theme::new(ThemeType::NoColor);
        for style in [t.highlight_style(), t.title_style(), t.checked_style()] {
            assert!(style.fg.is_none());
            assert!(style.bg.is_none());
        }
    }
}
