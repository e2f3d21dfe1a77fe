//! Key binding overlay shown on the help key.

use crate::keymap::Keymap;
use crate::styles::theme;
use crate::utils::center_popup;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub struct HelpOverlay;

impl HelpOverlay {
    /// Lines of the overlay body, grouped by action category
    pub fn lines(keymap: &Keymap) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::new();
        let mut current_category = "";

        for binding in keymap.all_bindings() {
            let category = binding.action.category();
            if category != current_category {
                if !current_category.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(format!("  {}", category), t.title_style())));
                current_category = category;
            }
            lines.push(Line::from(vec![
                Span::styled(format!("    {:14}", binding.display()), t.emphasis_style()),
                Span::styled(binding.get_description().to_string(), t.text_style()),
            ]));
        }
        lines
    }

    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) {
        let t = theme();
        let popup = center_popup(area, 70, 80);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name()))
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

        frame.render_widget(
            Paragraph::new(Self::lines(keymap)).wrap(Wrap { trim: false }),
            body,
        );
        frame.render_widget(
            Paragraph::new(format!(
                "Edit keybindings in: {}\nPress any key to close",
                config_path
            ))
            .style(t.muted_style())
            .alignment(Alignment::Center),
            footer,
        );
    }
}
