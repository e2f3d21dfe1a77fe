use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Height the standard layout reserves for the footer
pub const FOOTER_HEIGHT: u16 = 2;

/// Key hint footer
pub struct Footer;

impl Footer {
    /// Render `text` ("Label: keys | Label: keys"). `busy` appends a marker
    /// while the visible screen waits on a request.
    pub fn render(frame: &mut Frame, area: Rect, text: &str, busy: bool) {
        let t = theme();
        let mut spans = Vec::new();

        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            if let Some((keys, label)) = part.split_once(": ") {
                spans.push(Span::styled(
                    format!("{}: ", keys),
                    t.emphasis_style().add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(label.to_string(), t.text_style()));
            } else {
                spans.push(Span::styled(part.to_string(), t.text_style()));
            }
        }

        if busy {
            spans.push(Span::styled("  …", t.title_style()));
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(t.border_focused_style())
            .border_type(BorderType::Rounded);

        let footer = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(footer, area);
    }
}
