use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Height the standard layout reserves for the header
pub const HEADER_HEIGHT: u16 = 4;

/// Screen header: bordered block with a title and a one or two line description
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, title: &str, description: &str) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", title))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        let description = Paragraph::new(description)
            .style(t.text_style())
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(description, area);
    }
}
