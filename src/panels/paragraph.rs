//! src/panels/paragraph.rs
//!
//! Static text panel: key help, footer, and the live-stage mount point.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct ParagraphPanel {
    text: String,
    title: String,
    style: Style,
    alignment: Alignment,
}

impl ParagraphPanel {
    pub fn new(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            style: Style::default(),
            alignment: Alignment::Left,
        }
    }

    /// Placeholder where an external live-coding engine would mount its editor.
    pub fn live_stage(id: &str) -> Self {
        Self::new(format!("#{id}\n(no engine attached)"), "Live Stage")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl crate::ui::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.as_str())
            .style(self.style)
            .alignment(self.alignment)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
