//! src/panels/history.rs
//!
//! History panel: the most recent samples, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::data::RingBuffer;

pub struct HistoryPanel<'a> {
    buffer: &'a RingBuffer,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(buffer: &'a RingBuffer) -> Self {
        Self { buffer }
    }
}

impl crate::ui::Panel for HistoryPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("History").borders(Borders::ALL);
        let visible = block.inner(area).height as usize;
        let len = self.buffer.len();
        let skip = len.saturating_sub(visible);

        let lines: Vec<Line> = self
            .buffer
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, s)| {
                let value_style = if i + 1 == len {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(vec![
                    Span::styled("t ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{:>8.3}s", s.t.as_secs_f64()),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("  "),
                    Span::styled("gain ", Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:.2}", s.v), value_style),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
