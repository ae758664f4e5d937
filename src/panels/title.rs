//! src/panels/title.rs
//!
//! Header: app name on the left, committed control values on the right.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::control::ControlStore;

pub struct TitlePanel<'a> {
    title: &'a str,
    store: &'a ControlStore,
}

impl<'a> TitlePanel<'a> {
    pub fn new(title: &'a str, store: &'a ControlStore) -> Self {
        Self { title, store }
    }

    fn status(&self) -> String {
        let s = self.store.settings();
        format!(
            "gain {:.2}  room {:.2}  cps {}  {}{}",
            self.store.gain(),
            s.room,
            s.tempo,
            s.synth,
            if s.drums_muted { "  drums muted" } else { "" }
        )
    }
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Min(0)])
            .split(inner);
        f.render_widget(
            Paragraph::new(self.title).style(Style::default().add_modifier(Modifier::BOLD)),
            halves[0],
        );
        f.render_widget(
            Paragraph::new(self.status()).alignment(Alignment::Right),
            halves[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::store::ControlPatch;

    #[test]
    fn status_reflects_committed_values() {
        let mut store = ControlStore::default();
        store.set(ControlPatch {
            gain: Some(2.0),
            drums_muted: Some(true),
            ..Default::default()
        });
        let title = TitlePanel::new("gain strip", &store);
        assert_eq!(
            title.status(),
            "gain 2.00  room 0.20  cps 120/60/4  gm_piano:0  drums muted"
        );
    }
}
