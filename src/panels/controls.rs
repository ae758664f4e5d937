//! src/panels/controls.rs
//!
//! Controls panel: one row per field, focused row highlighted. Drafts that
//! have not been committed yet are marked with `*`.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::control::store::SYNTHS;
use crate::control::{ControlStore, ControlsForm, Draft, Field, SliderRange};

pub struct ControlsPanel<'a> {
    form: &'a ControlsForm,
    store: &'a ControlStore,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(form: &'a ControlsForm, store: &'a ControlStore) -> Self {
        Self { form, store }
    }

    fn slider(draft: &Draft<f64>, range: SliderRange, committed: f64) -> String {
        const CELLS: usize = 12;
        let filled = (range.fraction(*draft.value()) * CELLS as f64).round() as usize;
        let track: String = (0..CELLS).map(|i| if i < filled { '=' } else { '-' }).collect();
        let mark = if draft.is_dirty() { "*" } else { "" };
        format!("[{track}] {:.2}{mark} (committed {committed:.2})", draft.value())
    }

    fn value_text(&self, field: Field) -> String {
        let form = self.form;
        match field {
            Field::Hush => {
                let hushed = *form.hush.value();
                format!(
                    "({}) No Hush  ({}) Add Hushes",
                    if hushed { ' ' } else { '•' },
                    if hushed { '•' } else { ' ' }
                )
            }
            Field::Tempo => {
                let mark = if form.tempo.is_dirty() { "*" } else { "" };
                format!("{}{mark}", form.tempo.value())
            }
            Field::Room => {
                Self::slider(&form.room, SliderRange::ROOM, self.store.settings().room)
            }
            Field::Gain => Self::slider(&form.gain, SliderRange::GAIN, self.store.gain()),
            Field::Drums => format!("[{}]", if *form.drums.value() { 'x' } else { ' ' }),
            Field::Synth => SYNTHS
                .iter()
                .find(|(value, _)| *value == form.synth.value().as_str())
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| form.synth.value().clone()),
        }
    }
}

impl crate::ui::Panel for ControlsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let focused = self.form.focused();
        let lines: Vec<Line> = Field::ALL
            .iter()
            .map(|&field| {
                let label_style = if field == focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let cursor = if field == focused { "> " } else { "  " };
                Line::from(vec![
                    Span::styled(cursor, label_style),
                    Span::styled(format!("{:<20}", field.label()), label_style),
                    Span::raw(self.value_text(field)),
                ])
            })
            .collect();

        let block = Block::default().title("Controls").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Panel;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(form: &ControlsForm, store: &ControlStore) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|f| ControlsPanel::new(form, store).draw(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn pending_slider_draft_is_marked() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        while form.focused() != Field::Gain {
            form.focus_next(&mut store);
        }
        form.nudge(1, &mut store);
        let text = render(&form, &store);
        assert!(text.contains("1.30* (committed 1.20)"));
        assert!(text.contains("> Gain"));
        assert!(text.contains("GM Piano"));
    }
}
