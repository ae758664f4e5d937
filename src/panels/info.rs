//! src/panels/info.rs
//!
//! Chart info: value ceiling, last reconcile counts, transitions in flight,
//! sampler state and key mode.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::chart::StripChart;
use crate::sampler::{Sampler, SamplerState};

pub struct InfoPanel<'a> {
    chart: &'a StripChart,
    sampler: &'a Sampler,
}

impl<'a> InfoPanel<'a> {
    pub fn new(chart: &'a StripChart, sampler: &'a Sampler) -> Self {
        Self { chart, sampler }
    }
}

impl crate::ui::Panel for InfoPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (_, ceiling) = self.chart.scales().value.domain();
        let (enter, update, exit) = self.chart.last_ops();
        let (entering, updating, exiting) = self.chart.animator().phase_counts();
        let state = self.sampler.state();
        let state_style = match state {
            SamplerState::Running => Style::default().fg(Color::Green),
            SamplerState::Idle => Style::default().fg(Color::Yellow),
            SamplerState::Stopped => Style::default().fg(Color::Red),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("sampler ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(state.label(), state_style),
                Span::raw(format!(
                    "  every {}ms  ticks={} skipped={}",
                    self.sampler.period().as_millis(),
                    self.sampler.ticks(),
                    self.sampler.skipped()
                )),
            ]),
            Line::from(format!(
                "ceiling={ceiling}  keys={}",
                self.chart.config().key_mode.label()
            )),
            Line::from(format!(
                "pass {}: +{enter} ~{update} -{exit}",
                self.chart.passes()
            )),
            Line::from(format!(
                "bars={} entering={entering} updating={updating} exiting={exiting}",
                self.chart.animator().len()
            )),
        ];

        let block = Block::default().title("Info").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::cell::GainCell;
    use crate::graph::config::ChartConfig;
    use crate::ui::Panel;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    #[test]
    fn reports_sampler_and_scale_state() {
        let t0 = Instant::now();
        let gain = GainCell::new(4.2);
        let cfg = ChartConfig::default();
        let mut chart = StripChart::new(cfg.clone(), gain.reader(), t0);
        let mut sampler = Sampler::new(cfg.sample_period, gain.reader());
        sampler.start(t0);
        sampler.poll(t0 + Duration::from_millis(125), &mut chart);

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal
            .draw(|f| InfoPanel::new(&chart, &sampler).draw(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("running"));
        assert!(text.contains("ticks=1"));
        assert!(text.contains("ceiling=4.5"));
        assert!(text.contains("keys=slot"));
        assert!(text.contains("+1 ~0 -0"));
    }
}
