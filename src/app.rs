//! src/app.rs
//!
//! Live gain strip chart in the terminal.
//!
//! # Overview
//! The application:
//! - Samples the committed gain every `--sample-ms` (default 125 ms) into a
//!   bounded history (`--max-points`, default 90).
//! - Redraws a scrolling bar chart whose value axis rescales to the largest
//!   sample (never below 3), animating bars in, across, and out.
//! - Shows a control form that commits to a shared store with per-widget
//!   policies: sliders on release, text on blur or Enter, toggles and
//!   selects immediately.
//!
//! Everything runs on one thread. The loop waits on terminal input with a
//! timeout up to the nearest deadline (sample tick, wander step, or redraw),
//! so a tick never overlaps another tick or a render pass.
//!
//! # Keyboard Controls
//!
//! - **Up/Down, Tab/Shift-Tab** — Move focus between controls. Leaving a field
//!   commits a pending text edit or releases a held slider.
//! - **Left/Right** — Drag a slider (draft only), switch radio or synth.
//! - **Space** — Toggle the checkbox/radio, or release the slider.
//! - **Enter** — Confirm the tempo text, or release the slider.
//! - **[ / ]** — Shrink / grow the history by 10 samples.
//! - **k** — Switch bar keying between slot and sample.
//! - **q / Esc** — Quit (`q` types into the tempo field while it has focus).
//!
//! # Logging
//! `--log-file PATH` writes info-level logs (overridable with `RUST_LOG`).
//! Without it, logs go to stderr only when `RUST_LOG` is set.

use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use rand::rngs::ThreadRng;
use ratatui::DefaultTerminal;
use ratatui::layout::Constraint;

use crate::cli::{AppConfig, Cli, init_logging};
use crate::control::{ControlStore, ControlsForm, Field, Wander};
use crate::graph::StripChart;
use crate::panels::{
    ControlsPanel, GraphPanel, HistoryPanel, InfoPanel, ParagraphPanel, TitlePanel,
};
use crate::sampler::Sampler;
use crate::ui::{Node, columns, leaf, rows};

const TITLE: &str = "Gain Strip";
const HELP: &str = "↑/↓ focus  ←/→ adjust  Space toggle/release  Enter confirm  [ ] history  k keys  q quit";
const CAPACITY_STEP: usize = 10;
const WANDER_PERIOD: Duration = Duration::from_millis(400);

struct App {
    store: ControlStore,
    form: ControlsForm,
    chart: StripChart,
    sampler: Sampler,
    wander: Option<Wander<ThreadRng>>,
    frame_period: Duration,
    running: bool,
}

impl App {
    fn new(config: AppConfig, now: Instant) -> Self {
        let store = ControlStore::new(config.gain);
        let form = ControlsForm::new(&store);
        let sampler = Sampler::new(config.chart.sample_period, store.gain_reader());
        let chart = StripChart::new(config.chart, store.gain_reader(), now);
        let wander = config
            .wander
            .then(|| Wander::new(rand::rng(), WANDER_PERIOD, now));
        Self {
            store,
            form,
            chart,
            sampler,
            wander,
            frame_period: config.frame_period,
            running: true,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let start = Instant::now();
        self.chart.render_pass(start);
        self.sampler.start(start);

        while self.running {
            let now = Instant::now();
            if let Some(wander) = self.wander.as_mut() {
                wander.poll(now, &mut self.store);
            }
            self.form.sync(&self.store);
            self.sampler.poll(now, &mut self.chart);
            self.chart.advance(now);

            terminal
                .draw(|f| self.layout(now).draw(f, f.area()))
                .wrap_err("drawing frame")?;

            let timeout = self.next_wake(Instant::now());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        self.on_key(key, Instant::now());
                    }
                }
            }
        }

        self.sampler.stop();
        self.chart.teardown();
        Ok(())
    }

    /// Time until the nearest sample tick, wander step, or redraw.
    fn next_wake(&self, now: Instant) -> Duration {
        let mut wake = now + self.frame_period;
        if let Some(due) = self.sampler.next_deadline() {
            wake = wake.min(due);
        }
        if let Some(wander) = &self.wander {
            wake = wake.min(wander.next_deadline());
        }
        wake.saturating_duration_since(now)
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let typing = self.form.focused() == Field::Tempo;
        let store = &mut self.store;
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Up | KeyCode::BackTab => self.form.focus_prev(store),
            KeyCode::Down | KeyCode::Tab => self.form.focus_next(store),
            KeyCode::Left => self.form.nudge(-1, store),
            KeyCode::Right => self.form.nudge(1, store),
            KeyCode::Enter => self.form.confirm(store),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(' ') => self.form.toggle(store),
            KeyCode::Char(c) if typing => self.form.type_char(c),
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('[') => {
                let cap = self.chart.buffer().capacity();
                self.chart
                    .set_capacity(cap.saturating_sub(CAPACITY_STEP).max(1), now);
            }
            KeyCode::Char(']') => {
                let cap = self.chart.buffer().capacity();
                self.chart.set_capacity(cap + CAPACITY_STEP, now);
            }
            KeyCode::Char('k') => {
                let mode = self.chart.config().key_mode.toggled();
                info!("keying bars by {}", mode.label());
                self.chart.set_key_mode(mode, now);
            }
            _ => {}
        }
    }

    fn layout(&self, now: Instant) -> Node<'_> {
        rows(
            vec![
                Constraint::Length(3),
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Min(8),
                Constraint::Length(3),
            ],
            vec![
                leaf(TitlePanel::new(TITLE, &self.store)),
                leaf(GraphPanel::new(&self.chart, now)),
                columns(
                    vec![Constraint::Percentage(55), Constraint::Percentage(45)],
                    vec![
                        leaf(HistoryPanel::new(self.chart.buffer())),
                        leaf(InfoPanel::new(&self.chart, &self.sampler)),
                    ],
                ),
                columns(
                    vec![Constraint::Percentage(65), Constraint::Percentage(35)],
                    vec![
                        leaf(ControlsPanel::new(&self.form, &self.store)),
                        leaf(ParagraphPanel::live_stage("strudel-editor")),
                    ],
                ),
                leaf(ParagraphPanel::new(HELP, "Keys")),
            ],
        )
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref()).wrap_err("setting up logging")?;
    let config = AppConfig::try_from(&cli)?;
    info!(
        "starting: {}x{} canvas, {} points every {:?}, keys by {}",
        config.chart.width,
        config.chart.height,
        config.chart.max_points,
        config.chart.sample_period,
        config.chart.key_mode.label()
    );

    let mut app = App::new(config, Instant::now());
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::config::KeyMode;
    use crate::sampler::SamplerState;
    use ratatui::{Terminal, backend::TestBackend};

    fn app(now: Instant) -> App {
        let cli = Cli::parse_from(["gain_strip", "--max-points", "20"]);
        App::new(AppConfig::try_from(&cli).unwrap(), now)
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn slider_release_reaches_next_sample() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.sampler.start(t0);
        while app.form.focused() != Field::Gain {
            press(&mut app, KeyCode::Down, t0);
        }
        press(&mut app, KeyCode::Right, t0);
        press(&mut app, KeyCode::Right, t0);
        let period = app.sampler.period();
        app.sampler.poll(t0 + period, &mut app.chart);
        press(&mut app, KeyCode::Enter, t0 + period);
        app.sampler.poll(t0 + period * 2, &mut app.chart);
        let values: Vec<f64> = app.chart.buffer().iter().map(|s| s.v).collect();
        assert_eq!(values, vec![1.2, 1.4]);
    }

    #[test]
    fn history_and_key_mode_keys() {
        let t0 = Instant::now();
        let mut app = app(t0);
        press(&mut app, KeyCode::Char('['), t0);
        assert_eq!(app.chart.buffer().capacity(), 10);
        press(&mut app, KeyCode::Char('['), t0);
        assert_eq!(app.chart.buffer().capacity(), 1);
        press(&mut app, KeyCode::Char(']'), t0);
        assert_eq!(app.chart.buffer().capacity(), 11);
        press(&mut app, KeyCode::Char('k'), t0);
        assert_eq!(app.chart.config().key_mode, KeyMode::Sample);
    }

    #[test]
    fn q_types_into_tempo_but_quits_elsewhere() {
        let t0 = Instant::now();
        let mut app = app(t0);
        press(&mut app, KeyCode::Down, t0);
        assert_eq!(app.form.focused(), Field::Tempo);
        press(&mut app, KeyCode::Char('q'), t0);
        assert!(app.running);
        assert_eq!(app.form.tempo.value(), "120/60/4q");
        press(&mut app, KeyCode::Down, t0);
        press(&mut app, KeyCode::Char('q'), t0);
        assert!(!app.running);
    }

    #[test]
    fn wake_never_exceeds_frame_period() {
        let t0 = Instant::now();
        let mut app = app(t0);
        assert_eq!(app.next_wake(t0), app.frame_period);
        app.sampler.start(t0);
        assert!(app.next_wake(t0) <= app.frame_period);
        assert_eq!(app.next_wake(t0 + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn full_layout_renders_and_teardown_stops_sampling() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.chart.render_pass(t0);
        app.sampler.start(t0);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.layout(t0).draw(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Gain Strip"));
        assert!(text.contains("Live Stage"));
        assert!(text.contains("Controls"));

        app.sampler.stop();
        app.sampler.stop();
        assert_eq!(app.sampler.state(), SamplerState::Stopped);
        assert!(!app.sampler.poll(t0 + Duration::from_secs(1), &mut app.chart));
    }
}
