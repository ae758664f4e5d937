//! src/sampler.rs
//!
//! Fixed-period sampler: reads the gain, appends a sample, and triggers the
//! chart's render pass.
//!
//! Deadlines are laid on a fixed grid from the start instant, so the time a
//! render pass takes never pushes later ticks back. Missed deadlines are
//! skipped, not replayed.

use std::time::{Duration, Instant};

use log::{info, warn};

use crate::control::GainReader;
use crate::graph::chart::StripChart;
use crate::graph::config::DEFAULT_GAIN;
use crate::graph::data::{Sample, coerce_finite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Running,
    Stopped,
}

impl SamplerState {
    pub fn label(self) -> &'static str {
        match self {
            SamplerState::Idle => "idle",
            SamplerState::Running => "running",
            SamplerState::Stopped => "stopped",
        }
    }
}

pub struct Sampler {
    period: Duration,
    gain: GainReader,
    state: SamplerState,
    next_due: Option<Instant>,
    last_good: f64,
    /// Set while consecutive reads are non-finite, so the warning fires once.
    invalid: bool,
    ticks: u64,
    skipped: u64,
}

impl Sampler {
    /// A period of zero is raised to one millisecond.
    pub fn new(period: Duration, gain: GainReader) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            gain,
            state: SamplerState::Idle,
            next_due: None,
            last_good: DEFAULT_GAIN,
            invalid: false,
            ticks: 0,
            skipped: 0,
        }
    }

    /// Arm the first deadline one period after `now`. No-op unless idle.
    pub fn start(&mut self, now: Instant) {
        if self.state != SamplerState::Idle {
            return;
        }
        self.state = SamplerState::Running;
        self.next_due = Some(now + self.period);
        info!("sampler started, period {:?}", self.period);
    }

    /// Stop for good. Safe to call repeatedly and before `start`.
    pub fn stop(&mut self) {
        if self.state == SamplerState::Stopped {
            return;
        }
        self.state = SamplerState::Stopped;
        self.next_due = None;
        info!("sampler stopped after {} ticks", self.ticks);
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Deadlines dropped because the loop woke up late.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Gain to record, substituting the last good value for non-finite reads.
    fn read(&mut self) -> f64 {
        let raw = self.gain.get();
        let v = coerce_finite(raw, &mut self.last_good);
        if raw.is_finite() {
            self.invalid = false;
        } else if !self.invalid {
            self.invalid = true;
            warn!("gain read {raw} is not finite; sampling {v}");
        }
        v
    }

    /// Run the tick if its deadline has passed. Returns true if a sample was taken.
    pub fn poll(&mut self, now: Instant, chart: &mut StripChart) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if self.state != SamplerState::Running || now < due {
            return false;
        }

        let v = self.read();
        chart.append(Sample::new(chart.elapsed(now), v));
        chart.render_pass(now);
        self.ticks += 1;

        let period_ns = self.period.as_nanos();
        let late_ns = now.saturating_duration_since(due).as_nanos();
        let missed = u64::try_from(late_ns / period_ns).unwrap_or(u64::MAX);
        self.skipped = self.skipped.saturating_add(missed);
        // first grid point strictly after `now`
        let into_period = u64::try_from(late_ns % period_ns)
            .map(Duration::from_nanos)
            .unwrap_or_default();
        self.next_due = Some(now + self.period.saturating_sub(into_period));
        true
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}
