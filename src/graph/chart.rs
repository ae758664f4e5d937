//! src/graph/chart.rs
//!
//! The strip chart: owns the sample history, recomputes scales on every
//! render pass, reconciles the bars against the previous pass, and exposes a
//! drawable frame at any instant.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use log::{info, trace, warn};

use super::config::{ChartConfig, DEFAULT_GAIN, KeyMode, VALUE_TICKS};
use super::data::{RingBuffer, Sample, coerce_finite};
use super::reconcile::{self, Ops, Timing, bar_key};
use super::scale::{LinearScale, Scales};
use super::tween::{Animator, BarKey, Geometry, Phase};
use crate::control::GainReader;

/// Bar as it should be drawn right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameBar {
    pub key: BarKey,
    pub phase: Phase,
    pub geometry: Geometry,
}

/// Everything a surface needs to paint one frame.
#[derive(Clone, Debug)]
pub struct ChartFrame {
    pub bars: Vec<FrameBar>,
    /// (value, y) pairs for the value axis.
    pub value_ticks: Vec<(f64, f64)>,
    pub tick_precision: usize,
    /// x positions of unlabeled index-axis ticks.
    pub index_ticks: Vec<f64>,
    pub plot_width: f64,
    pub plot_height: f64,
}

pub struct StripChart {
    config: ChartConfig,
    buffer: RingBuffer,
    gain: GainReader,
    last_good: f64,
    origin: Instant,
    previous_keys: BTreeSet<BarKey>,
    animator: Animator,
    scales: Scales,
    last_ops: (usize, usize, usize),
    passes: u64,
}

impl StripChart {
    pub fn new(config: ChartConfig, gain: GainReader, origin: Instant) -> Self {
        let buffer = RingBuffer::new(config.max_points);
        let scales = Scales::compute(&[], config.plot_width(), config.plot_height());
        Self {
            config,
            buffer,
            gain,
            last_good: DEFAULT_GAIN,
            origin,
            previous_keys: BTreeSet::new(),
            animator: Animator::new(),
            scales,
            last_ops: (0, 0, 0),
            passes: 0,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn buffer(&self) -> &RingBuffer {
        &self.buffer
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// (enter, update, exit) counts of the most recent pass.
    pub fn last_ops(&self) -> (usize, usize, usize) {
        self.last_ops
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Monotonic timestamp for a sample taken at `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.origin)
    }

    pub fn append(&mut self, sample: Sample) -> Vec<Sample> {
        self.buffer.append(sample)
    }

    /// Resize the history and redraw so evicted bars leave.
    pub fn set_capacity(&mut self, capacity: usize, now: Instant) {
        let evicted = self.buffer.set_capacity(capacity);
        self.config.max_points = self.buffer.capacity();
        info!(
            "history capacity set to {} ({} evicted)",
            self.config.max_points,
            evicted.len()
        );
        self.render_pass(now);
    }

    /// Switch keying. Bars keyed the old way collapse out and the current
    /// snapshot enters fresh.
    pub fn set_key_mode(&mut self, mode: KeyMode, now: Instant) {
        if mode == self.config.key_mode {
            return;
        }
        self.config.key_mode = mode;
        let timing = self.timing();
        let baseline = self.scales.baseline();
        let exits = Ops {
            exit: self
                .animator
                .bars()
                .filter(|(_, b)| b.phase != Phase::Exiting)
                .map(|(key, _)| {
                    let from = self.animator.geometry_at(key, now).unwrap_or_default();
                    reconcile::BarOp {
                        key,
                        from,
                        to: from.collapsed(baseline),
                        duration: timing.exit,
                    }
                })
                .collect(),
            ..Ops::default()
        };
        reconcile::apply(&exits, &mut self.animator, now);
        self.previous_keys.clear();
        self.render_pass(now);
    }

    /// Current scalar, with non-finite reads replaced by the last good value.
    fn current_value(&mut self) -> f64 {
        let raw = self.gain.get();
        let v = coerce_finite(raw, &mut self.last_good);
        if !raw.is_finite() {
            warn!("non-finite gain {raw}; drawing {v} instead");
        }
        v
    }

    /// Snapshot for drawing, or a single bootstrap sample when empty.
    fn render_snapshot(&mut self, now: Instant) -> Vec<Sample> {
        if !self.buffer.is_empty() {
            return self.buffer.snapshot();
        }
        let v = self.current_value();
        vec![Sample {
            t: self.elapsed(now),
            v,
            seq: u64::MAX,
        }]
    }

    fn timing(&self) -> Timing {
        Timing {
            grow: self.config.grow_duration(),
            exit: self.config.exit_duration(),
        }
    }

    /// Recompute scales, diff against the previous pass, and start transitions.
    pub fn render_pass(&mut self, now: Instant) -> Ops {
        let snapshot = self.render_snapshot(now);
        self.scales = Scales::compute(
            &snapshot,
            self.config.plot_width(),
            self.config.plot_height(),
        );
        let animator = &self.animator;
        let ops = reconcile::reconcile(
            &self.previous_keys,
            &snapshot,
            &self.scales,
            self.config.key_mode,
            self.timing(),
            |key| animator.geometry_at(key, now),
        );
        reconcile::apply(&ops, &mut self.animator, now);

        let mode = self.config.key_mode;
        self.previous_keys = snapshot
            .iter()
            .enumerate()
            .map(|(i, s)| bar_key(mode, i, s))
            .collect();
        self.last_ops = (ops.enter.len(), ops.update.len(), ops.exit.len());
        self.passes += 1;
        trace!(
            "pass {}: enter={} update={} exit={} ceiling={}",
            self.passes,
            ops.enter.len(),
            ops.update.len(),
            ops.exit.len(),
            self.scales.value.domain().1
        );
        ops
    }

    /// Step transitions; returns true while anything is animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        self.animator.advance(now)
    }

    /// Drawable state at `now`.
    pub fn frame(&self, now: Instant) -> ChartFrame {
        let mut bars: Vec<FrameBar> = self
            .animator
            .bars()
            .map(|(key, b)| FrameBar {
                key,
                phase: b.phase,
                geometry: b.transition.sample(now),
            })
            .collect();
        // exits underneath live bars
        bars.sort_by_key(|b| b.phase != Phase::Exiting);

        let value = &self.scales.value;
        let value_ticks = value
            .ticks(VALUE_TICKS)
            .into_iter()
            .map(|v| (v, value.apply(v)))
            .collect();

        let plot_width = self.config.plot_width();
        let index_axis =
            LinearScale::new((0.0, self.scales.index.count() as f64), (0.0, plot_width));
        let index_ticks = index_axis
            .ticks(VALUE_TICKS)
            .into_iter()
            .map(|i| index_axis.apply(i))
            .collect();

        ChartFrame {
            bars,
            value_ticks,
            tick_precision: value.tick_precision(VALUE_TICKS),
            index_ticks,
            plot_width,
            plot_height: self.config.plot_height(),
        }
    }

    /// Drop all history and visuals.
    pub fn teardown(&mut self) {
        self.buffer.clear();
        self.animator.clear();
        self.previous_keys.clear();
    }
}
