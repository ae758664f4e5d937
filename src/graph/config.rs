//! src/graph/config.rs
//!
//! Configuration values for the strip chart: history size, sampling cadence,
//! logical canvas geometry, and keying mode.

use std::time::Duration;

/// Default control value used before the store ever commits one and as the
/// fallback for non-finite reads.
pub const DEFAULT_GAIN: f64 = 1.2;

/// Lower bound for the value-axis ceiling so tiny fluctuations stay small.
pub const VALUE_FLOOR: f64 = 3.0;

/// Fraction of each band step left empty between bars.
pub const PADDING_INNER: f64 = 0.15;

/// Number of ticks requested for the value axis.
pub const VALUE_TICKS: usize = 4;

/// Margins around the plot area, in logical canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 8.0,
            right: 12.0,
            bottom: 22.0,
            left: 36.0,
        }
    }
}

/// How rendered bars are keyed between passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Key `i` is whatever sample currently occupies slot `i`.
    #[default]
    Slot,
    /// Key is the sample's sequence number; evicted samples exit.
    Sample,
}

impl KeyMode {
    pub fn label(self) -> &'static str {
        match self {
            KeyMode::Slot => "slot",
            KeyMode::Sample => "sample",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            KeyMode::Slot => KeyMode::Sample,
            KeyMode::Sample => KeyMode::Slot,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Logical canvas width.
    pub width: f64,

    /// Logical canvas height.
    pub height: f64,

    pub margins: Margins,

    /// Maximum number of samples retained (ring buffer capacity).
    pub max_points: usize,

    /// Sampling period.
    pub sample_period: Duration,

    pub key_mode: KeyMode,
}

impl ChartConfig {
    pub fn new(width: f64, height: f64, max_points: usize, sample_period: Duration) -> Self {
        Self {
            width,
            height,
            max_points,
            sample_period,
            ..Self::default()
        }
    }

    /// Plot area width after margins, never negative.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Plot area height after margins, never negative.
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Duration of enter and update transitions.
    pub fn grow_duration(&self) -> Duration {
        self.sample_period.mul_f64(0.9)
    }

    /// Duration of exit transitions.
    pub fn exit_duration(&self) -> Duration {
        self.sample_period.mul_f64(0.6)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 180.0,
            margins: Margins::default(),
            max_points: 90,
            sample_period: Duration::from_millis(125),
            key_mode: KeyMode::Slot,
        }
    }
}
