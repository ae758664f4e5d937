//! src/graph/scale.rs
//!
//! Band (index → x) and linear (value → y) scales, recomputed every render.
//!
//! Both follow the d3 conventions the chart was designed around: band steps
//! with inner padding and centred alignment, and linear domains "niced" with
//! the tick-increment rule so axis labels land on round numbers.

use super::config::{PADDING_INNER, VALUE_FLOOR};
use super::data::Sample;

/// Maps slot indices `0..n` onto evenly spaced bands across `[0, width]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    /// Build a band scale for `count` slots over `width` units.
    ///
    /// Widths that are negative or non-finite collapse to zero.
    pub fn new(count: usize, width: f64, padding_inner: f64) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let padding = padding_inner.clamp(0.0, 1.0);
        let step = width / (count as f64 - padding).max(1.0);
        // align 0.5: any leftover space is split evenly on both sides
        let offset = (width - step * (count as f64 - padding)) * 0.5;
        Self {
            count,
            step,
            bandwidth: step * (1.0 - padding),
            offset: offset.max(0.0),
        }
    }

    /// Left edge of band `i`.
    pub fn x(&self, i: usize) -> f64 {
        self.offset + self.step * i as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Continuous linear map from `[d0, d1]` onto `[r0, r1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Round the domain outward to multiples of the tick increment for `count` ticks.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut prev_step = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prev_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prev_step = Some(step);
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Round tick values across the domain, approximately `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if stop < start {
            std::mem::swap(&mut start, &mut stop);
        }
        let inc = tick_increment(start, stop, count);
        if inc == 0.0 || !inc.is_finite() {
            return if start == stop { vec![start] } else { Vec::new() };
        }
        if inc > 0.0 {
            let lo = (start / inc).ceil() as i64;
            let hi = (stop / inc).floor() as i64;
            (lo..=hi).map(|i| i as f64 * inc).collect()
        } else {
            let inv = -inc;
            let lo = (start * inv).ceil() as i64;
            let hi = (stop * inv).floor() as i64;
            (lo..=hi).map(|i| i as f64 / inv).collect()
        }
    }

    /// Decimal places needed to print ticks for `count` without noise.
    pub fn tick_precision(&self, count: usize) -> usize {
        let (d0, d1) = self.domain;
        let inc = tick_increment(d0.min(d1), d0.max(d1), count);
        if inc < 0.0 {
            (-inc).log10().ceil().max(0.0) as usize
        } else {
            0
        }
    }
}

/// d3's tick increment: positive for steps ≥ 1, negative reciprocal otherwise.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();
    let step = (stop - start) / count.max(1) as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// The pair of scales a render pass draws with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub index: BandScale,
    pub value: LinearScale,
}

impl Scales {
    /// Compute both scales from the snapshot and the plot area.
    pub fn compute(snapshot: &[Sample], plot_width: f64, plot_height: f64) -> Self {
        let plot_height = if plot_height.is_finite() { plot_height.max(0.0) } else { 0.0 };
        let index = BandScale::new(snapshot.len(), plot_width, PADDING_INNER);
        let value = LinearScale::new((0.0, value_ceiling(snapshot)), (plot_height, 0.0)).nice(10);
        Self { index, value }
    }

    /// Pixel y of the zero baseline.
    pub fn baseline(&self) -> f64 {
        self.value.apply(0.0)
    }
}

/// `max(VALUE_FLOOR, max v)` over finite values, before nicing.
pub fn value_ceiling(snapshot: &[Sample]) -> f64 {
    snapshot
        .iter()
        .map(|s| s.v)
        .filter(|v| v.is_finite())
        .fold(VALUE_FLOOR, f64::max)
}
