//! src/graph/tween.rs
//!
//! Fixed-step tween scheduler for bar geometry.
//!
//! Each live bar carries at most one running transition. Starting a new one
//! interrupts the old from wherever it had got to. Exiting bars are dropped
//! the first time `advance` sees their transition finished. The redraw loop
//! samples geometry at its own fixed frame step.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Bar rectangle in plot-area coordinates (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub width: f64,
    pub y_top: f64,
    pub height: f64,
}

impl Geometry {
    /// Component-wise interpolation at `t` in `[0, 1]`.
    pub fn lerp(&self, to: &Geometry, t: f64) -> Geometry {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Geometry {
            x: mix(self.x, to.x),
            width: mix(self.width, to.width),
            y_top: mix(self.y_top, to.y_top),
            height: mix(self.height, to.height),
        }
    }

    /// Same column, collapsed onto `baseline`.
    pub fn collapsed(&self, baseline: f64) -> Geometry {
        Geometry {
            y_top: baseline,
            height: 0.0,
            ..*self
        }
    }
}

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Identity of a bar across render passes.
///
/// Slot and sample keys never compare equal, so bars keyed one way can still
/// collapse out while the other way enters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BarKey {
    Slot(usize),
    Sample(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Updating,
    Exiting,
}

#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub from: Geometry,
    pub to: Geometry,
    pub duration: Duration,
    pub started: Instant,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> Geometry {
        self.from.lerp(&self.to, ease_cubic_in_out(self.progress(now)))
    }

    pub fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimatedBar {
    pub phase: Phase,
    pub transition: Transition,
}

/// Live bars by key, each with its transition.
#[derive(Debug, Default)]
pub struct Animator {
    bars: BTreeMap<BarKey, AnimatedBar>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a transition for `key`.
    pub fn start(&mut self, key: BarKey, phase: Phase, transition: Transition) {
        self.bars.insert(key, AnimatedBar { phase, transition });
    }

    /// Interpolated geometry of `key` at `now`, if it is on screen.
    pub fn geometry_at(&self, key: BarKey, now: Instant) -> Option<Geometry> {
        self.get(key).map(|b| b.transition.sample(now))
    }

    /// Drop exits that have finished by `now`.
    ///
    /// Returns true while anything is still moving.
    pub fn advance(&mut self, now: Instant) -> bool {
        self.bars
            .retain(|_, b| !(b.phase == Phase::Exiting && b.transition.finished(now)));
        self.bars.values().any(|b| !b.transition.finished(now))
    }

    pub fn bars(&self) -> impl Iterator<Item = (BarKey, &AnimatedBar)> {
        self.bars.iter().map(|(k, b)| (*k, b))
    }

    pub fn get(&self, key: BarKey) -> Option<&AnimatedBar> {
        self.bars.get(&key)
    }

    /// Number of bars in each phase: (entering, updating, exiting).
    pub fn phase_counts(&self) -> (usize, usize, usize) {
        self.bars.values().fold((0, 0, 0), |(e, u, x), b| match b.phase {
            Phase::Entering => (e + 1, u, x),
            Phase::Updating => (e, u + 1, x),
            Phase::Exiting => (e, u, x + 1),
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn clear(&mut self) {
        self.bars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(y_top: f64, height: f64) -> Geometry {
        Geometry {
            x: 10.0,
            width: 4.0,
            y_top,
            height,
        }
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
    }

    #[test]
    fn transition_lands_on_target() {
        let t0 = Instant::now();
        let tr = Transition {
            from: geom(150.0, 0.0),
            to: geom(90.0, 60.0),
            duration: Duration::from_millis(100),
            started: t0,
        };
        assert_eq!(tr.sample(t0), geom(150.0, 0.0));
        let mid = tr.sample(t0 + Duration::from_millis(50));
        assert!((mid.height - 30.0).abs() < 1e-9);
        assert_eq!(tr.sample(t0 + Duration::from_millis(100)), geom(90.0, 60.0));
        assert!(tr.finished(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn zero_duration_is_immediate() {
        let t0 = Instant::now();
        let tr = Transition {
            from: geom(0.0, 0.0),
            to: geom(5.0, 5.0),
            duration: Duration::ZERO,
            started: t0,
        };
        assert!(tr.finished(t0));
        assert_eq!(tr.sample(t0), geom(5.0, 5.0));
    }

    #[test]
    fn finished_exits_are_removed() {
        let t0 = Instant::now();
        let mut anim = Animator::new();
        let d = Duration::from_millis(75);
        anim.start(
            BarKey::Slot(1),
            Phase::Exiting,
            Transition {
                from: geom(90.0, 60.0),
                to: geom(150.0, 0.0),
                duration: d,
                started: t0,
            },
        );
        anim.start(
            BarKey::Slot(2),
            Phase::Updating,
            Transition {
                from: geom(90.0, 60.0),
                to: geom(100.0, 50.0),
                duration: d,
                started: t0,
            },
        );
        assert!(anim.advance(t0 + Duration::from_millis(10)));
        assert_eq!(anim.phase_counts(), (0, 1, 1));
        assert!(!anim.advance(t0 + d));
        assert!(anim.get(BarKey::Slot(1)).is_none());
        assert!(anim.get(BarKey::Slot(2)).is_some());
        assert_eq!(anim.geometry_at(BarKey::Slot(2), t0 + d), Some(geom(100.0, 50.0)));
    }
}
