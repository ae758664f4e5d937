//! src/control/wander.rs
//!
//! Optional independent writer that random-walks the committed gain, so the
//! chart has something to follow without anyone touching the slider.

use std::time::{Duration, Instant};

use rand::Rng;

use super::draft::SliderRange;
use super::store::{ControlPatch, ControlStore};

pub struct Wander<R: Rng> {
    rng: R,
    period: Duration,
    next_due: Instant,
    /// Largest step per move, in slider steps.
    max_steps: i32,
}

impl<R: Rng> Wander<R> {
    pub fn new(rng: R, period: Duration, now: Instant) -> Self {
        Self {
            rng,
            period,
            next_due: now + period,
            max_steps: 3,
        }
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_due
    }

    /// Commit one random step if due. Returns true if the store changed.
    pub fn poll(&mut self, now: Instant, store: &mut ControlStore) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        let steps = self.rng.random_range(-self.max_steps..=self.max_steps);
        let gain = SliderRange::GAIN.nudge(SliderRange::GAIN.snap(store.gain()), steps);
        store.set(ControlPatch {
            gain: Some(gain),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn walks_inside_slider_range_on_its_own_cadence() {
        let t0 = Instant::now();
        let period = Duration::from_millis(400);
        let mut store = ControlStore::default();
        let mut wander = Wander::new(StdRng::seed_from_u64(3), period, t0);
        assert!(!wander.poll(t0, &mut store));
        let mut now = t0;
        for _ in 0..500 {
            now += period;
            wander.poll(now, &mut store);
            let g = store.gain();
            assert!((0.0..=3.0).contains(&g), "{g}");
        }
        assert_eq!(wander.next_deadline(), now + period);
    }
}
