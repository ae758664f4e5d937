//! src/graph/reconcile.rs
//!
//! Keyed enter/update/exit diff between the previously rendered bars and a
//! new snapshot.
//!
//! `reconcile` is pure: it only produces typed operation lists. `apply`
//! hands them to the tween scheduler.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::config::KeyMode;
use super::data::Sample;
use super::scale::Scales;
use super::tween::{Animator, BarKey, Geometry, Phase, Transition};

/// One visual change for a single key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarOp {
    pub key: BarKey,
    pub from: Geometry,
    pub to: Geometry,
    pub duration: Duration,
}

/// The three disjoint operation lists of a render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ops {
    pub enter: Vec<BarOp>,
    pub update: Vec<BarOp>,
    pub exit: Vec<BarOp>,
}

/// Key under which slot `index` holding `sample` is rendered.
pub fn bar_key(mode: KeyMode, index: usize, sample: &Sample) -> BarKey {
    match mode {
        KeyMode::Slot => BarKey::Slot(index),
        KeyMode::Sample => BarKey::Sample(sample.seq),
    }
}

/// Target rectangle for slot `index` holding value `v`.
///
/// Negative or non-finite heights degrade to zero rather than inverting.
pub fn target_geometry(scales: &Scales, index: usize, v: f64) -> Geometry {
    let baseline = scales.baseline();
    let y = scales.value.apply(v);
    let y_top = if y.is_finite() { y.min(baseline) } else { baseline };
    Geometry {
        x: scales.index.x(index),
        width: scales.index.bandwidth().max(0.0),
        y_top,
        height: (baseline - y_top).max(0.0),
    }
}

/// Timing for the transitions a pass emits.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    pub grow: Duration,
    pub exit: Duration,
}

/// Diff `previous` keys against `snapshot`.
///
/// `current` reports where an existing key is drawn right now, so updates and
/// exits start from the on-screen geometry instead of their last target.
pub fn reconcile(
    previous: &BTreeSet<BarKey>,
    snapshot: &[Sample],
    scales: &Scales,
    mode: KeyMode,
    timing: Timing,
    current: impl Fn(BarKey) -> Option<Geometry>,
) -> Ops {
    let baseline = scales.baseline();
    let mut ops = Ops::default();
    let mut seen = BTreeSet::new();

    for (i, sample) in snapshot.iter().enumerate() {
        let key = bar_key(mode, i, sample);
        seen.insert(key);
        let to = target_geometry(scales, i, sample.v);
        if previous.contains(&key) {
            let from = current(key).unwrap_or(to);
            ops.update.push(BarOp {
                key,
                from,
                to,
                duration: timing.grow,
            });
        } else {
            ops.enter.push(BarOp {
                key,
                from: to.collapsed(baseline),
                to,
                duration: timing.grow,
            });
        }
    }

    for &key in previous.difference(&seen) {
        if let Some(from) = current(key) {
            ops.exit.push(BarOp {
                key,
                from,
                to: from.collapsed(baseline),
                duration: timing.exit,
            });
        }
    }

    ops
}

/// Start every operation on the animator at `now`.
pub fn apply(ops: &Ops, animator: &mut Animator, now: Instant) {
    let lists = [
        (Phase::Entering, &ops.enter),
        (Phase::Updating, &ops.update),
        (Phase::Exiting, &ops.exit),
    ];
    for (phase, list) in lists {
        for op in list {
            animator.start(
                op.key,
                phase,
                Transition {
                    from: op.from,
                    to: op.to,
                    duration: op.duration,
                    started: now,
                },
            );
        }
    }
}
