//! src/control/draft.rs
//!
//! Local draft values with a commit boundary.
//!
//! A draft holds what the user is editing. It only reaches the store when its
//! policy's trigger fires: release for sliders, blur or confirm for text, and
//! every edit for checkboxes, radios and selects.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit when the pointer (or its keyboard stand-in) is released.
    OnRelease,
    /// Commit when focus leaves or the confirm key is pressed.
    OnBlurOrConfirm,
    /// Commit on every change.
    Immediate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Draft<T> {
    value: T,
    policy: CommitPolicy,
    dirty: bool,
}

impl<T: Clone + PartialEq> Draft<T> {
    pub fn new(value: T, policy: CommitPolicy) -> Self {
        Self {
            value,
            policy,
            dirty: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// True when the draft holds an edit the store has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Change the draft. `Immediate` drafts hand back the value to commit.
    pub fn edit(&mut self, value: T) -> Option<T> {
        self.value = value;
        if self.policy == CommitPolicy::Immediate {
            self.dirty = false;
            Some(self.value.clone())
        } else {
            self.dirty = true;
            None
        }
    }

    pub fn release(&mut self) -> Option<T> {
        self.take_if(CommitPolicy::OnRelease)
    }

    pub fn blur(&mut self) -> Option<T> {
        self.take_if(CommitPolicy::OnBlurOrConfirm)
    }

    pub fn confirm(&mut self) -> Option<T> {
        self.take_if(CommitPolicy::OnBlurOrConfirm)
    }

    /// Overwrite the draft with a value committed elsewhere.
    pub fn sync(&mut self, committed: &T) {
        self.value = committed.clone();
        self.dirty = false;
    }

    fn take_if(&mut self, policy: CommitPolicy) -> Option<T> {
        if self.policy == policy && self.dirty {
            self.dirty = false;
            Some(self.value.clone())
        } else {
            None
        }
    }
}

/// Bounds and step of a slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const GAIN: SliderRange = SliderRange {
        min: 0.0,
        max: 3.0,
        step: 0.1,
    };

    pub const ROOM: SliderRange = SliderRange {
        min: 0.0,
        max: 1.0,
        step: 0.05,
    };

    /// Clamp into range and snap to the nearest step from `min`.
    ///
    /// Non-finite input lands on `min`.
    pub fn snap(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return self.min;
        }
        let steps = ((v - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // trim float noise such as 0.30000000000000004
        let snapped = (snapped * 1e9).round() / 1e9;
        snapped.clamp(self.min, self.max)
    }

    /// Move `steps` steps from `v`.
    pub fn nudge(&self, v: f64, steps: i32) -> f64 {
        self.snap(v + self.step * steps as f64)
    }

    /// Position of `v` within the range as a fraction.
    pub fn fraction(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !v.is_finite() {
            return 0.0;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_draft_waits_for_release() {
        let mut d = Draft::new(1.2, CommitPolicy::OnRelease);
        assert_eq!(d.edit(1.5), None);
        assert_eq!(d.edit(1.7), None);
        assert_eq!(d.blur(), None);
        assert_eq!(d.confirm(), None);
        assert_eq!(d.release(), Some(1.7));
        assert_eq!(d.release(), None);
    }

    #[test]
    fn text_draft_commits_on_blur_or_confirm() {
        let mut d = Draft::new(String::from("120/60/4"), CommitPolicy::OnBlurOrConfirm);
        d.edit("90/60/4".into());
        assert_eq!(d.release(), None);
        assert_eq!(d.confirm().as_deref(), Some("90/60/4"));
        d.edit("100/60/4".into());
        assert_eq!(d.blur().as_deref(), Some("100/60/4"));
        assert_eq!(d.blur(), None);
    }

    #[test]
    fn immediate_draft_commits_every_edit() {
        let mut d = Draft::new(false, CommitPolicy::Immediate);
        assert_eq!(d.edit(true), Some(true));
        assert!(!d.is_dirty());
        assert_eq!(d.release(), None);
    }

    #[test]
    fn sync_discards_pending_edit() {
        let mut d = Draft::new(0.2, CommitPolicy::OnRelease);
        d.edit(0.9);
        d.sync(&0.4);
        assert_eq!(*d.value(), 0.4);
        assert_eq!(d.release(), None);
    }

    #[test]
    fn slider_snaps_and_clamps() {
        let r = SliderRange::GAIN;
        assert_eq!(r.snap(1.23), 1.2);
        assert_eq!(r.snap(-1.0), 0.0);
        assert_eq!(r.snap(9.0), 3.0);
        assert_eq!(r.snap(f64::NAN), 0.0);
        assert_eq!(r.nudge(0.2, 1), 0.3);
        assert_eq!(SliderRange::ROOM.nudge(0.2, 1), 0.25);
        assert_eq!(SliderRange::ROOM.fraction(0.5), 0.5);
    }
}
