//! src/control/store.rs
//!
//! The committed control settings. Widgets write patches here; everything
//! else reads the latest committed values.

use log::debug;

use super::cell::{GainCell, GainReader};
use crate::graph::config::DEFAULT_GAIN;

/// Selectable synth presets: (value, label).
pub const SYNTHS: [(&str, &str); 2] = [("gm_piano:0", "GM Piano"), ("gm_piano:4", "GM E.Piano")];

pub const DEFAULT_ROOM: f64 = 0.2;
pub const DEFAULT_TEMPO: &str = "120/60/4";

/// Every committed setting except gain, which lives in its atomic cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub p1_hushed: bool,
    pub tempo: String,
    pub room: f64,
    pub drums_muted: bool,
    pub synth: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            p1_hushed: false,
            tempo: DEFAULT_TEMPO.to_string(),
            room: DEFAULT_ROOM,
            drums_muted: false,
            synth: SYNTHS[0].0.to_string(),
        }
    }
}

/// Partial update; `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlPatch {
    pub gain: Option<f64>,
    pub p1_hushed: Option<bool>,
    pub tempo: Option<String>,
    pub room: Option<f64>,
    pub drums_muted: Option<bool>,
    pub synth: Option<String>,
}

#[derive(Debug)]
pub struct ControlStore {
    gain: GainCell,
    settings: Settings,
    revision: u64,
}

impl ControlStore {
    pub fn new(gain: f64) -> Self {
        Self {
            gain: GainCell::new(gain),
            settings: Settings::default(),
            revision: 0,
        }
    }

    pub fn gain(&self) -> f64 {
        self.gain.get()
    }

    /// Handle the chart and sampler read from.
    pub fn gain_reader(&self) -> GainReader {
        self.gain.reader()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Bumped once per `set` that changed anything.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a patch. Returns true when any value changed.
    pub fn set(&mut self, patch: ControlPatch) -> bool {
        let mut changed = false;
        if let Some(gain) = patch.gain {
            // NaN != NaN, so compare bit patterns
            if gain.to_bits() != self.gain.get().to_bits() {
                self.gain.set(gain);
                changed = true;
            }
        }
        let s = &mut self.settings;
        changed |= replace(&mut s.p1_hushed, patch.p1_hushed);
        changed |= replace(&mut s.tempo, patch.tempo);
        changed |= replace(&mut s.room, patch.room);
        changed |= replace(&mut s.drums_muted, patch.drums_muted);
        changed |= replace(&mut s.synth, patch.synth);
        if changed {
            self.revision += 1;
            debug!(
                "controls r{}: gain={} {:?}",
                self.revision,
                self.gain.get(),
                self.settings
            );
        }
        changed
    }
}

impl Default for ControlStore {
    fn default() -> Self {
        Self::new(DEFAULT_GAIN)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) if *slot != v => {
            *slot = v;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let store = ControlStore::default();
        assert_eq!(store.gain(), 1.2);
        assert_eq!(store.settings().room, 0.2);
        assert_eq!(store.settings().tempo, "120/60/4");
        assert_eq!(store.settings().synth, "gm_piano:0");
        assert!(!store.settings().drums_muted);
        assert!(!store.settings().p1_hushed);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut store = ControlStore::default();
        let reader = store.gain_reader();
        assert!(store.set(ControlPatch {
            gain: Some(2.0),
            drums_muted: Some(true),
            ..Default::default()
        }));
        assert_eq!(reader.get(), 2.0);
        assert!(store.settings().drums_muted);
        assert_eq!(store.settings().room, 0.2);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn unchanged_patch_keeps_revision() {
        let mut store = ControlStore::default();
        assert!(!store.set(ControlPatch {
            gain: Some(1.2),
            tempo: Some("120/60/4".into()),
            ..Default::default()
        }));
        assert!(!store.set(ControlPatch::default()));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn non_finite_gain_is_stored_as_is() {
        let mut store = ControlStore::default();
        assert!(store.set(ControlPatch {
            gain: Some(f64::NAN),
            ..Default::default()
        }));
        assert!(store.gain().is_nan());
        assert!(!store.set(ControlPatch {
            gain: Some(f64::NAN),
            ..Default::default()
        }));
    }
}
