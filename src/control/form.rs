//! src/control/form.rs
//!
//! Keyboard-driven control form: one draft per setting, a focused field, and
//! the glue that turns draft commits into store patches.

use super::draft::{CommitPolicy, Draft, SliderRange};
use super::store::{ControlPatch, ControlStore, SYNTHS, Settings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Hush,
    Tempo,
    Room,
    Gain,
    Drums,
    Synth,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Hush,
        Field::Tempo,
        Field::Room,
        Field::Gain,
        Field::Drums,
        Field::Synth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Hush => "Hush",
            Field::Tempo => "Tempo expr (setcps)",
            Field::Room => "Room",
            Field::Gain => "Gain",
            Field::Drums => "Mute drums",
            Field::Synth => "Synth",
        }
    }
}

/// Last committed values the drafts were synced from.
#[derive(Clone, Debug, PartialEq)]
struct Seen {
    revision: u64,
    gain: u64,
    settings: Settings,
}

#[derive(Debug)]
pub struct ControlsForm {
    pub hush: Draft<bool>,
    pub tempo: Draft<String>,
    pub room: Draft<f64>,
    pub gain: Draft<f64>,
    pub drums: Draft<bool>,
    pub synth: Draft<String>,
    focus: usize,
    seen: Seen,
}

impl ControlsForm {
    pub fn new(store: &ControlStore) -> Self {
        let s = store.settings();
        Self {
            hush: Draft::new(s.p1_hushed, CommitPolicy::Immediate),
            tempo: Draft::new(s.tempo.clone(), CommitPolicy::OnBlurOrConfirm),
            room: Draft::new(s.room, CommitPolicy::OnRelease),
            gain: Draft::new(store.gain(), CommitPolicy::OnRelease),
            drums: Draft::new(s.drums_muted, CommitPolicy::Immediate),
            synth: Draft::new(s.synth.clone(), CommitPolicy::Immediate),
            focus: 0,
            seen: Seen {
                revision: store.revision(),
                gain: store.gain().to_bits(),
                settings: s.clone(),
            },
        }
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    /// Pull values committed elsewhere into the drafts of the fields that changed.
    pub fn sync(&mut self, store: &ControlStore) {
        if store.revision() == self.seen.revision {
            return;
        }
        self.seen.revision = store.revision();
        let gain = store.gain();
        if gain.to_bits() != self.seen.gain {
            self.gain.sync(&gain);
            self.seen.gain = gain.to_bits();
        }
        let s = store.settings();
        let seen = &self.seen.settings;
        if s.p1_hushed != seen.p1_hushed {
            self.hush.sync(&s.p1_hushed);
        }
        if s.tempo != seen.tempo {
            self.tempo.sync(&s.tempo);
        }
        if s.room != seen.room {
            self.room.sync(&s.room);
        }
        if s.drums_muted != seen.drums_muted {
            self.drums.sync(&s.drums_muted);
        }
        if s.synth != seen.synth {
            self.synth.sync(&s.synth);
        }
        self.seen.settings = s.clone();
    }

    pub fn focus_next(&mut self, store: &mut ControlStore) {
        self.leave(store);
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self, store: &mut ControlStore) {
        self.leave(store);
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Focus leaving a field blurs text and lets go of a held slider.
    fn leave(&mut self, store: &mut ControlStore) {
        let patch = match self.focused() {
            Field::Tempo => ControlPatch {
                tempo: self.tempo.blur(),
                ..Default::default()
            },
            Field::Room => ControlPatch {
                room: self.room.release(),
                ..Default::default()
            },
            Field::Gain => ControlPatch {
                gain: self.gain.release(),
                ..Default::default()
            },
            _ => return,
        };
        self.commit(store, patch);
    }

    /// Left/Right on the focused field.
    pub fn nudge(&mut self, steps: i32, store: &mut ControlStore) {
        let patch = match self.focused() {
            Field::Hush => ControlPatch {
                p1_hushed: self.hush.edit(!*self.hush.value()),
                ..Default::default()
            },
            Field::Room => {
                let v = SliderRange::ROOM.nudge(*self.room.value(), steps);
                self.room.edit(v);
                return;
            }
            Field::Gain => {
                let v = SliderRange::GAIN.nudge(*self.gain.value(), steps);
                self.gain.edit(v);
                return;
            }
            Field::Synth => {
                let idx = SYNTHS
                    .iter()
                    .position(|(value, _)| *value == self.synth.value().as_str())
                    .unwrap_or(0);
                let len = SYNTHS.len() as i32;
                let next = (idx as i32 + steps).rem_euclid(len) as usize;
                ControlPatch {
                    synth: self.synth.edit(SYNTHS[next].0.to_string()),
                    ..Default::default()
                }
            }
            Field::Tempo | Field::Drums => return,
        };
        self.commit(store, patch);
    }

    /// Space: toggle checkbox/radio, release a slider.
    pub fn toggle(&mut self, store: &mut ControlStore) {
        let patch = match self.focused() {
            Field::Drums => ControlPatch {
                drums_muted: self.drums.edit(!*self.drums.value()),
                ..Default::default()
            },
            Field::Hush => ControlPatch {
                p1_hushed: self.hush.edit(!*self.hush.value()),
                ..Default::default()
            },
            Field::Room => ControlPatch {
                room: self.room.release(),
                ..Default::default()
            },
            Field::Gain => ControlPatch {
                gain: self.gain.release(),
                ..Default::default()
            },
            Field::Tempo => {
                self.type_char(' ');
                return;
            }
            Field::Synth => return,
        };
        self.commit(store, patch);
    }

    /// Enter: confirm text, release a slider.
    pub fn confirm(&mut self, store: &mut ControlStore) {
        let patch = match self.focused() {
            Field::Tempo => ControlPatch {
                tempo: self.tempo.confirm(),
                ..Default::default()
            },
            Field::Room => ControlPatch {
                room: self.room.release(),
                ..Default::default()
            },
            Field::Gain => ControlPatch {
                gain: self.gain.release(),
                ..Default::default()
            },
            _ => return,
        };
        self.commit(store, patch);
    }

    pub fn type_char(&mut self, c: char) {
        if self.focused() == Field::Tempo {
            let mut text = self.tempo.value().clone();
            text.push(c);
            self.tempo.edit(text);
        }
    }

    pub fn backspace(&mut self) {
        if self.focused() == Field::Tempo {
            let mut text = self.tempo.value().clone();
            text.pop();
            self.tempo.edit(text);
        }
    }

    fn commit(&mut self, store: &mut ControlStore, patch: ControlPatch) {
        if patch != ControlPatch::default() {
            store.set(patch);
            self.sync(store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(form: &mut ControlsForm, store: &mut ControlStore, field: Field) {
        while form.focused() != field {
            form.focus_next(store);
        }
    }

    #[test]
    fn gain_slider_commits_only_on_release() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        focus(&mut form, &mut store, Field::Gain);
        form.nudge(3, &mut store);
        assert_eq!(*form.gain.value(), 1.5);
        assert_eq!(store.gain(), 1.2);
        form.confirm(&mut store);
        assert_eq!(store.gain(), 1.5);
    }

    #[test]
    fn leaving_slider_releases_it() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        focus(&mut form, &mut store, Field::Room);
        form.nudge(-1, &mut store);
        form.focus_next(&mut store);
        assert_eq!(store.settings().room, 0.15);
    }

    #[test]
    fn tempo_commits_on_enter_or_blur() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        focus(&mut form, &mut store, Field::Tempo);
        form.backspace();
        form.type_char('8');
        assert_eq!(store.settings().tempo, "120/60/4");
        form.confirm(&mut store);
        assert_eq!(store.settings().tempo, "120/60/8");
        form.backspace();
        form.focus_prev(&mut store);
        assert_eq!(store.settings().tempo, "120/60/");
    }

    #[test]
    fn checkbox_radio_and_select_commit_immediately() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        form.toggle(&mut store);
        assert!(store.settings().p1_hushed);
        focus(&mut form, &mut store, Field::Drums);
        form.toggle(&mut store);
        assert!(store.settings().drums_muted);
        focus(&mut form, &mut store, Field::Synth);
        form.nudge(1, &mut store);
        assert_eq!(store.settings().synth, "gm_piano:4");
        form.nudge(1, &mut store);
        assert_eq!(store.settings().synth, "gm_piano:0");
    }

    #[test]
    fn outside_commit_overrides_only_changed_field() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        focus(&mut form, &mut store, Field::Room);
        form.nudge(2, &mut store);
        store.set(ControlPatch {
            gain: Some(2.5),
            ..Default::default()
        });
        form.sync(&store);
        assert_eq!(*form.gain.value(), 2.5);
        assert_eq!(*form.room.value(), 0.3);
        assert!(form.room.is_dirty());
    }

    #[test]
    fn sync_is_a_no_op_until_the_store_changes() {
        let mut store = ControlStore::default();
        let mut form = ControlsForm::new(&store);
        focus(&mut form, &mut store, Field::Gain);
        form.nudge(1, &mut store);
        let revision = store.revision();
        form.sync(&store);
        form.sync(&store);
        assert_eq!(store.revision(), revision);
        assert!(form.gain.is_dirty());
        assert_eq!(*form.gain.value(), 1.3);

        store.set(ControlPatch {
            gain: Some(0.5),
            ..Default::default()
        });
        form.sync(&store);
        assert_eq!(*form.gain.value(), 0.5);
        assert!(!form.gain.is_dirty());
    }
}
