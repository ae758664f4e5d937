//! src/control.rs
//!
//! Shared control settings, the atomic gain cell the chart reads, and the
//! draft/commit editing layer the controls panel drives.

pub mod cell;
pub mod draft;
pub mod form;
pub mod store;
pub mod wander;

pub use cell::GainReader;
pub use draft::{Draft, SliderRange};
pub use form::{ControlsForm, Field};
pub use store::ControlStore;
pub use wander::Wander;
