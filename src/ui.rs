//! src/ui.rs
//!
//! Layout tree and the panel trait.

pub mod node;

pub use node::{Node, Panel, columns, leaf, rows};
