//! src/graph.rs
//!
//! Strip-chart core: samples and their ring buffer, scales, keyed
//! reconciliation, tweening, and the chart that ties them together.

pub mod chart;
pub mod config;
pub mod data;
pub mod reconcile;
pub mod scale;
pub mod tween;

pub use chart::StripChart;
