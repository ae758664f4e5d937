//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`.

mod app;
mod cli;
mod control;
mod graph;
mod panels;
mod sampler;
mod ui;

fn main() -> color_eyre::Result<()> {
    app::run()
}
