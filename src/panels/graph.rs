//! src/panels/graph.rs
//!
//! Gain panel: paints the strip chart's current frame into terminal cells.
//!
//! The logical canvas (default 520×180 with margins) is stretched over the
//! panel's inner area. Bars are filled columns whose tops use eighth blocks,
//! the value axis carries tick labels in the left margin, and the index axis
//! is a bare baseline with tick marks.

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Widget},
};

use crate::graph::chart::{ChartFrame, StripChart};
use crate::graph::config::ChartConfig;

/// Bar fill colour (#26c281).
pub const BAR_COLOR: Color = Color::Rgb(0x26, 0xc2, 0x81);

pub struct GraphPanel<'a> {
    chart: &'a StripChart,
    now: Instant,
}

impl<'a> GraphPanel<'a> {
    pub fn new(chart: &'a StripChart, now: Instant) -> Self {
        Self { chart, now }
    }
}

impl crate::ui::Panel for GraphPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let buffer = self.chart.buffer();
        let title = format!("Gain ({}/{})", buffer.len(), buffer.capacity());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);
        let widget = StripWidget::new(self.chart.frame(self.now), self.chart.config());
        f.render_widget(widget, inner);
    }
}

/// One chart frame mapped onto a cell grid.
pub struct StripWidget<'a> {
    frame: ChartFrame,
    config: &'a ChartConfig,
    bar_style: Style,
    axis_style: Style,
    label_style: Style,
}

impl<'a> StripWidget<'a> {
    pub fn new(frame: ChartFrame, config: &'a ChartConfig) -> Self {
        Self {
            frame,
            config,
            bar_style: Style::default().fg(BAR_COLOR),
            axis_style: Style::default().fg(Color::DarkGray),
            label_style: Style::default().fg(Color::Gray),
        }
    }
}

fn eighth_symbol(n: u32) -> &'static str {
    let set = symbols::bar::NINE_LEVELS;
    match n {
        0 => set.empty,
        1 => set.one_eighth,
        2 => set.one_quarter,
        3 => set.three_eighths,
        4 => set.half,
        5 => set.five_eighths,
        6 => set.three_quarters,
        7 => set.seven_eighths,
        _ => set.full,
    }
}

/// Write `symbol` at (x, y) if that cell lies inside `area`.
fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    let inside = x >= area.left() as i32
        && x < area.right() as i32
        && y >= area.top() as i32
        && y < area.bottom() as i32;
    if inside {
        if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

impl Widget for StripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cfg = self.config;
        if area.width == 0 || area.height == 0 || cfg.width <= 0.0 || cfg.height <= 0.0 {
            return;
        }
        let sx = area.width as f64 / cfg.width;
        let sy = area.height as f64 / cfg.height;
        let left = area.x as f64 + cfg.margins.left * sx;
        let top = area.y as f64 + cfg.margins.top * sy;
        let plot_left = left.round() as i32;
        let plot_right = (left + self.frame.plot_width * sx).round() as i32;
        let top_row = top.round() as i32;
        let base_row = (top + self.frame.plot_height * sy).round() as i32;
        let axis_col = plot_left - 1;

        // tallest bar per column, in eighths of a cell
        let cols = (plot_right - plot_left).max(0) as usize;
        let mut eighths = vec![0u32; cols];
        for bar in &self.frame.bars {
            let g = bar.geometry;
            if g.width <= 0.0 || g.height <= 0.0 {
                continue;
            }
            let start = (left + g.x * sx).round() as i32;
            let end = ((left + (g.x + g.width) * sx).round() as i32).max(start + 1);
            let level = (g.height * sy * 8.0).round() as u32;
            for c in start.max(plot_left)..end.min(plot_right) {
                let slot = &mut eighths[(c - plot_left) as usize];
                *slot = (*slot).max(level);
            }
        }
        let max_rows = (base_row - top_row).max(0) as u32;
        for (i, &level) in eighths.iter().enumerate() {
            let level = level.min(max_rows * 8);
            let x = plot_left + i as i32;
            let full = (level / 8) as i32;
            for k in 0..full {
                put(buf, area, x, base_row - 1 - k, symbols::bar::FULL, self.bar_style);
            }
            let rem = level % 8;
            if rem > 0 {
                put(buf, area, x, base_row - 1 - full, eighth_symbol(rem), self.bar_style);
            }
        }

        // value axis
        for y in top_row..base_row {
            put(buf, area, axis_col, y, symbols::line::VERTICAL, self.axis_style);
        }
        for &(value, y) in &self.frame.value_ticks {
            let row = (top + y * sy).round() as i32;
            if row < base_row {
                put(buf, area, axis_col, row, symbols::line::VERTICAL_LEFT, self.axis_style);
            }
            let label = format!("{:.*}", self.frame.tick_precision, value);
            let start = axis_col - label.chars().count() as i32;
            for (j, ch) in label.chars().enumerate() {
                let mut tmp = [0u8; 4];
                put(buf, area, start + j as i32, row, ch.encode_utf8(&mut tmp), self.label_style);
            }
        }

        // index axis: baseline and unlabeled ticks
        put(buf, area, axis_col, base_row, symbols::line::BOTTOM_LEFT, self.axis_style);
        for x in plot_left..plot_right {
            put(buf, area, x, base_row, symbols::line::HORIZONTAL, self.axis_style);
        }
        for &x in &self.frame.index_ticks {
            let col = (left + x * sx).round() as i32;
            if col >= plot_left && col < plot_right {
                put(buf, area, col, base_row, symbols::line::HORIZONTAL_DOWN, self.axis_style);
            }
        }
    }
}
