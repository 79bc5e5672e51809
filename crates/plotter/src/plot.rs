//! Per-entry figure rendering: one PNG per compared variable.

use compare_engine::{DiffEntry, DiffStats, VarKey};
use ndarray::{ArrayD, Axis};
use tracing::warn;

use crate::canvas::Canvas;
use crate::error::{PlotError, Result};
use crate::glyphs;
use crate::gradient::{self, Color, Colormap};
use crate::png;

/// Pixel size of one panel cell.
pub const PANEL_WIDTH: usize = 320;
pub const PANEL_HEIGHT: usize = 240;

const MARGIN: usize = 12;
const PANEL_GAP: usize = 12;
const HISTOGRAM_BINS: usize = 40;

/// Which panels each figure carries.
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    /// Render the gold and compare arrays too, not just the difference.
    pub plot_original_data: bool,
    /// Append a histogram of the difference values.
    pub include_histogram: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            plot_original_data: true,
            include_histogram: false,
        }
    }
}

/// File name for one entry's figure.
pub fn plot_filename(key: &VarKey) -> String {
    format!("{}_{}.png", key.file, key.variable)
}

/// Render one entry as a horizontal strip of panels, encoded as PNG bytes.
///
/// Panel order is gold, compare, difference, histogram, with the outer two
/// pairs controlled by [`PlotOptions`]. Input panels share the spectral
/// scale; the difference panel gets the diverging scale so sign survives.
pub fn render_entry(entry: &DiffEntry, options: PlotOptions) -> Result<Vec<u8>> {
    let mut panels = Vec::new();

    if options.plot_original_data {
        panels.push(render_array_panel(
            &entry.key,
            &entry.gold,
            Colormap::Spectral,
        )?);
        panels.push(render_array_panel(
            &entry.key,
            &entry.compare,
            Colormap::Spectral,
        )?);
    }
    panels.push(render_array_panel(
        &entry.key,
        &entry.difference,
        Colormap::Diverging,
    )?);
    if options.include_histogram {
        panels.push(render_histogram_panel(&entry.difference, &entry.stats));
    }

    let width = 2 * MARGIN + panels.len() * PANEL_WIDTH + (panels.len() - 1) * PANEL_GAP;
    let height = 2 * MARGIN + PANEL_HEIGHT;
    let mut figure = Canvas::new(width, height, Color::new(255, 255, 255, 255));

    for (i, panel) in panels.iter().enumerate() {
        figure.blit(panel, MARGIN + i * (PANEL_WIDTH + PANEL_GAP), MARGIN);
    }

    png::create_png(figure.pixels(), width, height)
}

/// One data panel. Rank decides the plot form: polyline for 1D, heatmap for
/// 2D. 3D is treated as (time, y, x) and averaged over the leading axis
/// before heatmap rendering; anything else has no plot form.
fn render_array_panel(key: &VarKey, values: &ArrayD<f64>, map: Colormap) -> Result<Canvas> {
    match values.ndim() {
        1 => Ok(render_line_panel(values)),
        2 => Ok(render_heatmap_panel(values, map)),
        3 => {
            warn!(
                key = %key,
                shape = ?values.shape(),
                "averaging 3D array over its leading axis for plotting"
            );
            match values.mean_axis(Axis(0)) {
                Some(averaged) => Ok(render_heatmap_panel(&averaged, map)),
                None => Ok(blank_panel()),
            }
        }
        rank => Err(PlotError::UnsupportedRank {
            key: key.clone(),
            rank,
        }),
    }
}

fn blank_panel() -> Canvas {
    Canvas::new(PANEL_WIDTH, PANEL_HEIGHT, Color::new(255, 255, 255, 255))
}

fn render_heatmap_panel(values: &ArrayD<f64>, map: Colormap) -> Canvas {
    let (src_h, src_w) = (values.shape()[0], values.shape()[1]);
    let mut canvas = blank_panel();
    if src_h == 0 || src_w == 0 {
        return canvas;
    }

    // iter() walks logical row-major order regardless of layout
    let data: Vec<f64> = values.iter().copied().collect();
    let resampled = gradient::resample_grid(&data, src_w, src_h, PANEL_WIDTH, PANEL_HEIGHT);

    let (min_val, max_val) = match gradient::finite_range(&resampled) {
        Some(range) => range,
        None => return canvas,
    };
    let pixels = gradient::render_grid(
        &resampled,
        PANEL_WIDTH,
        PANEL_HEIGHT,
        min_val,
        max_val,
        |t| map.color(t),
    );
    canvas.blit_pixels(&pixels, PANEL_WIDTH, PANEL_HEIGHT, 0, 0);
    canvas
}

fn render_line_panel(values: &ArrayD<f64>) -> Canvas {
    let mut canvas = blank_panel();
    let data: Vec<f64> = values.iter().copied().collect();
    let Some((min_val, max_val)) = gradient::finite_range(&data) else {
        return canvas;
    };
    let range = max_val - min_val;
    let range = if range > 0.0 { range } else { 1.0 };

    let inset = 8.0;
    let plot_w = PANEL_WIDTH as f64 - 2.0 * inset;
    let plot_h = PANEL_HEIGHT as f64 - 2.0 * inset;
    let step = if data.len() > 1 {
        plot_w / (data.len() - 1) as f64
    } else {
        0.0
    };

    let line = Color::new(40, 60, 150, 255);
    let mut prev: Option<(f64, f64)> = None;
    for (i, &v) in data.iter().enumerate() {
        // NaN (and inf, which has no pixel position) breaks the polyline
        if !v.is_finite() {
            prev = None;
            continue;
        }
        let x = inset + i as f64 * step;
        let y = inset + (1.0 - (v - min_val) / range) * plot_h;
        match prev {
            Some((px, py)) => canvas.draw_line(px, py, x, y, line),
            None => canvas.set_pixel(x.round() as i64, y.round() as i64, line),
        }
        prev = Some((x, y));
    }
    canvas
}

/// Histogram of the finite difference values over equal-width bins,
/// annotated with min, mean, and max in scientific notation.
fn render_histogram_panel(difference: &ArrayD<f64>, stats: &DiffStats) -> Canvas {
    let mut canvas = blank_panel();
    let annotation = Color::new(60, 60, 60, 255);
    let size = 11.0;
    let line_gap = size * 1.5;

    for (i, value) in [stats.min, stats.mean, stats.max].iter().enumerate() {
        glyphs::draw_text(
            &mut canvas,
            10.0,
            8.0 + i as f64 * line_gap,
            size,
            &format_scientific(*value),
            annotation,
        );
    }

    let finite: Vec<f64> = difference
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let Some((min_val, max_val)) = gradient::finite_range(&finite) else {
        return canvas;
    };
    let range = max_val - min_val;
    let range = if range > 0.0 { range } else { 1.0 };

    let mut bins = [0usize; HISTOGRAM_BINS];
    for &v in &finite {
        let idx = (((v - min_val) / range) * HISTOGRAM_BINS as f64) as usize;
        bins[idx.min(HISTOGRAM_BINS - 1)] += 1;
    }
    let peak = bins.iter().copied().max().unwrap_or(0).max(1);

    let chart_top = 8.0 + 3.0 * line_gap + 8.0;
    let chart_bottom = PANEL_HEIGHT as f64 - 12.0;
    let chart_left = 10.0;
    let chart_right = PANEL_WIDTH as f64 - 10.0;
    let chart_h = chart_bottom - chart_top;
    let bar_w = (chart_right - chart_left) / HISTOGRAM_BINS as f64;

    let bar = Color::new(70, 100, 180, 255);
    for (i, &count) in bins.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let h = (count as f64 / peak as f64) * chart_h;
        canvas.fill_rect(
            (chart_left + i as f64 * bar_w).round() as i64,
            (chart_bottom - h).round() as i64,
            (bar_w - 1.0).max(1.0) as usize,
            h.ceil() as usize,
            bar,
        );
    }

    canvas.draw_line(chart_left, chart_bottom, chart_right, chart_bottom, annotation);
    canvas
}

/// Fixed-width scientific notation, e.g. -3.333e-1.
fn format_scientific(value: f64) -> String {
    format!("{:.3e}", value)
}
