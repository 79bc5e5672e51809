//! Color maps, normalization, and pixel-level heatmap rendering.

use rayon::prelude::*;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// Which color scale a panel uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Blue -> cyan -> green -> yellow -> red, for the gold/compare panels.
    Spectral,
    /// Blue -> white -> red centered on the midpoint, for difference panels.
    Diverging,
}

impl Colormap {
    /// Color for a normalized value in [0, 1].
    pub fn color(&self, normalized: f64) -> Color {
        match self {
            Colormap::Spectral => spectral_color(normalized),
            Colormap::Diverging => diverging_color(normalized),
        }
    }
}

fn spectral_color(t: f64) -> Color {
    match t {
        t if t < 0.25 => interpolate_color(
            Color::new(0, 0, 255, 255),
            Color::new(0, 255, 255, 255),
            t / 0.25,
        ),
        t if t < 0.5 => interpolate_color(
            Color::new(0, 255, 255, 255),
            Color::new(0, 255, 0, 255),
            (t - 0.25) / 0.25,
        ),
        t if t < 0.75 => interpolate_color(
            Color::new(0, 255, 0, 255),
            Color::new(255, 255, 0, 255),
            (t - 0.5) / 0.25,
        ),
        t => interpolate_color(
            Color::new(255, 255, 0, 255),
            Color::new(255, 0, 0, 255),
            (t - 0.75) / 0.25,
        ),
    }
}

fn diverging_color(t: f64) -> Color {
    if t < 0.5 {
        interpolate_color(
            Color::new(0, 0, 255, 255),
            Color::new(255, 255, 255, 255),
            t / 0.5,
        )
    } else {
        interpolate_color(
            Color::new(255, 255, 255, 255),
            Color::new(255, 0, 0, 255),
            (t - 0.5) / 0.5,
        )
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f64 * t_inv) + (color2.r as f64 * t)) as u8,
        ((color1.g as f64 * t_inv) + (color2.g as f64 * t)) as u8,
        ((color1.b as f64 * t_inv) + (color2.b as f64 * t)) as u8,
        ((color1.a as f64 * t_inv) + (color2.a as f64 * t)) as u8,
    )
}

/// The [min, max] over the finite values of `data`, or None if it has none.
///
/// Normalization ranges come from finite values only; NaN cells render
/// transparent and infinities clamp to the ends of the scale.
pub fn finite_range(data: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for &v in data {
        if v.is_finite() {
            any = true;
            min = min.min(v);
            max = max.max(v);
        }
    }
    any.then_some((min, max))
}

/// Render grid data as colored RGBA pixels, one pixel per cell.
///
/// Values are normalized over [min_val, max_val]; a flat or degenerate
/// range falls back to 1.0 so normalization never divides by zero. NaN
/// cells come out fully transparent.
///
/// # Arguments
/// - `data`: 2D grid of values (row-major order), `width * height` long
/// - `min_val` / `max_val`: normalization range
/// - `color_fn`: maps a normalized value (0-1) to a color
pub fn render_grid<F>(
    data: &[f64],
    width: usize,
    height: usize,
    min_val: f64,
    max_val: f64,
    color_fn: F,
) -> Vec<u8>
where
    F: Fn(f64) -> Color + Sync,
{
    let mut pixels = vec![0u8; width * height * 4];

    let range = max_val - min_val;
    let range = if range.is_finite() && range > 0.0 {
        range
    } else {
        1.0
    };

    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let value = data[y * width + x];
                let color = if value.is_nan() {
                    Color::transparent()
                } else {
                    let normalized = ((value - min_val) / range).clamp(0.0, 1.0);
                    color_fn(normalized)
                };

                let px = x * 4;
                row[px] = color.r;
                row[px + 1] = color.g;
                row[px + 2] = color.b;
                row[px + 3] = color.a;
            }
        });

    pixels
}

/// Resample grid data to a different resolution using bilinear interpolation.
///
/// A destination sample whose four source corners include a NaN stays NaN,
/// so missing-data holes keep hard edges instead of bleeding into neighbors.
pub fn resample_grid(
    data: &[f64],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Vec<f64> {
    if src_width == dst_width && src_height == dst_height {
        return data.to_vec();
    }

    let mut output = vec![0.0f64; dst_width * dst_height];

    let x_ratio = if dst_width > 1 {
        (src_width - 1) as f64 / (dst_width - 1) as f64
    } else {
        0.0
    };
    let y_ratio = if dst_height > 1 {
        (src_height - 1) as f64 / (dst_height - 1) as f64
    } else {
        0.0
    };

    for y in 0..dst_height {
        for x in 0..dst_width {
            let src_x = x as f64 * x_ratio;
            let src_y = y as f64 * y_ratio;

            let x1 = src_x.floor() as usize;
            let y1 = src_y.floor() as usize;
            let x2 = (x1 + 1).min(src_width - 1);
            let y2 = (y1 + 1).min(src_height - 1);

            let dx = src_x - x1 as f64;
            let dy = src_y - y1 as f64;

            let v11 = data[y1 * src_width + x1];
            let v21 = data[y1 * src_width + x2];
            let v12 = data[y2 * src_width + x1];
            let v22 = data[y2 * src_width + x2];

            let value = if v11.is_nan() || v21.is_nan() || v12.is_nan() || v22.is_nan() {
                f64::NAN
            } else {
                let v1 = v11 * (1.0 - dx) + v21 * dx;
                let v2 = v12 * (1.0 - dx) + v22 * dx;
                v1 * (1.0 - dy) + v2 * dy
            };

            output[y * dst_width + x] = value;
        }
    }

    output
}
