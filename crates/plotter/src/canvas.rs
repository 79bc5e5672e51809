//! A plain RGBA pixel buffer with the few drawing ops the figures need.

use crate::gradient::Color;

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[background.r, background.g, background.b, background.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Out-of-bounds writes are dropped, so callers can draw unclipped.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: usize, h: usize, color: Color) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Straight 1px line, stepped densely enough to leave no gaps.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.set_pixel(
                (x0 + dx * t).round() as i64,
                (y0 + dy * t).round() as i64,
                color,
            );
        }
    }

    /// Paste raw RGBA rows produced elsewhere, alpha included, clipped to
    /// the canvas. Transparent source pixels stay transparent holes.
    pub fn blit_pixels(&mut self, pixels: &[u8], w: usize, h: usize, at_x: usize, at_y: usize) {
        for y in 0..h {
            if at_y + y >= self.height {
                break;
            }
            for x in 0..w {
                if at_x + x >= self.width {
                    break;
                }
                let src = (y * w + x) * 4;
                let dst = ((at_y + y) * self.width + (at_x + x)) * 4;
                self.pixels[dst..dst + 4].copy_from_slice(&pixels[src..src + 4]);
            }
        }
    }

    pub fn blit(&mut self, other: &Canvas, at_x: usize, at_y: usize) {
        self.blit_pixels(&other.pixels, other.width, other.height, at_x, at_y);
    }
}
