//! Minimal built-in segment font for numeric annotations.
//!
//! Covers exactly what scientific notation needs: digits, sign, decimal
//! point, and the exponent marker. Unknown characters render as blank
//! cells, so the charset never has to grow for layout reasons.

use crate::canvas::Canvas;
use crate::gradient::Color;

type Segment = ((f64, f64), (f64, f64));

/// Stroke segments for one character, in a cell centered on the origin
/// spanning [-half_w, half_w] x [-half_h, half_h], y growing downward.
fn char_segments(ch: char, half_w: f64, half_h: f64) -> Vec<Segment> {
    match ch {
        '0' => vec![
            ((-half_w, -half_h), (half_w, -half_h)),
            ((half_w, -half_h), (half_w, half_h)),
            ((half_w, half_h), (-half_w, half_h)),
            ((-half_w, half_h), (-half_w, -half_h)),
        ],
        '1' => vec![((0.0, -half_h), (0.0, half_h))],
        '2' => vec![
            ((-half_w, -half_h), (half_w, -half_h)),
            ((half_w, -half_h), (half_w, 0.0)),
            ((half_w, 0.0), (-half_w, 0.0)),
            ((-half_w, 0.0), (-half_w, half_h)),
            ((-half_w, half_h), (half_w, half_h)),
        ],
        '3' => vec![
            ((-half_w, -half_h), (half_w, -half_h)),
            ((half_w, -half_h), (half_w, half_h)),
            ((half_w, half_h), (-half_w, half_h)),
            ((-half_w, 0.0), (half_w, 0.0)),
        ],
        '4' => vec![
            ((-half_w, -half_h), (-half_w, 0.0)),
            ((-half_w, 0.0), (half_w, 0.0)),
            ((half_w, -half_h), (half_w, half_h)),
        ],
        '5' => vec![
            ((half_w, -half_h), (-half_w, -half_h)),
            ((-half_w, -half_h), (-half_w, 0.0)),
            ((-half_w, 0.0), (half_w, 0.0)),
            ((half_w, 0.0), (half_w, half_h)),
            ((half_w, half_h), (-half_w, half_h)),
        ],
        '6' => vec![
            ((half_w, -half_h), (-half_w, -half_h)),
            ((-half_w, -half_h), (-half_w, half_h)),
            ((-half_w, half_h), (half_w, half_h)),
            ((half_w, half_h), (half_w, 0.0)),
            ((half_w, 0.0), (-half_w, 0.0)),
        ],
        '7' => vec![
            ((-half_w, -half_h), (half_w, -half_h)),
            ((half_w, -half_h), (0.0, half_h)),
        ],
        '8' => vec![
            ((-half_w, -half_h), (half_w, -half_h)),
            ((half_w, -half_h), (half_w, half_h)),
            ((half_w, half_h), (-half_w, half_h)),
            ((-half_w, half_h), (-half_w, -half_h)),
            ((-half_w, 0.0), (half_w, 0.0)),
        ],
        '9' => vec![
            ((-half_w, 0.0), (half_w, 0.0)),
            ((half_w, 0.0), (half_w, -half_h)),
            ((half_w, -half_h), (-half_w, -half_h)),
            ((-half_w, -half_h), (-half_w, 0.0)),
            ((half_w, 0.0), (half_w, half_h)),
        ],
        '-' => vec![((-half_w, 0.0), (half_w, 0.0))],
        '+' => vec![
            ((-half_w * 0.7, 0.0), (half_w * 0.7, 0.0)),
            ((0.0, -half_h * 0.5), (0.0, half_h * 0.5)),
        ],
        '.' => vec![((0.0, half_h * 0.7), (0.0, half_h))],
        // exponent marker, drawn as a block E for legibility at small sizes
        'e' | 'E' => vec![
            ((half_w, -half_h), (-half_w, -half_h)),
            ((-half_w, -half_h), (-half_w, half_h)),
            ((-half_w, half_h), (half_w, half_h)),
            ((-half_w, 0.0), (half_w * 0.6, 0.0)),
        ],
        _ => vec![],
    }
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(canvas: &mut Canvas, x: f64, y: f64, size: f64, text: &str, color: Color) {
    let char_width = size * 0.6;
    let char_height = size;
    let char_spacing = size * 0.25;

    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as f64 * (char_width + char_spacing) + char_width / 2.0;
        let cy = y + char_height / 2.0;
        for ((x1, y1), (x2, y2)) in char_segments(ch, char_width / 2.0, char_height / 2.0) {
            canvas.draw_line(cx + x1, cy + y1, cx + x2, cy + y2, color);
        }
    }
}

/// Width in pixels `draw_text` will cover for this string.
pub fn text_width(size: f64, text: &str) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let char_width = size * 0.6;
    let char_spacing = size * 0.25;
    chars as f64 * (char_width + char_spacing) - char_spacing
}
