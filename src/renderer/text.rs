//! Bitmap font label rendering for the pixel canvas.
//!
//! The progress label ("42%") is drawn with an 8×8 bitmap font scaled by the
//! circle's `text_size` and centred on the circle.

use crate::color::Rgb;
use crate::geometry::CircleSpec;

use super::Canvas;

const GLYPH: usize = 8;

/// Simple 8x8 bitmap font for the label.
/// Each character is represented as 8 bytes, one per row.
fn get_char_bitmap(ch: char) -> Option<[u8; 8]> {
    Some(match ch {
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        '%' => [0x62, 0x64, 0x08, 0x10, 0x26, 0x46, 0x00, 0x00],
        '/' => [0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        ' ' => [0x00; 8],
        _ => return None,
    })
}

/// Pixel width of `text` at `scale`, including inter-glyph spacing.
pub fn label_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    n * GLYPH * scale + (n - 1) * scale
}

/// Largest scale not above `text_size` whose label still fits inside the
/// circle's inner width.
pub fn fit_scale(text: &str, spec: &CircleSpec) -> usize {
    let available = (spec.real_radius() * 2.0 * 0.8).max(0.0) as usize;
    let mut scale = usize::from(spec.text_size.max(1));
    while scale > 1 && label_width(text, scale) > available {
        scale -= 1;
    }
    scale
}

pub fn render_label(canvas: &mut Canvas, text: &str, cx: f32, cy: f32, spec: &CircleSpec, color: Rgb) {
    let scale = fit_scale(text, spec);
    let width = label_width(text, scale) as f32;
    let height = (GLYPH * scale) as f32;
    let mut x = (cx - width / 2.0).round().max(0.0) as usize;
    let y = (cy - height / 2.0).round().max(0.0) as usize;

    for ch in text.chars() {
        render_char(canvas, x, y, ch, color, scale);
        x += GLYPH * scale + scale;
    }
}

fn render_char(canvas: &mut Canvas, x: usize, y: usize, ch: char, color: Rgb, scale: usize) {
    let Some(bitmap) = get_char_bitmap(ch) else {
        return;
    };

    for (row_idx, &row) in bitmap.iter().enumerate() {
        for col in 0..GLYPH {
            if (row >> (7 - col)) & 1 == 1 {
                for sy in 0..scale {
                    for sx in 0..scale {
                        canvas.blend_pixel(x + col * scale + sx, y + row_idx * scale + sy, color, 1.0);
                    }
                }
            }
        }
    }
}
