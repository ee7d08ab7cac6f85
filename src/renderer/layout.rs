//! Fitting the configured circle into the space a backend can offer.

use crate::geometry::CircleSpec;

/// Fraction of the shorter side the ring may occupy.
const FILL_RATIO: f32 = 0.95;

/// Pixel canvas size for a terminal area: one pixel per column, two per row
/// (half-block cells are roughly square per half).
pub fn terminal_canvas_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}

/// Shrink `spec` so its outer ring fits a `width` x `height` canvas.
/// Stroke width scales with the radius; a circle that already fits is
/// returned unchanged. `None` when the canvas is too small to draw anything.
pub fn fit_circle(width: usize, height: usize, spec: &CircleSpec) -> Option<CircleSpec> {
    let max_outer = width.min(height) as f32 / 2.0 * FILL_RATIO;
    if max_outer < 1.0 {
        return None;
    }

    let outer = spec.radius + spec.stroke_width / 2.0;
    if outer <= max_outer {
        return Some(*spec);
    }

    let scale = max_outer / outer;
    Some(CircleSpec {
        radius: spec.radius * scale,
        stroke_width: spec.stroke_width * scale,
        ..*spec
    })
}
