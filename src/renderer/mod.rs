//! Pixel renderer for the progress circle.
//!
//! A frame is painted into an owned RGBA buffer (`Canvas`) in the same order
//! a view's draw pass would: ring, liquid sector, waterline triangle, label.
//! Output backends convert the canvas to their native format afterwards.

pub mod layout;
pub mod shapes;
pub mod text;

use crate::color::{lerp_color, Rgb, ThemeColors};
use crate::geometry::{CircleSpec, FillGeometry, FillPhase};

use shapes::{Circle, Sector, Shape, Triangle};

/// Owned RGBA pixel buffer, 4 bytes per pixel in **RGBA** order.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Resize the canvas, reallocating only when the buffer is too small.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let needed = width * height * 4;
        if self.data.len() < needed {
            self.data.resize(needed, 0);
        }
    }

    /// Clear the canvas to fully transparent black.
    #[inline]
    pub fn clear(&mut self) {
        let len = self.width * self.height * 4;
        self.data[..len].fill(0);
    }

    /// Paint `color` over (x, y) with the given coverage in [0, 1].
    /// Partially covered pixels blend with what is already there.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgb, coverage: f32) {
        if x >= self.width || y >= self.height || coverage <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let (r, g, b, a) = self.get_pixel(x, y);
        let mixed = if a == 0 { color } else { lerp_color((r, g, b), color, coverage) };
        let alpha = (a as f32 + (255.0 - a as f32) * coverage.min(1.0)).round() as u8;
        self.data[idx] = mixed.0;
        self.data[idx + 1] = mixed.1;
        self.data[idx + 2] = mixed.2;
        self.data[idx + 3] = alpha;
    }

    /// Read the RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if x < self.width && idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    /// Fill every pixel the shape touches, antialiased by 2x2 supersampling.
    pub fn fill(&mut self, shape: &impl Shape, color: Rgb) {
        const SAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

        let Some((x0, y0, x1, y1)) = shape.bounds() else {
            return;
        };
        let x0 = x0.floor().max(0.0) as usize;
        let y0 = y0.floor().max(0.0) as usize;
        let x1 = (x1.ceil().max(0.0) as usize).min(self.width);
        let y1 = (y1.ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let hits = SAMPLES
                    .iter()
                    .filter(|(sx, sy)| shape.contains(x as f32 + sx, y as f32 + sy))
                    .count();
                if hits > 0 {
                    self.blend_pixel(x, y, color, hits as f32 / SAMPLES.len() as f32);
                }
            }
        }
    }
}

/// Per-frame inputs.
pub struct FrameData<'a> {
    pub geometry: &'a FillGeometry,
    /// Label text, already formatted. Drawn only when the spec's
    /// `show_text` is set.
    pub label: Option<&'a str>,
}

/// Parameters controlling how a frame is rendered.
pub struct RenderParams<'a> {
    pub spec: &'a CircleSpec,
    pub colors: &'a ThemeColors,
}

/// Main entry point: render a complete frame centred on the canvas.
pub fn render_frame(canvas: &mut Canvas, frame: &FrameData, params: &RenderParams) {
    canvas.clear();

    let spec = params.spec;
    let colors = params.colors;
    let geometry = frame.geometry;
    let cx = canvas.width as f32 / 2.0;
    let cy = canvas.height as f32 / 2.0;

    // Ring: the stroke straddles `radius`, so the outer edge is half a stroke out.
    canvas.fill(
        &Circle::new(cx, cy, spec.radius + spec.stroke_width / 2.0),
        colors.background,
    );

    canvas.fill(
        &Sector::new(cx, cy, spec.radius, geometry.start_angle, geometry.sweep_angle),
        colors.filled,
    );

    if let Some([a, b, c]) = geometry.waterline_triangle(cx, cy, spec) {
        // Below the centre the sector overshoots the segment by this
        // triangle; above it the sector falls short by it.
        let color = match geometry.phase {
            FillPhase::BelowCenter => colors.background,
            _ => colors.filled,
        };
        canvas.fill(&Triangle::new(a, b, c), color);
    }

    if let Some(label) = frame.label.filter(|_| spec.show_text) {
        text::render_label(canvas, label, cx, cy, spec, colors.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Theme;
    use crate::geometry::compute_fill_geometry;

    fn render(progress: i32) -> (Canvas, ThemeColors) {
        render_labelled(progress, None, false)
    }

    fn render_labelled(progress: i32, label: Option<&str>, show_text: bool) -> (Canvas, ThemeColors) {
        let spec = CircleSpec {
            radius: 40.0,
            stroke_width: 0.0,
            text_size: 1,
            show_text,
        };
        let colors = Theme::Ocean.colors();
        let geometry = compute_fill_geometry(progress, 100, spec.radius).unwrap();
        let mut canvas = Canvas::new(100, 100);
        render_frame(
            &mut canvas,
            &FrameData {
                geometry: &geometry,
                label,
            },
            &RenderParams {
                spec: &spec,
                colors: &colors,
            },
        );
        (canvas, colors)
    }

    fn distance(a: Rgb, b: Rgb) -> i32 {
        (a.0 as i32 - b.0 as i32).abs() + (a.1 as i32 - b.1 as i32).abs() + (a.2 as i32 - b.2 as i32).abs()
    }

    /// Fraction of the disc's pixels closer to the liquid colour than the ring's.
    fn filled_fraction(canvas: &Canvas, colors: &ThemeColors) -> f32 {
        let mut inside = 0usize;
        let mut filled = 0usize;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                let dx = x as f32 + 0.5 - 50.0;
                let dy = y as f32 + 0.5 - 50.0;
                if dx * dx + dy * dy > 38.0 * 38.0 {
                    continue;
                }
                inside += 1;
                let (r, g, b, _) = canvas.get_pixel(x, y);
                if distance((r, g, b), colors.filled) < distance((r, g, b), colors.background) {
                    filled += 1;
                }
            }
        }
        filled as f32 / inside as f32
    }

    #[test]
    fn painted_area_tracks_progress() {
        for p in [0, 10, 25, 50, 75, 90, 100] {
            let (canvas, colors) = render(p);
            let fraction = filled_fraction(&canvas, &colors);
            assert!(
                (fraction - p as f32 / 100.0).abs() < 0.05,
                "progress {} painted {}",
                p,
                fraction
            );
        }
    }

    #[test]
    fn liquid_sits_at_the_bottom() {
        let (canvas, colors) = render(30);
        let (r, g, b, _) = canvas.get_pixel(50, 85);
        assert_eq!((r, g, b), colors.filled);
        let (r, g, b, _) = canvas.get_pixel(50, 15);
        assert_eq!((r, g, b), colors.background);
    }

    fn text_pixels(canvas: &Canvas, colors: &ThemeColors) -> usize {
        (0..canvas.height)
            .flat_map(|y| (0..canvas.width).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let (r, g, b, _) = canvas.get_pixel(x, y);
                (r, g, b) == colors.text
            })
            .count()
    }

    #[test]
    fn label_respects_show_text() {
        let (canvas, colors) = render_labelled(0, Some("0%"), false);
        assert_eq!(text_pixels(&canvas, &colors), 0);

        let (canvas, colors) = render_labelled(0, Some("0%"), true);
        assert!(text_pixels(&canvas, &colors) > 0);
    }

    #[test]
    fn corners_stay_transparent() {
        let (canvas, _) = render(100);
        assert_eq!(canvas.get_pixel(0, 0).3, 0);
        assert_eq!(canvas.get_pixel(99, 99).3, 0);
    }

    #[test]
    fn blend_mixes_partial_coverage() {
        let mut canvas = Canvas::new(1, 1);
        canvas.blend_pixel(0, 0, (0, 0, 0), 1.0);
        canvas.blend_pixel(0, 0, (200, 200, 200), 0.5);
        assert_eq!(canvas.get_pixel(0, 0), (100, 100, 100, 255));
    }
}
