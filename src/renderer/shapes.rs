//! Point-in-shape tests used by [`Canvas::fill`](super::Canvas::fill).
//!
//! Angles follow the canvas convention: degrees, 0° at 3 o'clock, positive
//! sweep runs clockwise on screen (y grows downward).

pub trait Shape {
    /// Bounding box as (x0, y0, x1, y1), or `None` when nothing is drawn.
    fn bounds(&self) -> Option<(f32, f32, f32, f32)>;

    fn contains(&self, x: f32, y: f32) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    cx: f32,
    cy: f32,
    radius: f32,
}

impl Circle {
    pub fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self { cx, cy, radius }
    }
}

impl Shape for Circle {
    fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.radius <= 0.0 {
            return None;
        }
        Some((
            self.cx - self.radius,
            self.cy - self.radius,
            self.cx + self.radius,
            self.cy + self.radius,
        ))
    }

    #[inline]
    fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Pie slice from the centre, like a canvas arc drawn with its centre included.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    circle: Circle,
    start: f32,
    sweep: f32,
}

impl Sector {
    pub fn new(cx: f32, cy: f32, radius: f32, start_deg: f32, sweep_deg: f32) -> Self {
        Self {
            circle: Circle::new(cx, cy, radius),
            start: start_deg,
            sweep: sweep_deg,
        }
    }
}

impl Shape for Sector {
    fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.sweep <= 0.0 {
            return None;
        }
        self.circle.bounds()
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        if self.sweep <= 0.0 || !self.circle.contains(x, y) {
            return false;
        }
        if self.sweep >= 360.0 {
            return true;
        }
        let angle = (y - self.circle.cy).atan2(x - self.circle.cx).to_degrees();
        (angle - self.start).rem_euclid(360.0) <= self.sweep
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
}

impl Triangle {
    pub fn new(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Self {
        Self { a, b, c }
    }
}

#[inline]
fn edge(p: (f32, f32), q: (f32, f32), r: (f32, f32)) -> f32 {
    (p.0 - r.0) * (q.1 - r.1) - (q.0 - r.0) * (p.1 - r.1)
}

impl Shape for Triangle {
    fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let xs = [self.a.0, self.b.0, self.c.0];
        let ys = [self.a.1, self.b.1, self.c.1];
        let min = |v: [f32; 3]| v.into_iter().fold(f32::INFINITY, f32::min);
        let max = |v: [f32; 3]| v.into_iter().fold(f32::NEG_INFINITY, f32::max);
        Some((min(xs), min(ys), max(xs), max(ys)))
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        let p = (x, y);
        let d1 = edge(p, self.a, self.b);
        let d2 = edge(p, self.b, self.c);
        let d3 = edge(p, self.c, self.a);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}
