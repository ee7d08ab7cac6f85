//! Fill geometry for a circle that fills from the bottom like rising liquid.
//!
//! Given a progress value the calculator picks the half-angle of the circular
//! segment whose area matches that progress, then expresses it in the terms
//! a canvas needs: a pie-sector start and sweep (degrees, 0° at 3 o'clock,
//! clockwise) and the height of the waterline above the circle's bottom.
//!
//! The sector alone is not the segment. Below the centre the segment is the
//! sector minus the triangle spanned by the centre and the waterline ends;
//! above the centre it is the sector plus that triangle. See
//! [`FillGeometry::waterline_triangle`].

pub mod solver;
pub mod table;

use std::f64::consts::PI;

use crate::error::{GeometryError, Result};

pub use solver::{segment_area_fraction, solve_half_angle};
pub use table::{angle_for, PROGRESS_IN_RADIANS};

/// Maximum progress the angle table is indexed against.
pub const DEFAULT_MAX_VALUE: i32 = 100;

/// Which side of the horizontal diameter the waterline sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    Empty,
    BelowCenter,
    Half,
    AboveCenter,
    Full,
}

impl FillPhase {
    fn classify(progress: i32, max_value: i32) -> Self {
        // Compare 2p against max exactly so an odd maximum has no false midpoint.
        let doubled = i64::from(progress) * 2;
        let max = i64::from(max_value);
        if progress == 0 {
            Self::Empty
        } else if progress == max_value {
            Self::Full
        } else if doubled < max {
            Self::BelowCenter
        } else if doubled == max {
            Self::Half
        } else {
            Self::AboveCenter
        }
    }

    /// True when the renderer has to draw the waterline triangle.
    pub fn has_triangle(self) -> bool {
        matches!(self, Self::BelowCenter | Self::AboveCenter)
    }
}

/// Geometry for one progress value. Recomputed on every change, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillGeometry {
    /// Segment half-angle measured from the downward vertical.
    pub radians: f64,
    /// Sector start, degrees, canvas convention.
    pub start_angle: f32,
    /// Sector sweep, degrees, clockwise positive.
    pub sweep_angle: f32,
    /// Distance from the circle's lowest point up to the waterline.
    pub filled_height: f32,
    pub phase: FillPhase,
}

/// Static description of the drawn circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    pub radius: f32,
    pub stroke_width: f32,
    pub text_size: u16,
    pub show_text: bool,
}

impl CircleSpec {
    /// Radius of the inner edge of the ring stroke.
    pub fn real_radius(&self) -> f32 {
        self.radius - self.stroke_width / 2.0
    }
}

impl Default for CircleSpec {
    fn default() -> Self {
        Self {
            radius: 120.0,
            stroke_width: 6.0,
            text_size: 3,
            show_text: true,
        }
    }
}

/// Compute the fill geometry for `progress` out of `max_value` on a circle of
/// `radius`.
///
/// With `max_value == 100` the stored angle table is indexed directly. Any
/// other maximum is rescaled to a fraction and inverted numerically.
pub fn compute_fill_geometry(progress: i32, max_value: i32, radius: f32) -> Result<FillGeometry> {
    if max_value <= 0 {
        return Err(GeometryError::invalid(
            "max_value",
            format!("{} must be positive", max_value),
        ));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::invalid(
            "radius",
            format!("{} must be a positive finite number", radius),
        ));
    }
    if !(0..=max_value).contains(&progress) {
        return Err(GeometryError::invalid(
            "progress",
            format!("{} is not within [0, {}]", progress, max_value),
        ));
    }

    let phase = FillPhase::classify(progress, max_value);
    let r = f64::from(radius);

    let geometry = match phase {
        FillPhase::Empty => FillGeometry {
            radians: radians_for(0, max_value)?,
            start_angle: 90.0,
            sweep_angle: 0.0,
            filled_height: 0.0,
            phase,
        },
        FillPhase::Half => FillGeometry {
            radians: radians_for(progress, max_value)?,
            start_angle: 0.0,
            sweep_angle: 180.0,
            filled_height: radius,
            phase,
        },
        FillPhase::Full => FillGeometry {
            radians: radians_for(progress, max_value)?,
            start_angle: -90.0,
            sweep_angle: 360.0,
            filled_height: radius * 2.0,
            phase,
        },
        FillPhase::BelowCenter | FillPhase::AboveCenter => {
            let radians = radians_for(progress, max_value)?;
            let degrees = radians.to_degrees();
            let filled_height = if phase == FillPhase::BelowCenter {
                r - r * radians.cos()
            } else {
                r + r * (PI - radians).cos()
            };
            FillGeometry {
                radians,
                start_angle: (90.0 - degrees) as f32,
                sweep_angle: degrees as f32 * 2.0,
                filled_height: filled_height as f32,
                phase,
            }
        }
    };

    Ok(geometry)
}

fn radians_for(progress: i32, max_value: i32) -> Result<f64> {
    if max_value == DEFAULT_MAX_VALUE {
        angle_for(progress)
    } else {
        solve_half_angle(f64::from(progress) / f64::from(max_value))
    }
}

/// Half the waterline chord, measured against the ring's inner radius.
pub fn chord_half_width(radius: f32, stroke_width: f32, radians: f64) -> f32 {
    let real_radius = f64::from(radius - stroke_width / 2.0);
    (real_radius * radians.sin()) as f32
}

impl FillGeometry {
    pub fn half_width(&self, spec: &CircleSpec) -> f32 {
        chord_half_width(spec.radius, spec.stroke_width, self.radians)
    }

    /// Vertical offset of the waterline from the centre, y growing downward.
    pub fn waterline_offset(&self, radius: f32) -> f32 {
        radius - self.filled_height
    }

    /// Centre, left and right waterline vertices for a circle centred at
    /// `(cx, cy)`. `None` when the sector alone already matches the fill.
    pub fn waterline_triangle(&self, cx: f32, cy: f32, spec: &CircleSpec) -> Option<[(f32, f32); 3]> {
        if !self.phase.has_triangle() {
            return None;
        }
        let width = self.half_width(spec);
        let y = cy + self.waterline_offset(spec.radius);
        Some([(cx, cy), (cx - width, y), (cx + width, y)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn geometry(p: i32) -> FillGeometry {
        compute_fill_geometry(p, 100, 10.0).unwrap()
    }

    #[test]
    fn empty_circle() {
        let g = geometry(0);
        assert_eq!(g.radians, 0.0);
        assert_eq!(g.start_angle, 90.0);
        assert_eq!(g.sweep_angle, 0.0);
        assert_eq!(g.filled_height, 0.0);
        assert_eq!(g.phase, FillPhase::Empty);
    }

    #[test]
    fn half_circle_is_exact() {
        let g = compute_fill_geometry(50, 100, 7.5).unwrap();
        assert_eq!(g.start_angle, 0.0);
        assert_eq!(g.sweep_angle, 180.0);
        assert_eq!(g.filled_height, 7.5);
        assert_eq!(g.radians, std::f64::consts::FRAC_PI_2);
        assert_eq!(g.phase, FillPhase::Half);
    }

    #[test]
    fn full_circle() {
        let g = geometry(100);
        assert_eq!(g.start_angle, -90.0);
        assert_eq!(g.sweep_angle, 360.0);
        assert_eq!(g.filled_height, 20.0);
        assert_eq!(g.radians, PI);
        assert_eq!(g.phase, FillPhase::Full);
    }

    #[test]
    fn thirteen_percent_matches_table_entry() {
        let g = geometry(13);
        assert!((g.radians - 0.896184).abs() < 1e-9);
        assert!((g.start_angle - 38.652).abs() < EPS);
        assert!((g.sweep_angle - 102.695).abs() < EPS);
        assert!((g.filled_height - 3.754).abs() < EPS);
        assert_eq!(g.phase, FillPhase::BelowCenter);
    }

    #[test]
    fn quarter_fill() {
        let g = geometry(25);
        assert!((g.radians - 1.15494).abs() < 1e-9);
        assert!((g.start_angle - 23.827).abs() < EPS);
        assert!((g.sweep_angle - 132.346).abs() < EPS);
        assert!((g.filled_height - 5.960).abs() < EPS);
    }

    #[test]
    fn above_centre_start_goes_negative() {
        let g = geometry(75);
        assert_eq!(g.phase, FillPhase::AboveCenter);
        assert!(g.start_angle < 0.0);
        assert!(g.sweep_angle > 180.0);
        assert!(g.filled_height > 10.0 && g.filled_height < 20.0);
    }

    #[test]
    fn rejects_bad_arguments() {
        let cases = [
            (-1, 100, 10.0),
            (101, 100, 10.0),
            (0, 0, 10.0),
            (5, -3, 10.0),
            (5, 100, 0.0),
            (5, 100, -1.0),
            (5, 100, f32::NAN),
        ];
        for (p, max, r) in cases {
            assert!(
                matches!(
                    compute_fill_geometry(p, max, r),
                    Err(GeometryError::InvalidArgument { .. })
                ),
                "({}, {}, {}) accepted",
                p,
                max,
                r
            );
        }
    }

    #[test]
    fn odd_maximum_has_no_false_midpoint() {
        let g = compute_fill_geometry(3, 7, 10.0).unwrap();
        assert_eq!(g.phase, FillPhase::BelowCenter);
        let g = compute_fill_geometry(4, 7, 10.0).unwrap();
        assert_eq!(g.phase, FillPhase::AboveCenter);
    }

    #[test]
    fn rescaled_maximum_tracks_table() {
        // 50 of 200 is the same fill as 25 of 100.
        let scaled = compute_fill_geometry(50, 200, 10.0).unwrap();
        let direct = geometry(25);
        assert!((scaled.radians - direct.radians).abs() < 1e-5);
        assert!((scaled.filled_height - direct.filled_height).abs() < EPS);
    }

    #[test]
    fn half_width_uses_inner_radius() {
        let spec = CircleSpec {
            radius: 10.0,
            stroke_width: 2.0,
            ..CircleSpec::default()
        };
        let g = geometry(50);
        assert!((g.half_width(&spec) - 9.0).abs() < 1e-6);
        assert!(geometry(0).half_width(&spec).abs() < 1e-6);
    }

    #[test]
    fn triangle_only_between_extremes() {
        let spec = CircleSpec {
            radius: 10.0,
            stroke_width: 0.0,
            ..CircleSpec::default()
        };
        for p in [0, 50, 100] {
            assert!(geometry(p).waterline_triangle(10.0, 10.0, &spec).is_none());
        }

        let g = geometry(25);
        let [apex, left, right] = g.waterline_triangle(10.0, 10.0, &spec).unwrap();
        assert_eq!(apex, (10.0, 10.0));
        assert!((left.1 - right.1).abs() < 1e-6);
        assert!((left.1 - (20.0 - g.filled_height)).abs() < 1e-5);
        assert!((right.0 - 10.0 - (10.0 - left.0)).abs() < 1e-5);
        // Below centre the waterline is under the apex (y down).
        assert!(left.1 > apex.1);
    }

    proptest! {
        #[test]
        fn prop_height_is_monotonic(p in 0i32..100, r in 0.5f32..500.0) {
            let a = compute_fill_geometry(p, 100, r).unwrap();
            let b = compute_fill_geometry(p + 1, 100, r).unwrap();
            prop_assert!(a.filled_height <= b.filled_height);
            prop_assert!(a.filled_height >= 0.0 && b.filled_height <= 2.0 * r);
        }

        #[test]
        fn prop_sweeps_are_complementary(p in 1i32..100) {
            let a = geometry(p);
            let b = geometry(100 - p);
            prop_assert!((a.sweep_angle + b.sweep_angle - 360.0).abs() < EPS);
        }

        #[test]
        fn prop_is_pure(p in 0i32..=100, max in 1i32..1000, r in 0.5f32..500.0) {
            let p = p.min(max);
            let a = compute_fill_geometry(p, max, r).unwrap();
            let b = compute_fill_geometry(p, max, r).unwrap();
            prop_assert_eq!(a.radians.to_bits(), b.radians.to_bits());
            prop_assert_eq!(a.start_angle.to_bits(), b.start_angle.to_bits());
            prop_assert_eq!(a.sweep_angle.to_bits(), b.sweep_angle.to_bits());
            prop_assert_eq!(a.filled_height.to_bits(), b.filled_height.to_bits());
        }

        #[test]
        fn prop_rescaled_height_is_monotonic(max in 2i32..2000, seed in 0.0f64..1.0) {
            let p = ((f64::from(max - 1)) * seed) as i32;
            let a = compute_fill_geometry(p, max, 10.0).unwrap();
            let b = compute_fill_geometry(p + 1, max, 10.0).unwrap();
            prop_assert!(a.filled_height <= b.filled_height);
        }

        #[test]
        fn prop_out_of_range_progress_is_rejected(p in prop_oneof![i32::MIN..0, 101i32..i32::MAX]) {
            prop_assert!(
                matches!(
                    compute_fill_geometry(p, 100, 10.0),
                    Err(GeometryError::InvalidArgument { name: "progress", .. })
                ),
                "progress accepted"
            );
        }
    }
}
