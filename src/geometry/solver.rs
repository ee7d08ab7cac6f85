//! Segment area as a function of half-angle, and its numerical inverse.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};

/// Bisection stops once the bracket is narrower than this (radians).
pub const TOLERANCE: f64 = 1e-9;

const MAX_ITERATIONS: usize = 128;

/// Fraction of the circle's area covered by the segment whose chord subtends
/// `theta` on either side of the vertical bisector.
#[inline]
pub fn segment_area_fraction(theta: f64) -> f64 {
    (theta - theta.sin() * theta.cos()) / PI
}

/// Invert [`segment_area_fraction`] on `[0, π]`.
///
/// The upper half is solved as `π - solve(1 - f)` so the result obeys the
/// complement relation exactly.
pub fn solve_half_angle(fraction: f64) -> Result<f64> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(GeometryError::invalid(
            "fraction",
            format!("{} is not within [0, 1]", fraction),
        ));
    }

    if fraction == 0.0 {
        return Ok(0.0);
    }
    if fraction == 1.0 {
        return Ok(PI);
    }
    if fraction == 0.5 {
        return Ok(FRAC_PI_2);
    }
    if fraction > 0.5 {
        return Ok(PI - bisect(1.0 - fraction));
    }
    Ok(bisect(fraction))
}

/// `fraction` is in (0, 0.5); the root lies in (0, π/2) where the area
/// function is strictly increasing.
fn bisect(fraction: f64) -> f64 {
    let mut lo = 0.0;
    let mut hi = FRAC_PI_2;

    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if segment_area_fraction(mid) < fraction {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < TOLERANCE {
            break;
        }
    }

    0.5 * (lo + hi)
}
