//! Precomputed inverse of the circular-segment area function.
//!
//! Entry `i` is the half-angle (radians, measured from the vertical
//! bisector) of the circular segment whose area is `i`% of the circle.
//! All 101 entries are stored explicitly, including the upper half, so the
//! values around the 50% boundary never drift.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};

/// Number of entries in [`PROGRESS_IN_RADIANS`].
pub const TABLE_LEN: usize = 101;

/// Largest valid table index.
pub const MAX_INDEX: i32 = 100;

pub const PROGRESS_IN_RADIANS: [f64; TABLE_LEN] = [
    0.0, 0.364413, 0.4616, 0.530831, 0.586699, 0.634474, 0.676734, 0.714958, 0.750081,
    0.782736, 0.813377, 0.842337, 0.869872, 0.896184, 0.921432, 0.945747, 0.969237,
    0.991993, 1.01409, 1.0356, 1.05657, 1.07706, 1.0971, 1.11674, 1.13601, 1.15494,
    1.17356, 1.19189, 1.20996, 1.22779, 1.24539, 1.26279, 1.27999, 1.29702, 1.31389,
    1.33061, 1.3472, 1.36366, 1.38, 1.39625, 1.4124, 1.42847, 1.44446, 1.46039, 1.47627,
    1.49209, 1.50788, 1.52364, 1.53937, 1.55509, FRAC_PI_2, 1.58651, 1.60222, 1.61796,
    1.63371, 1.6495, 1.66533, 1.6812, 1.69713, 1.71313, 1.72919, 1.74535, 1.76159,
    1.77794, 1.7944, 1.81098, 1.8277, 1.84457, 1.8616, 1.8788, 1.8962, 1.9138, 1.93163,
    1.9497, 1.96803, 1.98665, 2.00558, 2.02485, 2.04449, 2.06454, 2.08502, 2.10599,
    2.1275, 2.1496, 2.17236, 2.19585, 2.22016, 2.24541, 2.27172, 2.29926, 2.32822,
    2.35886, 2.39151, 2.42663, 2.46486, 2.50712, 2.55489, 2.61076, 2.67999, 2.77718, PI,
];

/// Look up the segment half-angle for a whole-percent progress index.
pub fn angle_for(index: i32) -> Result<f64> {
    if !(0..=MAX_INDEX).contains(&index) {
        return Err(GeometryError::OutOfRange { index });
    }
    Ok(PROGRESS_IN_RADIANS[index as usize])
}
