//! Circular progress indicator that fills from the bottom like rising liquid.
//!
//! The core is [`geometry`]: it turns a progress value into the pie-sector
//! angles and waterline height a canvas needs to draw the filled circular
//! segment. Everything else in this crate is a terminal front end for it.

pub mod cli;
pub mod color;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod renderer;

pub use error::GeometryError;
pub use geometry::{
    angle_for, chord_half_width, compute_fill_geometry, CircleSpec, FillGeometry, FillPhase,
};
