//! Spatial interpolation algorithms
//!
//! Interpolate scattered point samples onto a hexagonal cell grid:
//! - IDW: Inverse Distance Weighting

mod idw;

pub use idw::{idw_hex_grid, IdwParams, VALUE_KEY};

use geo_types::Point;

/// A sample point with lon/lat coordinates and a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Location as a geometry point
    #[inline]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}
