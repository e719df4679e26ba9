//! # GeoEpi Core
//!
//! Core types, geometry provider and I/O for the GeoEpi spatial
//! epidemiology library.
//!
//! This crate provides:
//! - `Feature` / `FeatureCollection`: vector features with typed attributes
//! - Geometry operations: bounding box, hex tessellation, centroid,
//!   great-circle distance, point-in-polygon
//! - GeoJSON reading and writing

pub mod error;
pub mod geometry;
pub mod io;
pub mod vector;

pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use vector::{AttributeValue, Feature, FeatureCollection};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::BoundingBox;
    pub use crate::vector::{AttributeValue, Feature, FeatureCollection};
}
