//! I/O operations for reading and writing feature collections

mod geojson;

pub use self::geojson::{parse_geojson, read_geojson, to_geojson, write_geojson};
