//! Geometry provider: bounding box, hex tessellation, centroid,
//! great-circle distance, point-in-polygon
//!
//! Coordinates are geographic (lon/lat degrees); distances are great-circle
//! kilometers. Hexagon edge lengths given in kilometers are converted to
//! degrees along the mean-Earth-radius arc before tessellating.

use geo::{
    BoundingRect, Centroid as GeoCentroid, Contains, Distance, Geometry, Haversine, LineString,
    Point, Polygon,
};

use crate::vector::{Feature, FeatureCollection};

/// Mean Earth radius in kilometers (IUGG)
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Grow the box so it contains (x, y)
    pub fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Compute the envelope of every feature geometry in a collection.
///
/// Returns `None` if the collection is empty or no feature carries geometry.
pub fn collection_bbox(collection: &FeatureCollection) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;

    for feature in collection.iter() {
        let Some(geom) = &feature.geometry else { continue };
        let Some(rect) = geom.bounding_rect() else { continue };

        let b = BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
        bbox = Some(match bbox {
            Some(acc) => acc.union(&b),
            None => b,
        });
    }

    bbox
}

/// Convert a great-circle length in kilometers to degrees of arc
/// along the mean Earth radius.
pub fn length_to_degrees(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

/// Tessellate a bounding box with regular pointy-top hexagons.
///
/// `edge_km` is the hexagon edge length in kilometers. The grid always
/// covers the full box: rows step by 1.5 edges, odd rows shift by half a
/// cell width, and one extra column is emitted on each side so boundary
/// cells overhang rather than leave gaps.
///
/// The returned features carry polygon geometry and no properties; each
/// cell's centroid is its center.
pub fn hex_grid(bbox: &BoundingBox, edge_km: f64) -> FeatureCollection {
    if !edge_km.is_finite() || edge_km <= 0.0 {
        return FeatureCollection::new();
    }

    let s = length_to_degrees(edge_km);
    let width = 3.0_f64.sqrt() * s;
    let vstep = 1.5 * s;

    let mut grid = FeatureCollection::new();
    let mut row = 0usize;

    loop {
        let cy = bbox.min_y + row as f64 * vstep;
        if cy - s > bbox.max_y {
            break;
        }

        let offset = if row % 2 == 1 { width / 2.0 } else { 0.0 };
        let mut col = 0usize;

        loop {
            let cx = bbox.min_x + offset + col as f64 * width - width;
            if cx - width / 2.0 > bbox.max_x {
                break;
            }

            grid.push(Feature::new(Geometry::Polygon(hexagon(cx, cy, s))));
            col += 1;
        }

        row += 1;
    }

    grid
}

/// Regular pointy-top hexagon centered at (cx, cy) with edge length `s`,
/// all in degrees. Vertices at 30°, 90°, ..., 330°.
fn hexagon(cx: f64, cy: f64, s: f64) -> Polygon<f64> {
    let mut ring = Vec::with_capacity(7);
    for i in 0..6 {
        let angle = std::f64::consts::FRAC_PI_3 * i as f64 + std::f64::consts::FRAC_PI_6;
        ring.push((cx + s * angle.cos(), cy + s * angle.sin()));
    }
    ring.push(ring[0]);

    Polygon::new(LineString::from(ring), vec![])
}

/// Compute the centroid of a feature's geometry
pub fn centroid(feature: &Feature) -> Option<Point<f64>> {
    feature.geometry.as_ref()?.centroid()
}

/// Great-circle (haversine) distance between two lon/lat points, in kilometers
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b) / 1000.0
}

/// Test whether a point lies inside a polygon or multi-polygon geometry.
///
/// Non-areal geometries never contain a point.
pub fn point_in_polygon(point: &Point<f64>, geom: &Geometry<f64>) -> bool {
    match geom {
        Geometry::Polygon(p) => p.contains(point),
        Geometry::MultiPolygon(mp) => mp.contains(point),
        _ => false,
    }
}
