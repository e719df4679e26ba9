//! Zonal aggregation
//!
//! Summarizes hex-cell values into containing polygons: a cell belongs to
//! the polygon that contains its centroid. Cells with an absent value are
//! discarded before averaging; a polygon with no qualifying cells keeps
//! the output property absent, never zero.

use geo_types::Point;
use geoepi_core::geometry;
use geoepi_core::vector::FeatureCollection;

/// Mean of contained cell values per polygon.
///
/// For each feature in `zones`, selects the cells of `cells` whose centroid
/// lies inside the feature's polygon, drops cells without a defined
/// `value_key`, and writes the arithmetic mean of the remainder under
/// `output_key`. Zones with no qualifying cells (or no geometry) are passed
/// through with the property absent.
///
/// Never mutates its inputs: returns a new collection so repeated runs with
/// different parameters cannot cross-contaminate.
pub fn zonal_mean(
    zones: &FeatureCollection,
    cells: &FeatureCollection,
    value_key: &str,
    output_key: &str,
) -> FeatureCollection {
    // Cell centroids and values computed once, reused for every zone
    let tagged: Vec<(Point<f64>, f64)> = cells
        .iter()
        .filter_map(|cell| {
            let center = geometry::centroid(cell)?;
            let value = cell.number(value_key)?;
            Some((center, value))
        })
        .collect();

    let mut out = FeatureCollection::new();

    for zone in zones.iter() {
        let mut enriched = zone.clone();

        if let Some(geom) = &zone.geometry {
            let contained: Vec<f64> = tagged
                .iter()
                .filter(|(center, _)| geometry::point_in_polygon(center, geom))
                .map(|(_, value)| *value)
                .collect();

            if !contained.is_empty() {
                let mean = contained.iter().sum::<f64>() / contained.len() as f64;
                enriched.set_number(output_key, mean);
            }
        }

        out.push(enriched);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Geometry, LineString, Polygon};
    use geoepi_core::vector::Feature;

    fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Feature {
        Feature::new(Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
                (min_x, min_y),
            ]),
            vec![],
        )))
    }

    fn cell_at(x: f64, y: f64, value: Option<f64>) -> Feature {
        // Point geometry is enough for containment-by-centroid tests
        let mut f = Feature::new(Geometry::Point(Point::new(x, y)));
        if let Some(v) = value {
            f.set_number("value", v);
        }
        f
    }

    #[test]
    fn test_mean_of_contained_cells() {
        let mut zones = FeatureCollection::new();
        zones.push(square(0.0, 0.0, 10.0, 10.0));

        let mut cells = FeatureCollection::new();
        cells.push(cell_at(2.0, 2.0, Some(4.0)));
        cells.push(cell_at(8.0, 8.0, Some(6.0)));
        cells.push(cell_at(20.0, 20.0, Some(100.0))); // outside

        let out = zonal_mean(&zones, &cells, "value", "avg");
        assert_eq!(out.features[0].number("avg"), Some(5.0));
    }

    #[test]
    fn test_undefined_cells_are_discarded() {
        let mut zones = FeatureCollection::new();
        zones.push(square(0.0, 0.0, 10.0, 10.0));

        let mut cells = FeatureCollection::new();
        cells.push(cell_at(2.0, 2.0, Some(4.0)));
        cells.push(cell_at(5.0, 5.0, None)); // contained but undefined

        let out = zonal_mean(&zones, &cells, "value", "avg");
        assert_eq!(out.features[0].number("avg"), Some(4.0));
    }

    #[test]
    fn test_empty_zone_is_absent_not_zero() {
        let mut zones = FeatureCollection::new();
        zones.push(square(100.0, 100.0, 110.0, 110.0)); // contains nothing

        let mut cells = FeatureCollection::new();
        cells.push(cell_at(2.0, 2.0, Some(4.0)));

        let out = zonal_mean(&zones, &cells, "value", "avg");
        assert!(out.features[0].get_property("avg").is_none());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let mut zones = FeatureCollection::new();
        zones.push(square(0.0, 0.0, 10.0, 10.0));

        let mut cells = FeatureCollection::new();
        cells.push(cell_at(2.0, 2.0, Some(4.0)));

        let _ = zonal_mean(&zones, &cells, "value", "avg");
        assert!(zones.features[0].get_property("avg").is_none());
    }

    #[test]
    fn test_other_properties_survive() {
        let mut zone = square(0.0, 0.0, 10.0, 10.0);
        zone.set_number("canrate", 0.42);
        let mut zones = FeatureCollection::new();
        zones.push(zone);

        let cells = FeatureCollection::new();

        let out = zonal_mean(&zones, &cells, "value", "avg");
        assert_eq!(out.features[0].number("canrate"), Some(0.42));
    }
}
