//! Residuals of the fitted model and their spatial dispersion
//!
//! The residual of a tract is observed response minus fitted value. The
//! spatial error surface re-tessellates the tract centroids with a fresh
//! hex grid and reports the unbiased sample standard deviation of the
//! residuals falling in each cell; cells with fewer than two observations
//! stay absent.

use geo_types::Point;
use geoepi_core::geometry::{self, BoundingBox};
use geoepi_core::vector::FeatureCollection;

use super::regression::LinearFit;

/// Property written on each error-grid cell with the residual
/// sample standard deviation
pub const STD_DEV_KEY: &str = "std_dev";

/// Attach per-tract residuals to a new collection.
///
/// For each tract with both `x_key` and `y_key` defined,
/// `residual = y − (slope·x + intercept)` is written under `output_key`;
/// otherwise the property stays absent. The input collection is not
/// mutated.
pub fn attach_residuals(
    tracts: &FeatureCollection,
    fit: &LinearFit,
    x_key: &str,
    y_key: &str,
    output_key: &str,
) -> FeatureCollection {
    let mut out = FeatureCollection::new();

    for tract in tracts.iter() {
        let mut enriched = tract.clone();
        if let (Some(x), Some(y)) = (tract.number(x_key), tract.number(y_key)) {
            enriched.set_number(output_key, y - fit.predict(x));
        }
        out.push(enriched);
    }

    out
}

/// Per-cell sample standard deviation of tract residuals.
///
/// Tags each tract centroid with the tract's residual, builds a fresh hex
/// tessellation over the bounding box of the tagged centroids, and for
/// each cell computes the standard deviation of the contained residuals
/// with Bessel's correction (denominator n − 1). Cells with fewer than two
/// observations carry no value; with no tagged centroids at all, an empty
/// collection is returned.
pub fn residual_stddev_grid(
    tracts: &FeatureCollection,
    residual_key: &str,
    edge_km: f64,
) -> FeatureCollection {
    let tagged: Vec<(Point<f64>, f64)> = tracts
        .iter()
        .filter_map(|tract| {
            let center = geometry::centroid(tract)?;
            let residual = tract.number(residual_key)?;
            Some((center, residual))
        })
        .collect();

    let Some(bbox) = centroid_bbox(&tagged) else {
        return FeatureCollection::new();
    };

    let mut grid = geometry::hex_grid(&bbox, edge_km);

    for cell in grid.features.iter_mut() {
        let residuals: Vec<f64> = match &cell.geometry {
            Some(geom) => tagged
                .iter()
                .filter(|(center, _)| geometry::point_in_polygon(center, geom))
                .map(|(_, residual)| *residual)
                .collect(),
            None => continue,
        };

        if residuals.len() >= 2 {
            cell.set_number(STD_DEV_KEY, sample_std_dev(&residuals));
        }
    }

    grid
}

/// Unbiased sample standard deviation (n − 1 denominator).
/// Callers guarantee n ≥ 2.
fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (ss / (n - 1.0)).sqrt()
}

fn centroid_bbox(tagged: &[(Point<f64>, f64)]) -> Option<BoundingBox> {
    let mut points = tagged.iter().map(|(p, _)| p);
    let first = points.next()?;

    let mut bbox = BoundingBox::new(first.x(), first.y(), first.x(), first.y());
    for p in points {
        bbox.extend(p.x(), p.y());
    }
    Some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::regression::linear_fit;
    use geo_types::Geometry;
    use geoepi_core::vector::Feature;

    fn tract_at(x: f64, y: f64) -> Feature {
        Feature::new(Geometry::Point(Point::new(x, y)))
    }

    #[test]
    fn test_residual_is_actual_minus_predicted() {
        let fit = linear_fit(&[[0.0, 3.0], [1.0, 5.0]]).unwrap(); // y = 2x + 3

        let mut tracts = FeatureCollection::new();
        let mut t = Feature::empty();
        t.set_number("avg_nitrate", 2.0);
        t.set_number("canrate", 8.5); // predicted 7.0
        tracts.push(t);

        let out = attach_residuals(&tracts, &fit, "avg_nitrate", "canrate", "residual");
        let r = out.features[0].number("residual").unwrap();
        assert!((r - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_residual_absent_when_covariate_missing() {
        let fit = linear_fit(&[[0.0, 3.0], [1.0, 5.0]]).unwrap();

        let mut tracts = FeatureCollection::new();
        let mut t = Feature::empty();
        t.set_number("canrate", 0.4); // no covariate
        tracts.push(t);

        let out = attach_residuals(&tracts, &fit, "avg_nitrate", "canrate", "residual");
        assert!(out.features[0].get_property("residual").is_none());
    }

    #[test]
    fn test_attach_residuals_does_not_mutate_input() {
        let fit = linear_fit(&[[0.0, 3.0], [1.0, 5.0]]).unwrap();

        let mut tracts = FeatureCollection::new();
        let mut t = Feature::empty();
        t.set_number("avg_nitrate", 1.0);
        t.set_number("canrate", 5.0);
        tracts.push(t);

        let _ = attach_residuals(&tracts, &fit, "avg_nitrate", "canrate", "residual");
        assert!(tracts.features[0].get_property("residual").is_none());
    }

    #[test]
    fn test_stddev_with_bessel_correction() {
        // Two co-located tracts with residuals 1 and 3:
        // sd = sqrt(((1-2)² + (3-2)²) / (2-1)) = sqrt(2)
        let mut tracts = FeatureCollection::new();
        for (dx, r) in [(0.0, 1.0), (0.001, 3.0)] {
            let mut t = tract_at(dx, 0.0);
            t.set_number("residual", r);
            tracts.push(t);
        }

        let grid = residual_stddev_grid(&tracts, "residual", 10.0);
        let sds: Vec<f64> = grid.iter().filter_map(|c| c.number(STD_DEV_KEY)).collect();

        assert_eq!(sds.len(), 1);
        assert!((sds[0] - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_stddev_absent_for_single_observation() {
        // Two tracts far apart: each lands alone in its cell
        let mut tracts = FeatureCollection::new();
        for (x, r) in [(0.0, 1.0), (5.0, 3.0)] {
            let mut t = tract_at(x, 0.0);
            t.set_number("residual", r);
            tracts.push(t);
        }

        let grid = residual_stddev_grid(&tracts, "residual", 10.0);
        assert!(!grid.is_empty());
        assert!(grid.iter().all(|c| c.number(STD_DEV_KEY).is_none()));
    }

    #[test]
    fn test_no_residuals_yields_empty_grid() {
        let mut tracts = FeatureCollection::new();
        tracts.push(tract_at(0.0, 0.0)); // no residual property

        let grid = residual_stddev_grid(&tracts, "residual", 10.0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_tracts_without_residual_do_not_count() {
        let mut tracts = FeatureCollection::new();
        let mut a = tract_at(0.0, 0.0);
        a.set_number("residual", 2.0);
        tracts.push(a);

        // Co-located tract with absent residual must not bring the cell to n=2
        tracts.push(tract_at(0.0005, 0.0));

        let grid = residual_stddev_grid(&tracts, "residual", 10.0);
        assert!(grid.iter().all(|c| c.number(STD_DEV_KEY).is_none()));
    }
}
