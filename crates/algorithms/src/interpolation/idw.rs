//! Inverse Distance Weighting (IDW) interpolation onto a hexagonal grid
//!
//! Estimates the field value at each hex cell centroid as a weighted
//! average of the point samples, where weights are inversely proportional
//! to great-circle distance raised to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use geoepi_core::geometry::{self, BoundingBox};
use geoepi_core::vector::FeatureCollection;

use super::SamplePoint;

/// Property written on each hex cell with the interpolated value
pub const VALUE_KEY: &str = "value";

/// Parameters for IDW interpolation
#[derive(Debug, Clone)]
pub struct IdwParams {
    /// Power parameter k (default: 2.0).
    /// Higher values give more weight to nearby samples.
    pub power: f64,
    /// Hexagon edge length in kilometers (default: 10.0)
    pub edge_km: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            edge_km: 10.0,
        }
    }
}

/// Interpolate scattered samples onto a hex grid covering `bbox`.
///
/// # Algorithm
///
/// For each cell centroid at (x, y):
///
/// ```text
/// z(x,y) = Σ(wi * zi) / Σ(wi)
/// where wi = 1 / d(x,y, xi,yi)^k
/// ```
///
/// with d the great-circle distance in kilometers. If some sample lies at
/// distance exactly 0, the first such sample in input order (lowest index)
/// supplies the cell value verbatim and the remaining samples are ignored
/// for that cell.
///
/// An empty sample set is not an error: the grid is returned with every
/// cell's value absent. Cost is O(cells × samples); there is no spatial
/// index.
///
/// # Arguments
/// * `samples` - Scattered sample points with values
/// * `bbox` - Extent to tessellate (normally the sample collection's bbox)
/// * `params` - Power parameter and cell edge length
///
/// # Returns
/// Hex cell collection with the interpolated value under [`VALUE_KEY`];
/// cells with no defined value carry no such property.
pub fn idw_hex_grid(
    samples: &[SamplePoint],
    bbox: &BoundingBox,
    params: &IdwParams,
) -> FeatureCollection {
    let mut grid = geometry::hex_grid(bbox, params.edge_km);

    for cell in grid.features.iter_mut() {
        let Some(center) = geometry::centroid(cell) else {
            continue;
        };

        let mut exact = None;
        let mut sum_w = 0.0;
        let mut sum_wv = 0.0;

        for sample in samples {
            let d = geometry::distance_km(center, sample.point());

            // Centroid sits exactly on a sample: take its value verbatim.
            // First match in input order wins.
            if d == 0.0 {
                exact = Some(sample.value);
                break;
            }

            let w = 1.0 / d.powf(params.power);
            sum_w += w;
            sum_wv += w * sample.value;
        }

        let value = exact.or_else(|| (sum_w > 0.0).then(|| sum_wv / sum_w));
        if let Some(v) = value {
            cell.set_number(VALUE_KEY, v);
        }
    }

    grid
}
