//! Ordinary least squares regression
//!
//! Closed-form fit of a single-covariate linear model, recomputed from
//! scratch on every call. Degenerate inputs (fewer than two pairs, zero
//! covariate variance) fail explicitly instead of returning a zero-slope
//! fit.

use geoepi_core::vector::FeatureCollection;
use geoepi_core::{Error, Result};

/// Result of an ordinary-least-squares linear fit
#[derive(Debug, Clone)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination: 1 − SSR/SST about the mean response
    pub r_squared: f64,
    /// Training pairs actually used, in input order
    pub pairs: Vec<[f64; 2]>,
}

impl LinearFit {
    /// Fitted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Human-readable equation, e.g. `y = 1.2345x + 0.6789`
    pub fn equation(&self) -> String {
        format!("y = {:.4}x + {:.4}", self.slope, self.intercept)
    }
}

/// Fit slope and intercept by least squares.
///
/// # Errors
/// `Error::InsufficientData` when fewer than 2 pairs are supplied or the
/// covariate has zero variance.
pub fn linear_fit(pairs: &[[f64; 2]]) -> Result<LinearFit> {
    let n = pairs.len();
    if n < 2 {
        return Err(Error::InsufficientData(format!(
            "linear fit needs at least 2 pairs, got {}",
            n
        )));
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|p| p[0]).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|p| p[1]).sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in pairs {
        let dx = p[0] - mean_x;
        sxx += dx * dx;
        sxy += dx * (p[1] - mean_y);
    }

    if sxx <= f64::EPSILON {
        return Err(Error::InsufficientData(
            "zero covariate variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ssr = 0.0;
    let mut sst = 0.0;
    for p in pairs {
        let e = p[1] - (slope * p[0] + intercept);
        ssr += e * e;
        let dy = p[1] - mean_y;
        sst += dy * dy;
    }
    // Constant response: the fit is exact and SST is 0
    let r_squared = if sst > 0.0 { 1.0 - ssr / sst } else { 1.0 };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        pairs: pairs.to_vec(),
    })
}

/// Fit the response on the covariate across a tract collection.
///
/// The training set is built from tracts where both properties are finite
/// numbers; tracts with either value absent do not participate.
pub fn fit_tracts(tracts: &FeatureCollection, x_key: &str, y_key: &str) -> Result<LinearFit> {
    let pairs: Vec<[f64; 2]> = tracts
        .iter()
        .filter_map(|tract| Some([tract.number(x_key)?, tract.number(y_key)?]))
        .collect();

    linear_fit(&pairs)
}
