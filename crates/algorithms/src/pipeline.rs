//! Full analysis pipeline
//!
//! interpolation → zonal aggregation → regression → residuals →
//! residual error surface, executed strictly in sequence. Parameters are
//! validated before any computation; every stage consumes borrowed inputs
//! and produces new values, and all derived state lives in the returned
//! [`PipelineOutput`]. Re-invocations are independent — the pipeline holds
//! no state between runs.

use std::ops::RangeInclusive;

use geo_types::Geometry;
use geoepi_core::geometry;
use geoepi_core::vector::FeatureCollection;
use geoepi_core::{Error, Result};

use crate::interpolation::{idw_hex_grid, IdwParams, SamplePoint, VALUE_KEY};
use crate::statistics::{
    attach_residuals, fit_tracts, residual_stddev_grid, zonal_mean, LinearFit,
};

/// Property written on tracts: mean interpolated nitrate of contained cells
pub const COVARIATE_KEY: &str = "avg_nitrate";
/// Property written on tracts: observed response minus fitted value
pub const RESIDUAL_KEY: &str = "residual";

/// Tunable parameters for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// IDW power parameter k (must be finite and > 0)
    pub power: f64,
    /// Hexagon edge length in kilometers
    pub edge_km: f64,
    /// Accepted range for `edge_km` (default 8–80 km)
    pub edge_bounds: RangeInclusive<f64>,
    /// Well property carrying the nitrate sample value in ppm
    pub value_key: String,
    /// Tract property carrying the observed cancer rate (0–1 fraction)
    pub response_key: String,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            edge_km: 10.0,
            edge_bounds: 8.0..=80.0,
            value_key: "nitr_ran".to_string(),
            response_key: "canrate".to_string(),
        }
    }
}

impl PipelineParams {
    /// Reject invalid parameters before any computation happens
    pub fn validate(&self) -> Result<()> {
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "power",
                value: self.power.to_string(),
                reason: "must be a finite number > 0".to_string(),
            });
        }

        if !self.edge_km.is_finite() || !self.edge_bounds.contains(&self.edge_km) {
            return Err(Error::InvalidParameter {
                name: "edge_km",
                value: self.edge_km.to_string(),
                reason: format!(
                    "must lie within {}..={} km",
                    self.edge_bounds.start(),
                    self.edge_bounds.end()
                ),
            });
        }

        Ok(())
    }
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Interpolated nitrate field: hex cells with [`VALUE_KEY`]
    pub field: FeatureCollection,
    /// Input tracts enriched with [`COVARIATE_KEY`] and [`RESIDUAL_KEY`]
    pub tracts: FeatureCollection,
    /// OLS fit of response on covariate
    pub fit: LinearFit,
    /// Residual dispersion surface: hex cells with
    /// [`crate::statistics::STD_DEV_KEY`]
    pub error_grid: FeatureCollection,
}

/// Run the full pipeline over the two input collections.
///
/// # Errors
/// - `InvalidParameter` before any computation if `params` are out of range
/// - `InsufficientData` from the regression stage when fewer than two
///   tracts carry both covariate and response, or the covariate has zero
///   variance — no partial output is produced
pub fn run(
    wells: &FeatureCollection,
    tracts: &FeatureCollection,
    params: &PipelineParams,
) -> Result<PipelineOutput> {
    params.validate()?;

    let samples = extract_samples(wells, &params.value_key);
    let field = match geometry::collection_bbox(wells) {
        Some(bbox) => idw_hex_grid(
            &samples,
            &bbox,
            &IdwParams {
                power: params.power,
                edge_km: params.edge_km,
            },
        ),
        None => FeatureCollection::new(),
    };

    let enriched = zonal_mean(tracts, &field, VALUE_KEY, COVARIATE_KEY);
    let fit = fit_tracts(&enriched, COVARIATE_KEY, &params.response_key)?;
    let tracts_out = attach_residuals(
        &enriched,
        &fit,
        COVARIATE_KEY,
        &params.response_key,
        RESIDUAL_KEY,
    );
    let error_grid = residual_stddev_grid(&tracts_out, RESIDUAL_KEY, params.edge_km);

    Ok(PipelineOutput {
        field,
        tracts: tracts_out,
        fit,
        error_grid,
    })
}

/// Pull point samples out of the wells collection.
///
/// Wells without point geometry or without a finite value under
/// `value_key` are skipped rather than poisoning the weighted sums.
pub fn extract_samples(wells: &FeatureCollection, value_key: &str) -> Vec<SamplePoint> {
    wells
        .iter()
        .filter_map(|well| {
            let Some(Geometry::Point(p)) = &well.geometry else {
                return None;
            };
            let value = well.number(value_key)?;
            Some(SamplePoint::new(p.x(), p.y(), value))
        })
        .collect()
}
