//! # GeoEpi Algorithms
//!
//! Analysis stages for the GeoEpi spatial epidemiology pipeline.
//!
//! - **interpolation**: IDW of point samples onto a hexagonal grid
//! - **statistics**: zonal aggregation, OLS regression, residuals and
//!   their spatial dispersion
//! - **pipeline**: the full interpolation → aggregation → regression →
//!   residual-error flow with parameter validation
//!
//! Every stage is a pure function: it consumes borrowed inputs and returns
//! a new value, so repeated runs with different parameters cannot
//! cross-contaminate.

pub mod interpolation;
pub mod pipeline;
pub mod statistics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::interpolation::{idw_hex_grid, IdwParams, SamplePoint, VALUE_KEY};
    pub use crate::pipeline::{
        extract_samples, run, PipelineOutput, PipelineParams, COVARIATE_KEY, RESIDUAL_KEY,
    };
    pub use crate::statistics::{
        attach_residuals, fit_tracts, linear_fit, residual_stddev_grid, zonal_mean, LinearFit,
        STD_DEV_KEY,
    };
    pub use geoepi_core::prelude::*;
}
