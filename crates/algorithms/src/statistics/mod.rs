//! Statistical analysis stages
//!
//! - **zonal**: aggregate hex-cell values into containing polygons
//! - **regression**: ordinary-least-squares linear fit
//! - **residuals**: fitted-value residuals and their spatial dispersion

pub mod regression;
pub mod residuals;
pub mod zonal;

pub use regression::{fit_tracts, linear_fit, LinearFit};
pub use residuals::{attach_residuals, residual_stddev_grid, STD_DEV_KEY};
pub use zonal::zonal_mean;
