//! Dense curve types.
//!
//! - [`InterpolatedCurve`]: par yields on a regular grid
//! - [`SpotCurve`]: zero-coupon yields on a regular grid

mod interpolated;
mod spot;

pub use interpolated::InterpolatedCurve;
pub use spot::SpotCurve;

use crate::error::{CurveError, CurveResult};
use crate::types::{CurvePoint, TenorGrid};

/// Zips grid tenors with rates, checking shape and finiteness.
fn grid_points(grid: &TenorGrid, rates: &[f64]) -> CurveResult<Vec<CurvePoint>> {
    if rates.len() != grid.len() {
        return Err(CurveError::invalid_value(format!(
            "grid has {} tenors but {} rates were given",
            grid.len(),
            rates.len()
        )));
    }
    grid.tenors()
        .zip(rates.iter().copied())
        .map(|(tenor, rate)| {
            if rate.is_finite() {
                Ok(CurvePoint::new(tenor, rate))
            } else {
                Err(CurveError::invalid_value(format!(
                    "rate at {tenor}M is not finite"
                )))
            }
        })
        .collect()
}
