//! Interpolation methods for yield curve construction.
//!
//! Par-yield quotes arrive on a sparse, irregular set of tenors; the
//! [`CubicSpline`] turns them into a dense curve. Two end conditions are
//! supported through [`SplineBoundary`]:
//!
//! | Boundary | End condition | Notes |
//! |----------|---------------|-------|
//! | Not-a-knot | Third derivative continuous at the second and penultimate knots | Default, matches the usual treasury-curve fit |
//! | Natural | Second derivative zero at both ends | Flatter tails |
//!
//! Both pass through every knot exactly. [`linear`] covers the two-point
//! case used when reading a dense curve between grid tenors.

mod cubic_spline;
mod linear;

pub use cubic_spline::{CubicSpline, SplineBoundary, MIN_KNOTS};
pub use linear::linear;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
