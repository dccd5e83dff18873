use passthru_core::types::Date;
use passthru_math::interpolation::SplineBoundary;
use serde::{Deserialize, Serialize};

use super::grid_points;
use crate::error::CurveResult;
use crate::interpolate::interpolate_with;
use crate::traits::RateCurve;
use crate::types::{CurvePoint, TenorGrid};

/// Zero-coupon (semi-annual bond-equivalent) yields on a regular grid.
///
/// Produced by [`bootstrap`](crate::bootstrap::bootstrap) on the
/// semi-annual grid, then usually re-gridded to monthly for Z-spread
/// discounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotCurve {
    observation_date: Date,
    grid: TenorGrid,
    points: Vec<CurvePoint>,
}

impl SpotCurve {
    /// Creates a spot curve from one rate per grid tenor.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidValue` if the rate count does not match
    /// the grid or a rate is not finite.
    pub fn new(observation_date: Date, grid: TenorGrid, rates: &[f64]) -> CurveResult<Self> {
        let points = grid_points(&grid, rates)?;
        Ok(Self::from_parts(observation_date, grid, points))
    }

    pub(crate) fn from_parts(observation_date: Date, grid: TenorGrid, points: Vec<CurvePoint>) -> Self {
        Self {
            observation_date,
            grid,
            points,
        }
    }

    /// Re-interpolates the curve onto `grid` with a not-a-knot spline.
    ///
    /// Every current grid point becomes a knot, so tenors shared by both
    /// grids keep their rates exactly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use passthru_core::types::Date;
    /// use passthru_curves::{RateCurve, SpotCurve, TenorGrid};
    ///
    /// let grid = TenorGrid::new(0, 36, 6).unwrap();
    /// let spot = SpotCurve::new(
    ///     Date::from_ymd(2024, 3, 8).unwrap(),
    ///     grid,
    ///     &[5.5, 5.4, 5.0, 4.8, 4.6, 4.5, 4.4],
    /// )
    /// .unwrap();
    ///
    /// let monthly = spot.regrid(&TenorGrid::new(1, 36, 1).unwrap()).unwrap();
    /// assert_eq!(monthly.rate_at(18), Some(4.8));
    /// ```
    pub fn regrid(&self, grid: &TenorGrid) -> CurveResult<SpotCurve> {
        self.regrid_with(grid, SplineBoundary::default())
    }

    /// Re-interpolates the curve onto `grid` with an explicit end condition.
    pub fn regrid_with(&self, grid: &TenorGrid, boundary: SplineBoundary) -> CurveResult<SpotCurve> {
        let points = interpolate_with(&self.points, grid, boundary)?;
        log::debug!(
            "spot curve {} re-gridded from {} to {} tenors",
            self.observation_date,
            self.points.len(),
            points.len()
        );
        Ok(Self::from_parts(self.observation_date, *grid, points))
    }
}

impl RateCurve for SpotCurve {
    fn observation_date(&self) -> Date {
        self.observation_date
    }

    fn grid(&self) -> TenorGrid {
        self.grid
    }

    fn points(&self) -> &[CurvePoint] {
        &self.points
    }
}
