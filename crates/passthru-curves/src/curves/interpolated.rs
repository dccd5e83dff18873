use passthru_core::types::Date;
use serde::{Deserialize, Serialize};

use super::grid_points;
use crate::error::CurveResult;
use crate::traits::RateCurve;
use crate::types::{CurvePoint, TenorGrid};

/// Par yields on a regular tenor grid.
///
/// Usually produced by [`ParCurve::interpolate`](crate::ParCurve::interpolate);
/// one exists per (observation date, grid) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedCurve {
    observation_date: Date,
    grid: TenorGrid,
    points: Vec<CurvePoint>,
}

impl InterpolatedCurve {
    /// Creates a curve from one rate per grid tenor.
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
}

impl RateCurve for InterpolatedCurve {
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
