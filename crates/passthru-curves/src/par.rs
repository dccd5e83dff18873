//! Par-yield quotes for one observation date.

use passthru_core::types::Date;
use passthru_math::interpolation::SplineBoundary;
use serde::{Deserialize, Serialize};

use crate::curves::InterpolatedCurve;
use crate::error::{CurveError, CurveResult};
use crate::interpolate::interpolate_with;
use crate::types::{CurvePoint, TenorGrid};

/// Tenors every par curve must quote, in months.
pub const ANCHOR_TENORS: [u32; 12] = [1, 2, 3, 6, 12, 24, 36, 60, 84, 120, 240, 360];

/// The published constant-maturity tenor set, in months.
pub const PUBLISHED_TENORS: [u32; 13] = [1, 2, 3, 5, 6, 12, 24, 36, 60, 84, 120, 240, 360];

/// Par yields observed on one date.
///
/// Tenors are strictly increasing and positive, and include every
/// [`ANCHOR_TENORS`] entry. Extra tenors (the published 5-month point,
/// for instance) become additional spline knots.
///
/// # Example
///
/// ```rust
/// use passthru_core::types::Date;
/// use passthru_curves::{ParCurve, RateCurve, TenorGrid};
///
/// let quotes = [
///     (1, 5.54), (2, 5.50), (3, 5.47), (5, 5.42), (6, 5.37), (12, 5.03),
///     (24, 4.48), (36, 4.30), (60, 4.09), (84, 4.08), (120, 4.09),
///     (240, 4.35), (360, 4.26),
/// ];
/// let par = ParCurve::from_quotes(Date::from_ymd(2024, 3, 8).unwrap(), &quotes).unwrap();
///
/// let dense = par.interpolate(&TenorGrid::semi_annual()).unwrap();
/// assert_eq!(dense.rate_at(120), Some(4.09));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParCurve {
    observation_date: Date,
    points: Vec<CurvePoint>,
}

impl ParCurve {
    /// Builds a par curve from `(tenor_months, rate_percent)` quotes.
    ///
    /// # Errors
    ///
    /// * `CurveError::InvalidTenor` for a zero tenor.
    /// * `CurveError::NonMonotonicKnots` if tenors are not strictly increasing.
    /// * `CurveError::InvalidValue` for a non-finite rate.
    /// * `CurveError::MissingAnchorTenor` if an anchor tenor is absent.
    pub fn from_quotes(observation_date: Date, quotes: &[(u32, f64)]) -> CurveResult<Self> {
        let points: Vec<CurvePoint> = quotes.iter().copied().map(CurvePoint::from).collect();
        Self::new(observation_date, points)
    }

    /// Builds a par curve from points.
    ///
    /// See [`ParCurve::from_quotes`] for the validation rules.
    pub fn new(observation_date: Date, points: Vec<CurvePoint>) -> CurveResult<Self> {
        if let Some(p) = points.iter().find(|p| p.tenor == 0) {
            return Err(CurveError::InvalidTenor { tenor: p.tenor });
        }

        for (i, w) in points.windows(2).enumerate() {
            if w[1].tenor <= w[0].tenor {
                return Err(CurveError::non_monotonic_knots(i + 1, w[0].tenor, w[1].tenor));
            }
        }

        if let Some(p) = points.iter().find(|p| !p.rate.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "par rate at {}M is not finite",
                p.tenor
            )));
        }

        for tenor in ANCHOR_TENORS {
            if points.binary_search_by_key(&tenor, |p| p.tenor).is_err() {
                return Err(CurveError::MissingAnchorTenor { tenor });
            }
        }

        Ok(Self {
            observation_date,
            points,
        })
    }

    /// Date the quotes were observed.
    #[must_use]
    pub fn observation_date(&self) -> Date {
        self.observation_date
    }

    /// The quoted points, ascending by tenor.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Quoted rate at `tenor`, if quoted.
    #[must_use]
    pub fn rate_at(&self, tenor: u32) -> Option<f64> {
        self.points
            .binary_search_by_key(&tenor, |p| p.tenor)
            .ok()
            .map(|i| self.points[i].rate)
    }

    /// Interpolates the quotes onto `grid` with a not-a-knot spline.
    pub fn interpolate(&self, grid: &TenorGrid) -> CurveResult<InterpolatedCurve> {
        self.interpolate_with(grid, SplineBoundary::default())
    }

    /// Interpolates the quotes onto `grid` with an explicit end condition.
    pub fn interpolate_with(
        &self,
        grid: &TenorGrid,
        boundary: SplineBoundary,
    ) -> CurveResult<InterpolatedCurve> {
        let points = interpolate_with(&self.points, grid, boundary)?;
        log::debug!(
            "par curve {} interpolated onto {} tenors ({}M..{}M)",
            self.observation_date,
            points.len(),
            grid.start(),
            grid.end()
        );
        Ok(InterpolatedCurve::from_parts(
            self.observation_date,
            *grid,
            points,
        ))
    }
}
