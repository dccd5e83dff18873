//! Cubic-spline interpolation of sparse quotes onto a regular grid.
//!
//! The same routine builds the dense par curve from published quotes and
//! re-grids a semi-annual spot curve to monthly.

use passthru_math::interpolation::{CubicSpline, Interpolator, SplineBoundary, MIN_KNOTS};

use crate::error::{CurveError, CurveResult};
use crate::types::{CurvePoint, TenorGrid};

/// Interpolates `knots` onto every tenor of `grid` with a not-a-knot spline.
///
/// Grid tenors outside the knot range are evaluated on the end segment's
/// cubic. Values at grid tenors that coincide with a knot equal the knot
/// rate exactly.
///
/// # Errors
///
/// * `CurveError::InsufficientKnots` with fewer than 4 knots.
/// * `CurveError::NonMonotonicKnots` if tenors are not strictly increasing.
/// * `CurveError::InvalidValue` if a rate is not finite.
///
/// # Example
///
/// ```rust
/// use passthru_curves::{interpolate, CurvePoint, TenorGrid};
///
/// let knots: Vec<CurvePoint> = [(1, 5.5), (6, 5.4), (12, 5.0), (24, 4.5), (60, 4.1)]
///     .into_iter()
///     .map(CurvePoint::from)
///     .collect();
/// let grid = TenorGrid::new(0, 60, 6).unwrap();
///
/// let dense = interpolate(&knots, &grid).unwrap();
/// assert_eq!(dense.len(), 11);
/// assert_eq!(dense[2].rate, 5.0);
/// ```
pub fn interpolate(knots: &[CurvePoint], grid: &TenorGrid) -> CurveResult<Vec<CurvePoint>> {
    interpolate_with(knots, grid, SplineBoundary::default())
}

/// Interpolates `knots` onto `grid` with an explicit spline end condition.
///
/// See [`interpolate`] for the contract.
pub fn interpolate_with(
    knots: &[CurvePoint],
    grid: &TenorGrid,
    boundary: SplineBoundary,
) -> CurveResult<Vec<CurvePoint>> {
    validate_knots(knots)?;

    let xs: Vec<f64> = knots.iter().map(|p| f64::from(p.tenor)).collect();
    let ys: Vec<f64> = knots.iter().map(|p| p.rate).collect();
    let spline = CubicSpline::new(xs, ys, boundary)?.with_extrapolation();

    let points = grid
        .tenors()
        .map(|tenor| {
            spline
                .interpolate(f64::from(tenor))
                .map(|rate| CurvePoint::new(tenor, rate))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::trace!(
        "interpolated {} knots onto {} grid tenors ({:?})",
        knots.len(),
        points.len(),
        boundary
    );

    Ok(points)
}

fn validate_knots(knots: &[CurvePoint]) -> CurveResult<()> {
    if knots.len() < MIN_KNOTS {
        return Err(CurveError::insufficient_knots(MIN_KNOTS, knots.len()));
    }

    for (i, w) in knots.windows(2).enumerate() {
        if w[1].tenor <= w[0].tenor {
            return Err(CurveError::non_monotonic_knots(i + 1, w[0].tenor, w[1].tenor));
        }
    }

    if let Some(p) = knots.iter().find(|p| !p.rate.is_finite()) {
        return Err(CurveError::invalid_value(format!(
            "rate at {}M is not finite",
            p.tenor
        )));
    }

    Ok(())
}
