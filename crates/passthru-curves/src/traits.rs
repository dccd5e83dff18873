//! The read interface shared by dense curves.

use passthru_core::types::Date;
use passthru_math::interpolation::linear;

use crate::error::{CurveError, CurveResult};
use crate::types::{CurvePoint, TenorGrid};

/// A dense curve of rates on a regular tenor grid.
///
/// Implemented by [`InterpolatedCurve`](crate::InterpolatedCurve) (par
/// yields, the I-spread benchmark) and [`SpotCurve`](crate::SpotCurve)
/// (zero yields, the Z-spread benchmark). Pricing code is written against
/// this trait so either can be passed.
pub trait RateCurve: Send + Sync {
    /// Date the source quotes were observed.
    fn observation_date(&self) -> Date;

    /// Grid the curve is defined on.
    fn grid(&self) -> TenorGrid;

    /// One point per grid tenor, ascending.
    fn points(&self) -> &[CurvePoint];

    /// Smallest tenor on the curve.
    fn min_tenor(&self) -> u32 {
        self.grid().start()
    }

    /// Largest tenor on the curve.
    fn max_tenor(&self) -> u32 {
        self.grid().end()
    }

    /// Rate at an exact grid tenor, or `None` if `tenor` is not a grid point.
    fn rate_at(&self, tenor: u32) -> Option<f64> {
        self.grid()
            .index_of(tenor)
            .and_then(|i| self.points().get(i))
            .map(|p| p.rate)
    }

    /// Linearly interpolated rate at a fractional tenor.
    ///
    /// The upper bracket is the first grid tenor strictly greater than
    /// `months` and the lower bracket is the tenor before it.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::TenorOutOfRange` when either bracket is missing:
    /// `months` below the first tenor, or at or beyond the last one.
    fn linear_rate(&self, months: f64) -> CurveResult<f64> {
        let points = self.points();
        let out_of_range =
            || CurveError::tenor_out_of_range(months, self.min_tenor(), self.max_tenor());

        if !months.is_finite() {
            return Err(out_of_range());
        }

        let upper = points
            .iter()
            .position(|p| f64::from(p.tenor) > months)
            .ok_or_else(out_of_range)?;
        if upper == 0 {
            return Err(out_of_range());
        }

        let lo = points[upper - 1];
        let hi = points[upper];
        Ok(linear(
            f64::from(lo.tenor),
            lo.rate,
            f64::from(hi.tenor),
            hi.rate,
            months,
        )?)
    }
}
