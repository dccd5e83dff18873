//! Cubic spline interpolation.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Minimum number of knots for a cubic spline.
///
/// Four points pin down one cubic; the not-a-knot condition needs them.
pub const MIN_KNOTS: usize = 4;

/// End condition used to close the spline system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplineBoundary {
    /// The first two and last two segments are the same cubic.
    #[default]
    NotAKnot,
    /// Second derivative is zero at both end knots.
    Natural,
}

/// Piecewise cubic spline through a set of knots.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives. Evaluation at
/// a knot returns the knot value bit-for-bit.
///
/// # Example
///
/// ```rust
/// use passthru_math::interpolation::{CubicSpline, Interpolator, SplineBoundary};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 8.0, 27.0];
///
/// let spline = CubicSpline::new(xs, ys, SplineBoundary::NotAKnot).unwrap();
/// assert!((spline.interpolate(1.5).unwrap() - 3.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
    boundary: SplineBoundary,
    allow_extrapolation: bool,
}

impl CubicSpline {
    /// Creates a cubic spline interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    /// * `boundary` - End condition
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 4 points, if lengths differ,
    /// if x values are not strictly increasing, or if any value is not finite.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, boundary: SplineBoundary) -> MathResult<Self> {
        if xs.len() < MIN_KNOTS {
            return Err(MathError::insufficient_data(MIN_KNOTS, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("knots must be finite"));
        }

        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(MathError::NonMonotonic {
                    index: i,
                    prev: xs[i - 1],
                    current: xs[i],
                });
            }
        }

        let y2s = match boundary {
            SplineBoundary::Natural => natural_second_derivatives(&xs, &ys),
            SplineBoundary::NotAKnot => not_a_knot_second_derivatives(&xs, &ys)?,
        };

        Ok(Self {
            xs,
            ys,
            y2s,
            boundary,
            allow_extrapolation: false,
        })
    }

    /// Creates a natural cubic spline.
    pub fn natural(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(xs, ys, SplineBoundary::Natural)
    }

    /// Creates a not-a-knot cubic spline.
    pub fn not_a_knot(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(xs, ys, SplineBoundary::NotAKnot)
    }

    /// Enables extrapolation beyond the data range.
    ///
    /// Points outside the knots are evaluated on the end segment's cubic.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the end condition the spline was built with.
    #[must_use]
    pub fn boundary(&self) -> SplineBoundary {
        self.boundary
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(self.xs.len() - 2),
            Err(i) => (i.saturating_sub(1)).min(self.xs.len() - 2),
        }
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let i = self.find_segment(x);

        let x_lo = self.xs[i];
        let x_hi = self.xs[i + 1];
        let y_lo = self.ys[i];
        let y_hi = self.ys[i + 1];
        let y2_lo = self.y2s[i];
        let y2_hi = self.y2s[i + 1];

        let h = x_hi - x_lo;
        let a = (x_hi - x) / h;
        let b = (x - x_lo) / h;

        let y = a * y_lo
            + b * y_hi
            + ((a * a * a - a) * y2_lo + (b * b * b - b) * y2_hi) * (h * h) / 6.0;

        Ok(y)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let i = self.find_segment(x);

        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        let dy = (self.ys[i + 1] - self.ys[i]) / h
            - (3.0 * a * a - 1.0) / 6.0 * h * self.y2s[i]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.y2s[i + 1];

        Ok(dy)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Computes the second derivatives for a natural cubic spline.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut u = vec![0.0; n - 1];

    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    y2s[n - 1] = 0.0;

    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + u[i];
    }

    y2s
}

/// Computes the second derivatives for a not-a-knot cubic spline.
///
/// The interior unknowns M_1..M_{n-2} satisfy the usual continuity rows.
/// The end conditions
///
/// ```text
/// M_0     = M_1 (1 + h_0/h_1)         - M_2 h_0/h_1
/// M_{n-1} = M_{n-2} (1 + h_{n-2}/h_{n-3}) - M_{n-3} h_{n-2}/h_{n-3}
/// ```
///
/// are substituted into the first and last rows, which keeps the system
/// tridiagonal.
fn not_a_knot_second_derivatives(xs: &[f64], ys: &[f64]) -> MathResult<Vec<f64>> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slope = |i: usize| (ys[i + 1] - ys[i]) / h[i];

    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for r in 0..m {
        let i = r + 1;
        sub[r] = h[i - 1];
        diag[r] = 2.0 * (h[i - 1] + h[i]);
        sup[r] = h[i];
        rhs[r] = 6.0 * (slope(i) - slope(i - 1));
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] = 3.0 * h0 + 2.0 * h1 + h0 * h0 / h1;
    sup[0] = h1 - h0 * h0 / h1;
    sub[0] = 0.0;

    let (ha, hb) = (h[n - 3], h[n - 2]);
    sub[m - 1] = ha - hb * hb / ha;
    diag[m - 1] = 2.0 * ha + 3.0 * hb + hb * hb / ha;
    sup[m - 1] = 0.0;

    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

    let mut y2s = vec![0.0; n];
    y2s[1..n - 1].copy_from_slice(&interior);
    y2s[0] = y2s[1] * (1.0 + h0 / h1) - y2s[2] * h0 / h1;
    y2s[n - 1] = y2s[n - 2] * (1.0 + hb / ha) - y2s[n - 3] * hb / ha;

    Ok(y2s)
}

/// Thomas algorithm for a tridiagonal system.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> MathResult<Vec<f64>> {
    let m = diag.len();
    let mut c = vec![0.0; m];
    let mut d = vec![0.0; m];

    let mut denom = diag[0];
    for r in 0..m {
        if r > 0 {
            denom = diag[r] - sub[r] * c[r - 1];
        }
        if denom.abs() < f64::EPSILON {
            return Err(MathError::DivisionByZero { value: denom });
        }
        c[r] = sup[r] / denom;
        d[r] = if r == 0 {
            rhs[0] / denom
        } else {
            (rhs[r] - sub[r] * d[r - 1]) / denom
        };
    }

    let mut x = vec![0.0; m];
    x[m - 1] = d[m - 1];
    for r in (0..m - 1).rev() {
        x[r] = d[r] - c[r] * x[r + 1];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn treasury_knots() -> (Vec<f64>, Vec<f64>) {
        let xs = vec![
            1.0, 2.0, 3.0, 5.0, 6.0, 12.0, 24.0, 36.0, 60.0, 84.0, 120.0, 240.0, 360.0,
        ];
        let ys = vec![
            5.54, 5.50, 5.47, 5.42, 5.37, 5.03, 4.48, 4.30, 4.09, 4.08, 4.09, 4.35, 4.26,
        ];
        (xs, ys)
    }

    #[test]
    fn test_passes_through_knots_exactly() {
        let (xs, ys) = treasury_knots();
        for boundary in [SplineBoundary::NotAKnot, SplineBoundary::Natural] {
            let spline = CubicSpline::new(xs.clone(), ys.clone(), boundary).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                assert_eq!(spline.interpolate(*x).unwrap(), *y);
            }
        }
    }

    #[test]
    fn test_not_a_knot_reproduces_cubic() {
        // A single cubic through the knots is its own not-a-knot spline.
        let f = |x: f64| 0.5 * x * x * x - 2.0 * x * x + x + 3.0;
        let xs = vec![0.0, 1.0, 2.5, 4.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();

        let spline = CubicSpline::not_a_knot(xs, ys).unwrap().with_extrapolation();

        for x in [0.3, 1.7, 3.2, 5.5, 6.9, -0.5, 7.5] {
            assert_relative_eq!(spline.interpolate(x).unwrap(), f(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_natural_has_zero_end_curvature() {
        let (xs, ys) = treasury_knots();
        let spline = CubicSpline::natural(xs, ys).unwrap();
        assert_eq!(spline.y2s[0], 0.0);
        assert_eq!(spline.y2s[spline.y2s.len() - 1], 0.0);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let (xs, ys) = treasury_knots();
        let spline = CubicSpline::not_a_knot(xs, ys).unwrap();

        for x in [4.0, 18.0, 90.0, 300.0] {
            let h = 1e-5;
            let numerical = (spline.interpolate(x + h).unwrap() - spline.interpolate(x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(spline.derivative(x).unwrap(), numerical, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_extrapolation_error() {
        let (xs, ys) = treasury_knots();
        let spline = CubicSpline::not_a_knot(xs.clone(), ys.clone()).unwrap();

        assert!(matches!(
            spline.interpolate(0.0),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        assert!(spline.interpolate(361.0).is_err());

        let spline = CubicSpline::not_a_knot(xs, ys).unwrap().with_extrapolation();
        assert!(spline.interpolate(0.0).unwrap().is_finite());
    }

    #[test]
    fn test_insufficient_points() {
        let err = CubicSpline::not_a_knot(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            MathError::InsufficientData {
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_monotonic() {
        let err =
            CubicSpline::natural(vec![0.0, 2.0, 1.0, 3.0], vec![0.0, 1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MathError::NonMonotonic { index: 2, .. }));

        let err =
            CubicSpline::natural(vec![0.0, 1.0, 1.0, 3.0], vec![0.0, 1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MathError::NonMonotonic { index: 2, .. }));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(CubicSpline::natural(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]).is_err());
    }
}
