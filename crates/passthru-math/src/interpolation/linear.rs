//! Two-point linear interpolation.

use crate::error::{MathError, MathResult};

/// Interpolates linearly between `(x0, y0)` and `(x1, y1)` at `x`.
///
/// `x` is not required to lie inside the bracket; callers that need a
/// strict bracket check it themselves.
///
/// # Example
///
/// ```rust
/// use passthru_math::interpolation::linear;
///
/// let y = linear(60.0, 4.09, 84.0, 4.08, 72.0).unwrap();
/// assert!((y - 4.085).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Returns `MathError::DivisionByZero` if `x0 == x1`.
pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> MathResult<f64> {
    let h = x1 - x0;
    if h == 0.0 {
        return Err(MathError::DivisionByZero { value: h });
    }
    Ok(y0 + (y1 - y0) * (x - x0) / h)
}
