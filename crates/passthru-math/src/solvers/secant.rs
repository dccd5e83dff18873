//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but approximates the derivative using
/// the slope through the two most recent iterates. Does not require
/// an analytical derivative or a bracketing interval.
///
/// Convergence rate is superlinear (order ~1.618, the golden ratio).
/// Convergence is declared on the residual alone: `|f(x)| <= tolerance`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use passthru_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = f(x_prev);
    let mut f_curr = f(x_curr);

    if !f_prev.is_finite() {
        return Err(MathError::NonFinite { x: x_prev });
    }
    if !f_curr.is_finite() {
        return Err(MathError::NonFinite { x: x_curr });
    }

    for iteration in 0..config.max_iterations {
        if f_curr.abs() <= config.tolerance {
            log::debug!("secant converged in {iteration} iterations: root = {x_curr}");
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
                method: SolverMethod::Secant,
            });
        }

        // Parallel secant line
        let denom = f_curr - f_prev;
        if denom.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        let f_next = f(x_next);
        log::trace!("secant iteration {iteration}: x = {x_next}, f = {f_next:e}");

        if !f_next.is_finite() {
            return Err(MathError::NonFinite { x: x_next });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
    }

    if f_curr.abs() <= config.tolerance {
        return Ok(SolverResult {
            root: x_curr,
            iterations: config.max_iterations,
            residual: f_curr,
            method: SolverMethod::Secant,
        });
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(result.method, SolverMethod::Secant);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;

        let result = secant(f, 2.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        let f = |x: f64| x.sin();

        let result = secant(f, 3.0, 3.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_secant_line() {
        let f = |_x: f64| 1.0;

        let result = secant(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_non_finite_seed() {
        let f = |x: f64| x.sqrt() - 1.0;

        assert!(matches!(
            secant(f, -1.0, 2.0, &SolverConfig::default()),
            Err(MathError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_max_iterations() {
        let f = |x: f64| x * x * x - 27.0;
        let config = SolverConfig::new(1e-15, 2);

        let result = secant(f, 0.0, 10.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 2, .. })
        ));
    }
}
