//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//! - [`newton_raphson_numerical`]: Newton with a central-difference derivative
//! - [`secant`]: Derivative-free method seeded with two points
//! - [`newton_secant`]: Numerical Newton that falls back to secant when the
//!   derivative vanishes or a step leaves the domain of `f`
//!
//! Every solver treats a NaN or infinite function value as a hard failure
//! ([`MathError::NonFinite`](crate::MathError::NonFinite)) rather than
//! iterating on it.
//!
//! # Example
//!
//! ```rust
//! use passthru_math::solvers::{newton_secant, SolverConfig};
//!
//! // Price of a 5-period annuity of 5 plus 100 at maturity, target 95.
//! let price = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv + 100.0 / (1.0 + y).powi(5) - 95.0
//! };
//!
//! let result = newton_secant(price, 0.05, 1e-6, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod newton;
mod secant;

pub use newton::{newton_raphson, newton_raphson_numerical, newton_secant};
pub use secant::secant;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Smallest derivative magnitude a Newton step will divide by.
pub const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence is declared when `|f(x)| <= tolerance`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Iteration scheme that produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Newton-Raphson.
    Newton,
    /// Secant, either directly or as a Newton fallback.
    Secant,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMethod::Newton => write!(f, "Newton-Raphson"),
            SolverMethod::Secant => write!(f, "Secant"),
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Scheme that produced the root.
    pub method: SolverMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    /// Level-pay annuity price at a monthly rate, per 100 of balance.
    fn annuity_price(monthly_yield: f64, monthly_coupon: f64, months: i32) -> f64 {
        let payment = 100.0 * monthly_coupon / (1.0 - (1.0 + monthly_coupon).powi(-months));
        (1..=months)
            .map(|t| payment / (1.0 + monthly_yield).powi(t))
            .sum()
    }

    #[test]
    fn test_annuity_yield_all_solvers_agree() {
        let cm = 0.07 / 12.0;
        let f = |y: f64| annuity_price(y, cm, 360) - 97.5;
        let config = SolverConfig::default();

        let newton = newton_raphson_numerical(f, cm, 1e-7, &config).unwrap();
        let sec = secant(f, cm, cm * 1.1, &config).unwrap();
        let hybrid = newton_secant(f, cm, 1e-7, &config).unwrap();

        assert!(newton.root > cm);
        assert_relative_eq!(newton.root, sec.root, epsilon = 1e-9);
        assert_relative_eq!(newton.root, hybrid.root, epsilon = 1e-9);
        assert_eq!(hybrid.method, SolverMethod::Newton);
    }

    #[test]
    fn test_par_annuity_yield_equals_coupon() {
        let cm = 0.06 / 12.0;
        let f = |y: f64| annuity_price(y, cm, 120) - 100.0;

        let result = newton_secant(f, 0.004, 1e-7, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, cm, epsilon = 1e-10);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(SolverMethod::Newton.to_string(), "Newton-Raphson");
        assert_eq!(SolverMethod::Secant.to_string(), "Secant");
    }
}
