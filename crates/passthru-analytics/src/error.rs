//! Error types for pricing and spread analytics.

use passthru_core::CoreError;
use passthru_curves::CurveError;
use passthru_math::MathError;
use passthru_mbs::MbsError;
use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur while pricing a schedule or solving for a spread.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The curve cannot bracket a tenor the pricing needs.
    #[error("Tenor {months:.4}M is outside the curve range [{min}, {max}]")]
    CurveRange {
        /// Requested tenor in months.
        months: f64,
        /// First curve tenor.
        min: u32,
        /// Last curve tenor.
        max: u32,
    },

    /// The spread solver ran out of iterations.
    #[error("Spread solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergence {
        /// Iterations attempted.
        iterations: u32,
        /// Final price residual.
        residual: f64,
    },

    /// A trial spread drove the pricing out of its valid domain.
    #[error("Spread {spread_bps:.4} bps is out of bounds: {reason}")]
    OutOfBounds {
        /// The offending spread.
        spread_bps: f64,
        /// What went out of range.
        reason: String,
    },

    /// The spread-adjusted yield has no valid transform.
    #[error("Invalid yield: {reason}")]
    InvalidYield {
        /// Description of the failure.
        reason: String,
    },

    /// Invalid input.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what's invalid.
        reason: String,
    },

    /// Solver failure other than non-convergence.
    #[error("Solver error: {0}")]
    Solver(MathError),

    /// Curve library error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Cash flow library error.
    #[error("Cash flow error: {0}")]
    Mbs(#[from] MbsError),

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Creates an out of bounds error.
    #[must_use]
    pub fn out_of_bounds(spread_bps: f64, reason: impl Into<String>) -> Self {
        Self::OutOfBounds {
            spread_bps,
            reason: reason.into(),
        }
    }

    /// Creates an invalid yield error.
    #[must_use]
    pub fn invalid_yield(reason: impl Into<String>) -> Self {
        Self::InvalidYield {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => Self::NonConvergence {
                iterations,
                residual,
            },
            other => Self::Solver(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_failure_maps_to_non_convergence() {
        let err: AnalyticsError = MathError::convergence_failed(1000, 0.5).into();
        assert_eq!(
            err,
            AnalyticsError::NonConvergence {
                iterations: 1000,
                residual: 0.5
            }
        );
    }

    #[test]
    fn test_upstream_kinds_are_preserved() {
        let err: AnalyticsError = MbsError::zero_principal(0.0).into();
        assert!(matches!(err, AnalyticsError::Mbs(MbsError::ZeroPrincipal { .. })));

        let err: AnalyticsError = CurveError::insufficient_knots(4, 2).into();
        assert!(matches!(
            err,
            AnalyticsError::Curve(CurveError::InsufficientKnots { .. })
        ));
    }

    #[test]
    fn test_display() {
        let err = AnalyticsError::CurveRange {
            months: 400.5,
            min: 1,
            max: 360,
        };
        assert_eq!(
            err.to_string(),
            "Tenor 400.5000M is outside the curve range [1, 360]"
        );

        let err = AnalyticsError::out_of_bounds(-25_000.0, "1 + bey/200 <= 0");
        assert!(err.to_string().contains("out of bounds"));
    }
}
