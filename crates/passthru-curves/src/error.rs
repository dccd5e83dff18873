//! Error types for curve operations.
//!
//! Construction errors (knots, anchors, grids) are raised before any
//! arithmetic runs; [`CurveError::CurveInversion`] is the one numerical
//! failure the bootstrap can hit.

use passthru_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Fewer knots than a cubic spline needs.
    #[error("Insufficient knots: need at least {required}, got {got}")]
    InsufficientKnots {
        /// Minimum required knots.
        required: usize,
        /// Actual number of knots provided.
        got: usize,
    },

    /// Knot tenors are not strictly increasing.
    #[error("Non-monotonic knot tenors at index {index}: {prev} >= {current}")]
    NonMonotonicKnots {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor in months.
        prev: u32,
        /// Offending tenor in months.
        current: u32,
    },

    /// A required anchor tenor is absent from a par curve.
    #[error("Par curve is missing anchor tenor {tenor}M")]
    MissingAnchorTenor {
        /// The missing tenor in months.
        tenor: u32,
    },

    /// Tenor must be positive.
    #[error("Invalid tenor {tenor}M: par curve tenors must be > 0")]
    InvalidTenor {
        /// The offending tenor in months.
        tenor: u32,
    },

    /// The bootstrap found a non-positive discount base.
    #[error(
        "Curve inversion at {tenor}M: face minus intermediate coupons is {discount_base:.6}"
    )]
    CurveInversion {
        /// Tenor being solved in months.
        tenor: u32,
        /// `100 - int_cf`, which must be positive.
        discount_base: f64,
    },

    /// The grid does not fit the requested operation.
    #[error("Invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },

    /// A tenor lookup fell outside the curve.
    #[error("Tenor {requested:.4}M out of range [{min}M, {max}M]")]
    TenorOutOfRange {
        /// The requested tenor in months.
        requested: f64,
        /// Smallest tenor on the curve.
        min: u32,
        /// Largest tenor on the curve.
        max: u32,
    },

    /// Invalid value (NaN, Inf, or length mismatch).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Mathematical error from the spline layer.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the mathematical error.
        reason: String,
    },
}

impl CurveError {
    /// Creates an insufficient knots error.
    #[must_use]
    pub fn insufficient_knots(required: usize, got: usize) -> Self {
        Self::InsufficientKnots { required, got }
    }

    /// Creates a non-monotonic knots error.
    #[must_use]
    pub fn non_monotonic_knots(index: usize, prev: u32, current: u32) -> Self {
        Self::NonMonotonicKnots {
            index,
            prev,
            current,
        }
    }

    /// Creates an invalid grid error.
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// Creates a tenor out of range error.
    #[must_use]
    pub fn tenor_out_of_range(requested: f64, min: u32, max: u32) -> Self {
        Self::TenorOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::MathError {
            reason: err.to_string(),
        }
    }
}
