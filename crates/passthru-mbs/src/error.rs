//! Error types for mortgage cash flow operations.

use passthru_core::CoreError;
use thiserror::Error;

/// A specialized Result type for mortgage cash flow operations.
pub type MbsResult<T> = Result<T, MbsError>;

/// Errors that can occur while generating or summarising a schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MbsError {
    /// Pool terms or conventions that cannot produce a schedule.
    #[error("Invalid schedule parameters: {reason}")]
    InvalidScheduleParameters {
        /// Description of what's invalid.
        reason: String,
    },

    /// The schedule returns no principal, so WAL is undefined.
    #[error("Schedule pays no principal (total {total}), WAL is undefined")]
    ZeroPrincipal {
        /// Total principal across the schedule.
        total: f64,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),
}

impl MbsError {
    /// Creates an invalid schedule parameters error.
    #[must_use]
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidScheduleParameters {
            reason: reason.into(),
        }
    }

    /// Creates a zero principal error.
    #[must_use]
    pub fn zero_principal(total: f64) -> Self {
        Self::ZeroPrincipal { total }
    }
}
