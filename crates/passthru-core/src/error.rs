//! Error types for the Passthru core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid spread value.
    #[error("Invalid spread: {value} bps - {reason}")]
    InvalidSpread {
        /// The offending value in basis points.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid spread error.
    #[must_use]
    pub fn invalid_spread(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidSpread {
            value,
            reason: reason.into(),
        }
    }
}
