//! Spread types for curve-relative pricing.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use crate::error::{CoreError, CoreResult};

/// How a spread is applied to the benchmark curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpreadType {
    /// Interpolated spread: one offset added to the curve yield at the WAL point,
    /// every cash flow discounted at that single yield.
    ISpread,
    /// Zero-volatility spread: the offset is added to every spot rate and each
    /// cash flow is discounted at its own point.
    #[default]
    ZSpread,
}

impl fmt::Display for SpreadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpreadType::ISpread => "I-Spread",
            SpreadType::ZSpread => "Z-Spread",
        };
        write!(f, "{name}")
    }
}

/// A spread value in basis points.
///
/// Curves in Passthru quote rates in percent, so a spread enters the yield
/// math as `bps / 100`.
///
/// # Example
///
/// ```rust
/// use passthru_core::types::{Spread, SpreadType};
/// use rust_decimal_macros::dec;
///
/// let spread = Spread::new(dec!(125), SpreadType::ISpread);
/// assert_eq!(spread.as_bps(), dec!(125));
/// assert_eq!(spread.as_percentage(), dec!(1.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    /// Spread value in basis points
    value_bps: Decimal,
    /// How the spread is applied
    spread_type: SpreadType,
}

impl Spread {
    /// Creates a new spread from basis points.
    #[must_use]
    pub fn new(bps: Decimal, spread_type: SpreadType) -> Self {
        Self {
            value_bps: bps,
            spread_type,
        }
    }

    /// Creates a spread from an `f64` basis-point value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSpread` if the value is not finite or does
    /// not fit a `Decimal`.
    pub fn from_bps_f64(bps: f64, spread_type: SpreadType) -> CoreResult<Self> {
        if !bps.is_finite() {
            return Err(CoreError::invalid_spread(bps, "spread must be finite"));
        }
        let value_bps = Decimal::from_f64_retain(bps)
            .ok_or_else(|| CoreError::invalid_spread(bps, "spread does not fit a decimal"))?;
        Ok(Self::new(value_bps, spread_type))
    }

    /// Creates a spread from an integer basis point value.
    #[must_use]
    pub fn from_bps_i32(bps: i32, spread_type: SpreadType) -> Self {
        Self::new(Decimal::from(bps), spread_type)
    }

    /// Returns the spread in basis points.
    #[must_use]
    pub fn as_bps(&self) -> Decimal {
        self.value_bps
    }

    /// Returns the spread in basis points as `f64`.
    ///
    /// # Panics
    ///
    /// Never in practice: every `Decimal` is within `f64` range.
    #[must_use]
    pub fn as_bps_f64(&self) -> f64 {
        self.value_bps
            .to_f64()
            .expect("decimal spread should always convert to f64")
    }

    /// Returns the spread as a percentage (125 bps = 1.25).
    #[must_use]
    pub fn as_percentage(&self) -> Decimal {
        self.value_bps / Decimal::ONE_HUNDRED
    }

    /// Returns the spread as a percentage in `f64`, the unit curve rates use.
    #[must_use]
    pub fn as_percentage_f64(&self) -> f64 {
        self.as_bps_f64() / 100.0
    }

    /// Returns the spread type.
    #[must_use]
    pub fn spread_type(&self) -> SpreadType {
        self.spread_type
    }

    /// Returns true if the spread is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value_bps.is_zero()
    }

    /// Rounds the spread to `dp` decimal places of a basis point.
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Self {
        Self::new(self.value_bps.round_dp(dp), self.spread_type)
    }
}

impl Neg for Spread {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.value_bps, self.spread_type)
    }
}

impl PartialOrd for Spread {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.spread_type != other.spread_type {
            None
        } else {
            self.value_bps.partial_cmp(&other.value_bps)
        }
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps ({})", self.value_bps, self.spread_type)
    }
}
