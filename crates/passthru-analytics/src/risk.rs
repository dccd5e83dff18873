//! Spread risk.
//!
//! Spread DV01 and spread duration by central difference of the spread
//! price. A parallel spread bump shifts the discount yield one for one, so
//! these are also the effective yield sensitivities of the schedule as
//! generated (prepayments held fixed).

use passthru_core::types::{Date, Spread};
use passthru_curves::RateCurve;
use passthru_mbs::AmortizationSchedule;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::{PriceInputs, PricingEngine};

/// Spread bump for risk measures, in basis points.
pub const RISK_BUMP_BPS: f64 = 1.0;

/// Spread sensitivities at a given spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadRisk {
    /// Price per 100 at the spread.
    pub price: f64,
    /// Price change per 100 for a 1bp spread widening (positive).
    pub dv01: f64,
    /// Percentage price change per 100bp of spread.
    pub duration: f64,
}

impl SpreadRisk {
    /// Computes spread risk with the given engine.
    ///
    /// # Errors
    ///
    /// Returns any pricing error at the base or bumped spreads, or
    /// `AnalyticsError::InvalidInput` if the base price is zero.
    pub fn compute(
        engine: &PricingEngine,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        settlement: Date,
        spread: &Spread,
    ) -> AnalyticsResult<Self> {
        let inputs = PriceInputs::new(schedule, curve, settlement)?;
        let bps = spread.as_bps_f64();
        let spread_type = spread.spread_type();
        let price_at = |s: f64| {
            engine
                .price_prepared(&inputs, schedule, curve, s, spread_type)
                .map(|quote| quote.price)
        };

        let price = price_at(bps)?;
        let down = price_at(bps - RISK_BUMP_BPS)?;
        let up = price_at(bps + RISK_BUMP_BPS)?;

        if price.abs() < 1e-10 {
            return Err(AnalyticsError::invalid_input("base price is zero"));
        }

        let dv01 = (down - up) / (2.0 * RISK_BUMP_BPS);
        Ok(Self {
            price,
            dv01,
            duration: dv01 / price * 10_000.0,
        })
    }
}

/// Spread DV01: `(P(s - 1bp) - P(s + 1bp)) / 2`, per 100.
///
/// # Errors
///
/// See [`SpreadRisk::compute`].
pub fn spread_dv01(
    schedule: &AmortizationSchedule,
    curve: &dyn RateCurve,
    settlement: Date,
    spread: &Spread,
) -> AnalyticsResult<f64> {
    SpreadRisk::compute(&PricingEngine::new(), schedule, curve, settlement, spread)
        .map(|risk| risk.dv01)
}

/// Spread duration: `dv01 / P * 10_000`.
///
/// # Errors
///
/// See [`SpreadRisk::compute`].
pub fn spread_duration(
    schedule: &AmortizationSchedule,
    curve: &dyn RateCurve,
    settlement: Date,
    spread: &Spread,
) -> AnalyticsResult<f64> {
    SpreadRisk::compute(&PricingEngine::new(), schedule, curve, settlement, spread)
        .map(|risk| risk.duration)
}
