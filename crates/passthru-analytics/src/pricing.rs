//! Spread pricing of pass-through cash flows.
//!
//! A schedule is priced per 100 of current balance from a benchmark curve
//! plus a spread:
//!
//! - **I-spread**: the curve yield at the WAL plus the spread gives a flat
//!   BEY, converted to a monthly-compounded MEY, which discounts every cash
//!   flow.
//! - **Z-spread**: every monthly spot rate is shifted by the spread and each
//!   cash flow is discounted at its own tenor.
//!
//! In both modes accrued interest since the first of the settlement month is
//! deducted, and the stub from settlement to the first pay date is
//! discounted at the flat MEY.

use passthru_core::types::{Date, Spread, SpreadType};
use passthru_curves::{CurveError, RateCurve};
use passthru_mbs::{weighted_average_life, AmortizationSchedule};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Day-count basis for accrued interest and the stub discount.
pub const DAYS_PER_YEAR_30_360: f64 = 360.0;

/// Discounting of the stub between settlement and the first pay date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StubDiscount {
    /// Simple discount at the flat MEY over `days / 360`.
    #[default]
    FlatMey,
    /// No stub discount.
    None,
}

/// Conventions applied by the [`PricingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PricingConventions {
    /// Stub discount between settlement and the first pay date.
    pub stub_discount: StubDiscount,
}

impl PricingConventions {
    /// Sets the stub discount.
    #[must_use]
    pub fn with_stub_discount(mut self, stub_discount: StubDiscount) -> Self {
        self.stub_discount = stub_discount;
        self
    }
}

/// Full breakdown of a spread price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Price per 100 of current balance.
    pub price: f64,
    /// Accrued interest in currency units.
    pub accrued_interest: f64,
    /// Weighted average life in years.
    pub wal_years: f64,
    /// Curve yield interpolated at the WAL (percent).
    pub benchmark_yield: f64,
    /// Bond-equivalent yield: benchmark yield plus spread (percent).
    pub bey: f64,
    /// Mortgage-equivalent yield (percent).
    pub mey: f64,
    /// Days from settlement to the first pay date.
    pub days_to_first_pay: i64,
    /// Spread the price was computed at.
    pub spread: Spread,
}

/// Converts a semi-annual bond-equivalent yield to a monthly mortgage yield.
///
/// `mey = 12 * ((1 + bey/200)^(2/12) - 1) * 100`, both in percent.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidYield` if `1 + bey/200 <= 0` or the
/// result is not finite.
pub fn bey_to_mey(bey: f64) -> AnalyticsResult<f64> {
    let base = 1.0 + bey / 200.0;
    if !(base > 0.0 && base.is_finite()) {
        return Err(AnalyticsError::invalid_yield(format!(
            "BEY {bey} gives a non-positive semi-annual growth factor"
        )));
    }
    Ok(12.0 * (base.powf(2.0 / 12.0) - 1.0) * 100.0)
}

/// Prices amortization schedules against a benchmark curve.
///
/// Stateless apart from its conventions, so one engine can be shared
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    conventions: PricingConventions,
}

impl PricingEngine {
    /// Creates an engine with default conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given conventions.
    #[must_use]
    pub fn with_conventions(conventions: PricingConventions) -> Self {
        Self { conventions }
    }

    /// The engine's conventions.
    #[must_use]
    pub fn conventions(&self) -> PricingConventions {
        self.conventions
    }

    /// Price per 100 of current balance.
    ///
    /// # Errors
    ///
    /// See [`PricingEngine::price_detailed`].
    pub fn price(
        &self,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        settlement: Date,
        spread: &Spread,
    ) -> AnalyticsResult<f64> {
        self.price_detailed(schedule, curve, settlement, spread)
            .map(|result| result.price)
    }

    /// Price with its yield, WAL and accrued breakdown.
    ///
    /// For Z-spread pricing the curve must carry a point at every period
    /// number, so re-grid a spot curve to monthly first.
    ///
    /// # Errors
    ///
    /// * `AnalyticsError::InvalidInput` for an empty schedule or a
    ///   non-positive starting balance.
    /// * `AnalyticsError::CurveRange` if the WAL cannot be bracketed on the
    ///   curve, or a Z-spread period has no curve point.
    /// * `AnalyticsError::InvalidYield` if the spread-adjusted yield or the
    ///   resulting price is not finite.
    /// * `AnalyticsError::Mbs` if the schedule pays no principal.
    pub fn price_detailed(
        &self,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        settlement: Date,
        spread: &Spread,
    ) -> AnalyticsResult<PriceResult> {
        let inputs = PriceInputs::new(schedule, curve, settlement)?;
        let quote = self.price_prepared(
            &inputs,
            schedule,
            curve,
            spread.as_bps_f64(),
            spread.spread_type(),
        )?;

        Ok(PriceResult {
            price: quote.price,
            accrued_interest: inputs.accrued,
            wal_years: inputs.wal_years,
            benchmark_yield: inputs.benchmark_yield,
            bey: quote.bey,
            mey: quote.mey,
            days_to_first_pay: inputs.days_to_first_pay,
            spread: *spread,
        })
    }

    /// Prices at `bps` of spread from inputs computed once per schedule.
    pub(crate) fn price_prepared(
        &self,
        inputs: &PriceInputs,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        bps: f64,
        spread_type: SpreadType,
    ) -> AnalyticsResult<Quote> {
        let bey = inputs.benchmark_yield + bps / 100.0;
        let mey = bey_to_mey(bey)?;

        let pv = match spread_type {
            SpreadType::ISpread => flat_present_value(schedule, mey),
            SpreadType::ZSpread => spot_present_value(schedule, curve, bps)?,
        };

        let stub = match self.conventions.stub_discount {
            StubDiscount::FlatMey => {
                1.0 + mey / 100.0 * inputs.days_to_first_pay as f64 / DAYS_PER_YEAR_30_360
            }
            StubDiscount::None => 1.0,
        };

        let price = (pv - inputs.accrued) * 100.0 / inputs.balance / stub;
        if !price.is_finite() {
            return Err(AnalyticsError::invalid_yield(format!(
                "price is not finite at {bps} bps ({spread_type})"
            )));
        }

        log::trace!("priced at {bps} bps {spread_type}: {price:.6} (bey {bey:.6}, mey {mey:.6})");

        Ok(Quote { price, bey, mey })
    }
}

/// Prices a schedule with the default conventions.
///
/// # Errors
///
/// See [`PricingEngine::price_detailed`].
pub fn price(
    schedule: &AmortizationSchedule,
    curve: &dyn RateCurve,
    settlement: Date,
    spread: &Spread,
) -> AnalyticsResult<f64> {
    PricingEngine::new().price(schedule, curve, settlement, spread)
}

/// Spread-dependent part of a price.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Quote {
    pub(crate) price: f64,
    pub(crate) bey: f64,
    pub(crate) mey: f64,
}

/// Spread-independent quantities of a price.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PriceInputs {
    balance: f64,
    accrued: f64,
    days_to_first_pay: i64,
    wal_years: f64,
    benchmark_yield: f64,
}

impl PriceInputs {
    pub(crate) fn new(
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        settlement: Date,
    ) -> AnalyticsResult<Self> {
        let first = schedule
            .first()
            .ok_or_else(|| AnalyticsError::invalid_input("schedule has no periods"))?;

        let balance = first.starting_balance;
        if !(balance > 0.0 && balance.is_finite()) {
            return Err(AnalyticsError::invalid_input(format!(
                "starting balance must be positive, got {balance}"
            )));
        }

        let accrued_days = (settlement - settlement.start_of_month()) as f64;
        let accrued = accrued_days / DAYS_PER_YEAR_30_360 * first.coupon / 100.0 * balance;
        let days_to_first_pay = first.pay_date - settlement;

        let wal_years = weighted_average_life(settlement, schedule)?;
        let benchmark_yield = curve_rate_at_wal(curve, wal_years * 12.0)?;

        Ok(Self {
            balance,
            accrued,
            days_to_first_pay,
            wal_years,
            benchmark_yield,
        })
    }
}

fn curve_rate_at_wal(curve: &dyn RateCurve, wal_months: f64) -> AnalyticsResult<f64> {
    curve.linear_rate(wal_months).map_err(|err| match err {
        CurveError::TenorOutOfRange {
            requested,
            min,
            max,
        } => AnalyticsError::CurveRange {
            months: requested,
            min,
            max,
        },
        other => other.into(),
    })
}

fn flat_present_value(schedule: &AmortizationSchedule, mey: f64) -> f64 {
    let monthly = 1.0 + mey / 1200.0;
    schedule
        .periods()
        .iter()
        .map(|p| p.cash_flow / monthly.powi(p.period as i32 - 1))
        .sum()
}

fn spot_present_value(
    schedule: &AmortizationSchedule,
    curve: &dyn RateCurve,
    bps: f64,
) -> AnalyticsResult<f64> {
    let mut pv = 0.0;
    for p in schedule.periods() {
        let spot = curve.rate_at(p.period).ok_or(AnalyticsError::CurveRange {
            months: f64::from(p.period),
            min: curve.min_tenor(),
            max: curve.max_tenor(),
        })?;
        let growth = 1.0 + (spot + bps / 100.0) / 1200.0;
        if growth <= 0.0 {
            return Err(AnalyticsError::invalid_yield(format!(
                "spot rate at {}M plus {bps} bps gives a non-positive discount base",
                p.period
            )));
        }
        pv += p.cash_flow / growth.powi(p.period as i32 - 1);
    }
    Ok(pv)
}
