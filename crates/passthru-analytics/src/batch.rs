//! Batch pricing and spread solving.
//!
//! Requests are independent, so they are mapped in parallel with rayon
//! when the `parallel` feature is enabled. Results keep request order and
//! each carries its own `Result`; one bad pool does not fail the batch.

use passthru_core::types::{Date, Spread, SpreadType};
use passthru_curves::RateCurve;
use passthru_mbs::AmortizationSchedule;

use crate::error::AnalyticsResult;
use crate::pricing::{PriceResult, PricingEngine};
use crate::solver::{SpreadSolution, SpreadSolver};

/// One schedule to price at a spread.
#[derive(Clone, Copy)]
pub struct PricingRequest<'a> {
    /// Cash flows to price.
    pub schedule: &'a AmortizationSchedule,
    /// Benchmark curve.
    pub curve: &'a dyn RateCurve,
    /// Settlement date.
    pub settlement: Date,
    /// Spread and how to apply it.
    pub spread: Spread,
}

/// One schedule to solve a spread for.
#[derive(Clone, Copy)]
pub struct SpreadRequest<'a> {
    /// Cash flows to price.
    pub schedule: &'a AmortizationSchedule,
    /// Benchmark curve.
    pub curve: &'a dyn RateCurve,
    /// Settlement date.
    pub settlement: Date,
    /// Observed price per 100.
    pub observed_price: f64,
    /// Spread convention to solve in.
    pub spread_type: SpreadType,
}

impl std::fmt::Debug for PricingRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingRequest")
            .field("periods", &self.schedule.len())
            .field("settlement", &self.settlement)
            .field("spread", &self.spread)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SpreadRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadRequest")
            .field("periods", &self.schedule.len())
            .field("settlement", &self.settlement)
            .field("observed_price", &self.observed_price)
            .field("spread_type", &self.spread_type)
            .finish_non_exhaustive()
    }
}

/// Prices each request.
pub fn price_batch(
    engine: &PricingEngine,
    requests: &[PricingRequest<'_>],
) -> Vec<AnalyticsResult<PriceResult>> {
    log::debug!("pricing batch of {}", requests.len());
    map_requests(requests, |r| {
        engine.price_detailed(r.schedule, r.curve, r.settlement, &r.spread)
    })
}

/// Solves a spread for each request.
pub fn solve_spread_batch(
    solver: &SpreadSolver,
    requests: &[SpreadRequest<'_>],
) -> Vec<AnalyticsResult<SpreadSolution>> {
    log::debug!("solving spreads for batch of {}", requests.len());
    map_requests(requests, |r| {
        solver.solve(
            r.schedule,
            r.curve,
            r.settlement,
            r.observed_price,
            r.spread_type,
        )
    })
}

fn map_requests<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(f).collect()
    }
}
