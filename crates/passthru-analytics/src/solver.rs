//! Spread solving.
//!
//! Finds the spread at which the model price of a schedule equals an
//! observed price. The price is smooth and decreasing in the spread, so the
//! search runs Newton with a central-difference derivative from a fixed
//! initial guess and drops to the secant method if the derivative
//! degenerates or a step leaves the valid yield domain.

use passthru_core::types::{Date, Spread, SpreadType};
use passthru_curves::RateCurve;
use passthru_math::solvers::{newton_raphson_numerical, newton_secant, SolverConfig, SolverMethod};
use passthru_math::MathError;
use passthru_mbs::AmortizationSchedule;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::{PriceInputs, PricingEngine};

/// Default initial guess in basis points.
pub const DEFAULT_INITIAL_GUESS_BPS: f64 = 100.0;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Default price tolerance (per 100).
pub const DEFAULT_PRICE_TOLERANCE: f64 = 1e-6;

/// Default half-width of the derivative stencil in basis points.
pub const DEFAULT_BUMP_BPS: f64 = 0.01;

/// Settings for the spread search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadSolverConfig {
    /// Starting spread in basis points.
    pub initial_guess_bps: f64,
    /// Iteration cap shared by the Newton and secant phases.
    pub max_iterations: u32,
    /// Convergence when `|price - observed| <= tolerance`.
    pub tolerance: f64,
    /// Central-difference bump in basis points.
    pub bump_bps: f64,
    /// Whether to fall back to secant when Newton breaks down.
    pub secant_fallback: bool,
}

impl Default for SpreadSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess_bps: DEFAULT_INITIAL_GUESS_BPS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_PRICE_TOLERANCE,
            bump_bps: DEFAULT_BUMP_BPS,
            secant_fallback: true,
        }
    }
}

impl SpreadSolverConfig {
    /// Sets the initial guess in basis points.
    #[must_use]
    pub fn with_initial_guess(mut self, bps: f64) -> Self {
        self.initial_guess_bps = bps;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the derivative bump in basis points.
    #[must_use]
    pub fn with_bump(mut self, bps: f64) -> Self {
        self.bump_bps = bps;
        self
    }

    /// Enables or disables the secant fallback.
    #[must_use]
    pub fn with_secant_fallback(mut self, enabled: bool) -> Self {
        self.secant_fallback = enabled;
        self
    }

    /// Root-finder settings for these parameters.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

/// A solved spread with its iteration statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadSolution {
    /// The spread that reprices the schedule.
    pub spread: Spread,
    /// Model price at the solved spread.
    pub price: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Price residual at the solved spread.
    pub residual: f64,
    /// Scheme that produced the root.
    pub method: SolverMethod,
}

/// Solves for the spread that matches an observed price.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpreadSolver {
    engine: PricingEngine,
    config: SpreadSolverConfig,
}

impl SpreadSolver {
    /// Creates a solver with default pricing and search settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pricing engine.
    #[must_use]
    pub fn with_engine(mut self, engine: PricingEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the search settings.
    #[must_use]
    pub fn with_config(mut self, config: SpreadSolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The pricing engine.
    #[must_use]
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// The search settings.
    #[must_use]
    pub fn config(&self) -> &SpreadSolverConfig {
        &self.config
    }

    /// Solves `price(s) = observed_price` for the spread `s`.
    ///
    /// # Errors
    ///
    /// * `AnalyticsError::InvalidInput` for a non-positive or non-finite
    ///   observed price, or an empty schedule.
    /// * `AnalyticsError::CurveRange` if the curve cannot price the
    ///   schedule at any spread.
    /// * `AnalyticsError::OutOfBounds` if a trial spread drives the yield
    ///   outside its valid domain and the search cannot recover.
    /// * `AnalyticsError::NonConvergence` if the iteration cap is reached.
    pub fn solve(
        &self,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        settlement: Date,
        observed_price: f64,
        spread_type: SpreadType,
    ) -> AnalyticsResult<SpreadSolution> {
        if !(observed_price > 0.0 && observed_price.is_finite()) {
            return Err(AnalyticsError::invalid_input(format!(
                "observed price must be positive, got {observed_price}"
            )));
        }

        let inputs = PriceInputs::new(schedule, curve, settlement)?;
        let guess = self.config.initial_guess_bps;

        // Spread-independent failures (e.g. a Z-spread tenor missing from
        // the curve) surface here rather than as a solver breakdown.
        match self
            .engine
            .price_prepared(&inputs, schedule, curve, guess, spread_type)
        {
            Ok(_) => {}
            Err(AnalyticsError::InvalidYield { reason }) => {
                return Err(AnalyticsError::out_of_bounds(guess, reason));
            }
            Err(err) => return Err(err),
        }

        let objective = |bps: f64| {
            self.engine
                .price_prepared(&inputs, schedule, curve, bps, spread_type)
                .map_or(f64::NAN, |quote| quote.price - observed_price)
        };

        let solver_config = self.config.solver_config();
        let result = if self.config.secant_fallback {
            newton_secant(objective, guess, self.config.bump_bps, &solver_config)
        } else {
            newton_raphson_numerical(objective, guess, self.config.bump_bps, &solver_config)
        };

        let result = result.map_err(|err| match err {
            MathError::NonFinite { x } => AnalyticsError::out_of_bounds(
                x,
                self.failure_reason(&inputs, schedule, curve, x, spread_type),
            ),
            other => other.into(),
        })?;

        log::debug!(
            "{spread_type} solved to {:.6} bps in {} iterations ({}), residual {:.2e}",
            result.root,
            result.iterations,
            result.method,
            result.residual
        );

        Ok(SpreadSolution {
            spread: Spread::from_bps_f64(result.root, spread_type)?,
            price: observed_price + result.residual,
            iterations: result.iterations,
            residual: result.residual,
            method: result.method,
        })
    }

    fn failure_reason(
        &self,
        inputs: &PriceInputs,
        schedule: &AmortizationSchedule,
        curve: &dyn RateCurve,
        bps: f64,
        spread_type: SpreadType,
    ) -> String {
        match self
            .engine
            .price_prepared(inputs, schedule, curve, bps, spread_type)
        {
            Err(AnalyticsError::InvalidYield { reason }) => reason,
            Err(err) => err.to_string(),
            Ok(_) => "price is not finite".to_string(),
        }
    }
}

/// Solves for the spread with default settings.
///
/// # Errors
///
/// See [`SpreadSolver::solve`].
pub fn solve_spread(
    schedule: &AmortizationSchedule,
    curve: &dyn RateCurve,
    settlement: Date,
    observed_price: f64,
    spread_type: SpreadType,
) -> AnalyticsResult<Spread> {
    SpreadSolver::new()
        .solve(schedule, curve, settlement, observed_price, spread_type)
        .map(|solution| solution.spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_relative_eq;
    use passthru_curves::{SpotCurve, TenorGrid};
    use passthru_mbs::generate_cpr;

    fn settle() -> Date {
        Date::from_ymd(2024, 3, 1).unwrap()
    }

    fn sloped_curve() -> SpotCurve {
        let rates: Vec<f64> = (1..=360).map(|m| 4.0 + f64::from(m) / 360.0).collect();
        SpotCurve::new(settle(), TenorGrid::monthly(), &rates).unwrap()
    }

    fn schedule() -> AmortizationSchedule {
        generate_cpr(settle(), 6.5, 360, 0, 25, 8.0, 360, 1_000_000.0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SpreadSolverConfig::default();
        assert_relative_eq!(config.initial_guess_bps, 100.0);
        assert_eq!(config.max_iterations, 1000);
        assert_relative_eq!(config.tolerance, 1e-6);
        assert_relative_eq!(config.bump_bps, 0.01);
        assert!(config.secant_fallback);
    }

    #[test]
    fn test_round_trip_both_spread_types() {
        let schedule = schedule();
        let curve = sloped_curve();

        for spread_type in [SpreadType::ISpread, SpreadType::ZSpread] {
            let target = Spread::from_bps_i32(75, spread_type);
            let observed = price(&schedule, &curve, settle(), &target).unwrap();

            let solution = SpreadSolver::new()
                .solve(&schedule, &curve, settle(), observed, spread_type)
                .unwrap();

            assert_relative_eq!(solution.spread.as_bps_f64(), 75.0, epsilon = 1e-4);
            assert_eq!(solution.spread.spread_type(), spread_type);
            assert!(solution.residual.abs() <= 1e-6);
            assert_eq!(solution.method, SolverMethod::Newton);
        }
    }

    #[test]
    fn test_negative_spread() {
        let schedule = schedule();
        let curve = sloped_curve();
        let target = Spread::from_bps_i32(-40, SpreadType::ZSpread);
        let observed = price(&schedule, &curve, settle(), &target).unwrap();

        let spread = solve_spread(&schedule, &curve, settle(), observed, SpreadType::ZSpread).unwrap();

        assert_relative_eq!(spread.as_bps_f64(), -40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_without_secant_fallback() {
        let schedule = schedule();
        let curve = sloped_curve();
        let target = Spread::from_bps_i32(150, SpreadType::ISpread);
        let observed = price(&schedule, &curve, settle(), &target).unwrap();

        let solver =
            SpreadSolver::new().with_config(SpreadSolverConfig::default().with_secant_fallback(false));
        let solution = solver
            .solve(&schedule, &curve, settle(), observed, SpreadType::ISpread)
            .unwrap();

        assert_relative_eq!(solution.spread.as_bps_f64(), 150.0, epsilon = 1e-4);
    }

    #[test]
    fn test_iteration_cap() {
        let schedule = schedule();
        let curve = sloped_curve();
        let observed = price(
            &schedule,
            &curve,
            settle(),
            &Spread::from_bps_i32(400, SpreadType::ISpread),
        )
        .unwrap();

        let solver = SpreadSolver::new().with_config(
            SpreadSolverConfig::default()
                .with_max_iterations(1)
                .with_tolerance(1e-12),
        );
        let result = solver.solve(&schedule, &curve, settle(), observed, SpreadType::ISpread);

        assert!(matches!(
            result,
            Err(AnalyticsError::NonConvergence { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_initial_guess_out_of_bounds() {
        let schedule = schedule();
        let curve = sloped_curve();
        let solver = SpreadSolver::new()
            .with_config(SpreadSolverConfig::default().with_initial_guess(-50_000.0));

        let result = solver.solve(&schedule, &curve, settle(), 101.0, SpreadType::ISpread);

        assert!(matches!(
            result,
            Err(AnalyticsError::OutOfBounds { spread_bps, .. }) if spread_bps == -50_000.0
        ));
    }

    #[test]
    fn test_invalid_observed_price() {
        let schedule = schedule();
        let curve = sloped_curve();

        for observed in [0.0, -5.0, f64::NAN] {
            let result = solve_spread(&schedule, &curve, settle(), observed, SpreadType::ZSpread);
            assert!(matches!(result, Err(AnalyticsError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_curve_range_precheck() {
        let schedule = schedule();
        let curve = SpotCurve::new(settle(), TenorGrid::semi_annual(), &[4.5; 61]).unwrap();

        let result = solve_spread(&schedule, &curve, settle(), 99.0, SpreadType::ZSpread);

        assert!(matches!(result, Err(AnalyticsError::CurveRange { .. })));
    }
}
