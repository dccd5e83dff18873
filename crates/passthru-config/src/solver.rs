//! Spread solver settings.

use serde::{Deserialize, Serialize};

use passthru_analytics::solver::{
    DEFAULT_BUMP_BPS, DEFAULT_INITIAL_GUESS_BPS, DEFAULT_MAX_ITERATIONS, DEFAULT_PRICE_TOLERANCE,
};
use passthru_analytics::SpreadSolverConfig;

use crate::error::{Validate, ValidationError};

/// Upper bound on the iteration cap.
pub const MAX_SOLVER_ITERATIONS: u32 = 100_000;

/// Settings for the price-to-spread search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Starting spread in basis points.
    #[serde(default = "default_initial_guess_bps")]
    pub initial_guess_bps: f64,

    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Price tolerance per 100.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Fall back to secant when Newton breaks down.
    #[serde(default = "default_secant_fallback")]
    pub secant_fallback: bool,

    /// Derivative bump in basis points.
    #[serde(default = "default_bump_bps")]
    pub bump_bps: f64,
}

fn default_initial_guess_bps() -> f64 {
    DEFAULT_INITIAL_GUESS_BPS
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_tolerance() -> f64 {
    DEFAULT_PRICE_TOLERANCE
}

fn default_secant_fallback() -> bool {
    true
}

fn default_bump_bps() -> f64 {
    DEFAULT_BUMP_BPS
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess_bps: default_initial_guess_bps(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            secant_fallback: default_secant_fallback(),
            bump_bps: default_bump_bps(),
        }
    }
}

impl SolverSettings {
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

    /// The solver configuration these settings describe.
    #[must_use]
    pub fn to_solver_config(&self) -> SpreadSolverConfig {
        SpreadSolverConfig::default()
            .with_initial_guess(self.initial_guess_bps)
            .with_max_iterations(self.max_iterations)
            .with_tolerance(self.tolerance)
            .with_bump(self.bump_bps)
            .with_secant_fallback(self.secant_fallback)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.initial_guess_bps.is_finite() {
            errors.push(ValidationError::new(
                "initial_guess_bps",
                "Initial guess must be finite",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > MAX_SOLVER_ITERATIONS {
            errors.push(ValidationError::new(
                "max_iterations",
                format!("Max iterations must be between 1 and {MAX_SOLVER_ITERATIONS}"),
            ));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(ValidationError::new(
                "tolerance",
                "Tolerance must be positive and finite",
            ));
        }

        if !(self.bump_bps.is_finite() && self.bump_bps > 0.0) {
            errors.push(ValidationError::new(
                "bump_bps",
                "Bump must be positive and finite",
            ));
        }

        errors
    }
}
