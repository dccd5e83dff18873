//! Repricing checks for a bootstrapped spot curve.
//!
//! A spot curve is correct only if it prices every par bond it was solved
//! from back to 100. The bootstrap is closed-form, so the residuals should
//! sit at floating-point noise; the report makes that auditable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::curves::SpotCurve;

/// Default repricing tolerance, in price points per 100 face.
pub const REPRICING_TOLERANCE: f64 = 1e-6;

/// Result of repricing one par bond against the spot curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepricingCheck {
    /// Maturity of the par bond in months.
    pub tenor: u32,
    /// Par coupon in percent.
    pub par_rate: f64,
    /// Price implied by the spot curve.
    pub model_price: f64,
    /// `|model_price - 100|`
    pub error: f64,
    /// Tolerance the check was held to.
    pub tolerance: f64,
    /// Whether `error <= tolerance`.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a new repricing check result.
    #[must_use]
    pub fn new(tenor: u32, par_rate: f64, model_price: f64, tolerance: f64) -> Self {
        let error = (model_price - 100.0).abs();
        Self {
            tenor,
            par_rate,
            model_price,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok" } else { "FAIL" };
        write!(
            f,
            "{status} {:>3}M par {:.4}% | price {:.8} | error {:.2e} (tol {:.2e})",
            self.tenor, self.par_rate, self.model_price, self.error, self.tolerance
        )
    }
}

/// Repricing checks for every solved tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
}

impl RepricingReport {
    /// Creates a new repricing report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);
        Self { checks, max_error }
    }

    /// Returns whether every check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Returns the individual repricing checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Returns the checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Par bonds: {}", self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

/// A spot curve with its repricing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// The bootstrapped curve.
    pub curve: SpotCurve,
    /// Repricing audit of the solved tenors.
    pub report: RepricingReport,
}

impl BootstrapResult {
    /// Returns whether every solved tenor repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pass_fail() {
        let ok = RepricingCheck::new(120, 4.09, 100.000_000_1, REPRICING_TOLERANCE);
        assert!(ok.passed);
        let bad = RepricingCheck::new(120, 4.09, 100.01, REPRICING_TOLERANCE);
        assert!(!bad.passed);

        let report = RepricingReport::new(vec![ok, bad]);
        assert!(!report.is_valid());
        assert_eq!(report.failed_checks().len(), 1);
        assert!((report.max_error() - 0.01).abs() < 1e-9);
        assert!(report.to_string().contains("FAILED"));
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(RepricingReport::new(Vec::new()).is_valid());
    }
}
