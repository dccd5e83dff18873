//! Prepayment models.
//!
//! Prepayment speeds are quoted as an annual conditional prepayment rate
//! (CPR, percent) and applied monthly as a single monthly mortality (SMM):
//!
//! ```text
//! SMM = 1 - (1 - CPR/100)^(1/12)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MbsError, MbsResult};

/// Loan age, in months, at which the PSA ramp levels off.
pub const PSA_RAMP_MONTHS: u32 = 30;

/// CPR added per month of age under 100% PSA (percent).
pub const PSA_RAMP_STEP: f64 = 0.2;

/// Prepayment assumption for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "model", content = "speed")]
pub enum PrepaymentModel {
    /// Constant annual prepayment rate in percent (0 to 100).
    Cpr(f64),
    /// PSA standard ramp at the given percentage of the benchmark.
    ///
    /// 100 PSA ramps CPR by 0.2% per month of age up to 6% at month 30 and
    /// holds it there.
    Psa(f64),
}

impl Default for PrepaymentModel {
    fn default() -> Self {
        PrepaymentModel::Cpr(0.0)
    }
}

impl PrepaymentModel {
    /// Annual CPR in percent for a loan of the given age in months.
    #[must_use]
    pub fn cpr(&self, age: u32) -> f64 {
        match *self {
            PrepaymentModel::Cpr(cpr) => cpr,
            PrepaymentModel::Psa(psa) => {
                let ramp = f64::from(age.min(PSA_RAMP_MONTHS)) * PSA_RAMP_STEP;
                (ramp * psa / 100.0).min(100.0)
            }
        }
    }

    /// Single monthly mortality for a loan of the given age in months.
    #[must_use]
    pub fn smm(&self, age: u32) -> f64 {
        cpr_to_smm(self.cpr(age))
    }

    /// Checks the speed is usable.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::InvalidScheduleParameters` for a CPR outside
    /// `[0, 100]` or a negative PSA speed.
    pub fn validate(&self) -> MbsResult<()> {
        match *self {
            PrepaymentModel::Cpr(cpr) if !(0.0..=100.0).contains(&cpr) => Err(
                MbsError::invalid_parameters(format!("CPR must be in [0, 100], got {cpr}")),
            ),
            PrepaymentModel::Psa(psa) if !(psa >= 0.0 && psa.is_finite()) => Err(
                MbsError::invalid_parameters(format!("PSA speed must be non-negative, got {psa}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Converts an annual CPR (percent) to a single monthly mortality.
#[must_use]
pub fn cpr_to_smm(cpr: f64) -> f64 {
    if cpr >= 100.0 {
        return 1.0;
    }
    1.0 - (1.0 - cpr / 100.0).powf(1.0 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smm_endpoints() {
        assert_relative_eq!(cpr_to_smm(0.0), 0.0);
        assert_relative_eq!(cpr_to_smm(100.0), 1.0);
    }

    #[test]
    fn test_smm_compounds_back_to_cpr() {
        let smm = cpr_to_smm(25.0);
        let annual = 1.0 - (1.0 - smm).powi(12);
        assert_relative_eq!(annual, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_cpr_ignores_age() {
        let model = PrepaymentModel::Cpr(8.0);
        assert_relative_eq!(model.smm(1), model.smm(200));
    }

    #[test]
    fn test_psa_ramp() {
        let psa = PrepaymentModel::Psa(100.0);
        assert_relative_eq!(psa.cpr(1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(psa.cpr(15), 3.0, epsilon = 1e-12);
        assert_relative_eq!(psa.cpr(30), 6.0, epsilon = 1e-12);
        assert_relative_eq!(psa.cpr(240), 6.0, epsilon = 1e-12);

        let fast = PrepaymentModel::Psa(250.0);
        assert_relative_eq!(fast.cpr(30), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_psa_100_seasoned_matches_cpr_6() {
        let psa = PrepaymentModel::Psa(100.0);
        let cpr = PrepaymentModel::Cpr(6.0);
        for age in [30, 31, 90, 359] {
            assert_relative_eq!(psa.smm(age), cpr.smm(age), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_validate() {
        assert!(PrepaymentModel::Cpr(0.0).validate().is_ok());
        assert!(PrepaymentModel::Cpr(100.0).validate().is_ok());
        assert!(PrepaymentModel::Cpr(-1.0).validate().is_err());
        assert!(PrepaymentModel::Cpr(100.5).validate().is_err());
        assert!(PrepaymentModel::Cpr(f64::NAN).validate().is_err());
        assert!(PrepaymentModel::Psa(-50.0).validate().is_err());
        assert!(PrepaymentModel::Psa(500.0).validate().is_ok());
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&PrepaymentModel::Psa(150.0)).unwrap();
        assert_eq!(json, r#"{"model":"psa","speed":150.0}"#);
        let back: PrepaymentModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PrepaymentModel::Psa(150.0));
    }
}
