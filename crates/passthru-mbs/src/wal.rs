//! Weighted average life.

use passthru_core::Date;

use crate::error::{MbsError, MbsResult};
use crate::schedule::AmortizationSchedule;

/// Days per year in the WAL denominator.
pub const WAL_DAYS_PER_YEAR: f64 = 365.0;

/// Weighted average life of a schedule in years.
///
/// Each period's scheduled plus unscheduled principal is weighted by the
/// actual days from `settlement` to its pay date:
///
/// ```text
/// WAL = Σ days_i * principal_i / (Σ principal_i * 365)
/// ```
///
/// # Errors
///
/// Returns `MbsError::ZeroPrincipal` if the total principal is zero or
/// negative.
pub fn weighted_average_life(settlement: Date, schedule: &AmortizationSchedule) -> MbsResult<f64> {
    let (weighted, total) = schedule
        .periods()
        .iter()
        .fold((0.0, 0.0), |(weighted, total), period| {
            let principal = period.total_principal();
            let days = (period.pay_date - settlement) as f64;
            (weighted + days * principal, total + principal)
        });

    if total <= 0.0 || total.is_nan() {
        return Err(MbsError::zero_principal(total));
    }

    Ok(weighted / (total * WAL_DAYS_PER_YEAR))
}
