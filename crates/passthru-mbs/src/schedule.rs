//! Amortization schedules.

use passthru_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::MbsResult;
use crate::wal::weighted_average_life;

/// Lifecycle of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    /// The pool still carries a balance.
    Accruing,
    /// The balance reached zero. No further periods follow.
    Terminated,
}

/// One monthly period of a pool schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Period number, starting at 1.
    pub period: u32,
    /// Date cash is received.
    pub pay_date: Date,
    /// Balance at the start of the period.
    pub starting_balance: f64,
    /// Gross coupon in percent.
    pub coupon: f64,
    /// Pay delay in days.
    pub pay_delay: u32,
    /// Single monthly mortality applied.
    pub smm: f64,
    /// Interest paid.
    pub interest: f64,
    /// Scheduled principal paid.
    pub scheduled_principal: f64,
    /// Prepaid principal.
    pub unscheduled_principal: f64,
    /// Total cash flow: interest plus both principal components.
    pub cash_flow: f64,
    /// Balance at the end of the period.
    pub ending_balance: f64,
}

impl Period {
    /// Scheduled plus unscheduled principal.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.scheduled_principal + self.unscheduled_principal
    }
}

/// Monthly cash flows of a pool from settlement until payoff or balloon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    settlement: Date,
    periods: Vec<Period>,
    state: ScheduleState,
}

impl AmortizationSchedule {
    /// Creates a schedule from generated periods.
    #[must_use]
    pub fn new(settlement: Date, periods: Vec<Period>, state: ScheduleState) -> Self {
        Self {
            settlement,
            periods,
            state,
        }
    }

    /// Settlement date the schedule was generated for.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Periods in pay-date order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Final state of the schedule.
    #[must_use]
    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// First period, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Period> {
        self.periods.first()
    }

    /// Last period, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Period> {
        self.periods.last()
    }

    /// Total interest over the schedule.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.periods.iter().map(|p| p.interest).sum()
    }

    /// Total scheduled plus unscheduled principal over the schedule.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.periods.iter().map(Period::total_principal).sum()
    }

    /// Weighted average life in years from the schedule's settlement date.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::ZeroPrincipal` if no principal is paid.
    pub fn wal(&self) -> MbsResult<f64> {
        weighted_average_life(self.settlement, self)
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
