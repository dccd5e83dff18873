//! Mortgage pool terms.

use passthru_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{MbsError, MbsResult};
use crate::prepayment::PrepaymentModel;

/// Terms for one schedule run of a mortgage pool.
///
/// Build with [`PoolTerms::builder`], which validates the terms.
///
/// # Example
///
/// ```rust
/// use passthru_core::Date;
/// use passthru_mbs::{PoolTerms, PrepaymentModel};
///
/// let terms = PoolTerms::builder()
///     .settlement(Date::from_ymd(2024, 3, 1).unwrap())
///     .coupon(7.0)
///     .remaining_term(360)
///     .pay_delay(15)
///     .prepayment(PrepaymentModel::Cpr(8.0))
///     .original_balance(500_000.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.balloon_term(), 360);
/// assert_eq!(terms.original_term(), 360);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolTerms {
    settlement: Date,
    coupon: f64,
    original_term: u32,
    remaining_term: u32,
    balloon_term: u32,
    interest_only_months: u32,
    pay_delay: u32,
    prepayment: PrepaymentModel,
    original_balance: f64,
}

impl PoolTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> PoolTermsBuilder {
        PoolTermsBuilder::new()
    }

    /// Settlement date.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Gross coupon in percent.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Original term in months.
    #[must_use]
    pub fn original_term(&self) -> u32 {
        self.original_term
    }

    /// Remaining term (WAM) in months.
    #[must_use]
    pub fn remaining_term(&self) -> u32 {
        self.remaining_term
    }

    /// Months until the balloon payment.
    #[must_use]
    pub fn balloon_term(&self) -> u32 {
        self.balloon_term
    }

    /// Interest-only months at the start of the schedule.
    #[must_use]
    pub fn interest_only_months(&self) -> u32 {
        self.interest_only_months
    }

    /// Pay delay in days.
    #[must_use]
    pub fn pay_delay(&self) -> u32 {
        self.pay_delay
    }

    /// Prepayment assumption.
    #[must_use]
    pub fn prepayment(&self) -> PrepaymentModel {
        self.prepayment
    }

    /// Balance at settlement.
    #[must_use]
    pub fn original_balance(&self) -> f64 {
        self.original_balance
    }

    /// Months since origination at settlement.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.original_term - self.remaining_term
    }

    /// Returns a copy of these terms with a different prepayment assumption.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::InvalidScheduleParameters` if the new speed is invalid.
    pub fn with_prepayment(&self, prepayment: PrepaymentModel) -> MbsResult<Self> {
        let terms = Self {
            prepayment,
            ..*self
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Checks the terms can produce a schedule.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::InvalidScheduleParameters` describing the first
    /// violated rule.
    pub fn validate(&self) -> MbsResult<()> {
        if !(self.original_balance > 0.0 && self.original_balance.is_finite()) {
            return Err(MbsError::invalid_parameters(format!(
                "original balance must be positive, got {}",
                self.original_balance
            )));
        }
        if !(self.coupon >= 0.0 && self.coupon.is_finite()) {
            return Err(MbsError::invalid_parameters(format!(
                "coupon must be non-negative, got {}",
                self.coupon
            )));
        }
        if self.balloon_term == 0 {
            return Err(MbsError::invalid_parameters("balloon term must be positive"));
        }
        if self.remaining_term < self.balloon_term {
            return Err(MbsError::invalid_parameters(format!(
                "remaining term {} is shorter than balloon term {}",
                self.remaining_term, self.balloon_term
            )));
        }
        if self.interest_only_months >= self.balloon_term {
            return Err(MbsError::invalid_parameters(format!(
                "interest-only months {} must be less than balloon term {}",
                self.interest_only_months, self.balloon_term
            )));
        }
        if self.remaining_term > self.original_term {
            return Err(MbsError::invalid_parameters(format!(
                "remaining term {} exceeds original term {}",
                self.remaining_term, self.original_term
            )));
        }
        self.prepayment.validate()
    }
}

/// Builder for [`PoolTerms`].
///
/// Original and balloon terms default to the remaining term, interest-only
/// months to zero and prepayment to 0% CPR.
#[derive(Debug, Clone, Default)]
pub struct PoolTermsBuilder {
    settlement: Option<Date>,
    coupon: Option<f64>,
    original_term: Option<u32>,
    remaining_term: Option<u32>,
    balloon_term: Option<u32>,
    interest_only_months: Option<u32>,
    pay_delay: Option<u32>,
    prepayment: Option<PrepaymentModel>,
    original_balance: Option<f64>,
}

impl PoolTermsBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settlement date (required).
    #[must_use]
    pub fn settlement(mut self, date: Date) -> Self {
        self.settlement = Some(date);
        self
    }

    /// Sets the gross coupon in percent (required).
    #[must_use]
    pub fn coupon(mut self, coupon: f64) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the original term in months.
    #[must_use]
    pub fn original_term(mut self, months: u32) -> Self {
        self.original_term = Some(months);
        self
    }

    /// Sets the remaining term (WAM) in months (required).
    #[must_use]
    pub fn remaining_term(mut self, months: u32) -> Self {
        self.remaining_term = Some(months);
        self
    }

    /// Sets the balloon term in months.
    #[must_use]
    pub fn balloon_term(mut self, months: u32) -> Self {
        self.balloon_term = Some(months);
        self
    }

    /// Sets the number of interest-only months.
    #[must_use]
    pub fn interest_only_months(mut self, months: u32) -> Self {
        self.interest_only_months = Some(months);
        self
    }

    /// Sets the pay delay in days (required).
    #[must_use]
    pub fn pay_delay(mut self, days: u32) -> Self {
        self.pay_delay = Some(days);
        self
    }

    /// Sets the prepayment assumption.
    #[must_use]
    pub fn prepayment(mut self, model: PrepaymentModel) -> Self {
        self.prepayment = Some(model);
        self
    }

    /// Sets the original balance (required).
    #[must_use]
    pub fn original_balance(mut self, balance: f64) -> Self {
        self.original_balance = Some(balance);
        self
    }

    /// Builds and validates the terms.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::InvalidScheduleParameters` if a required field is
    /// missing or the terms fail [`PoolTerms::validate`].
    pub fn build(self) -> MbsResult<PoolTerms> {
        let settlement = self.settlement.ok_or_else(|| missing("settlement"))?;
        let coupon = self.coupon.ok_or_else(|| missing("coupon"))?;
        let remaining_term = self.remaining_term.ok_or_else(|| missing("remaining_term"))?;
        let pay_delay = self.pay_delay.ok_or_else(|| missing("pay_delay"))?;
        let original_balance = self
            .original_balance
            .ok_or_else(|| missing("original_balance"))?;

        let terms = PoolTerms {
            settlement,
            coupon,
            original_term: self.original_term.unwrap_or(remaining_term),
            remaining_term,
            balloon_term: self.balloon_term.unwrap_or(remaining_term),
            interest_only_months: self.interest_only_months.unwrap_or(0),
            pay_delay,
            prepayment: self.prepayment.unwrap_or_default(),
            original_balance,
        };
        terms.validate()?;
        Ok(terms)
    }
}

fn missing(field: &str) -> MbsError {
    MbsError::invalid_parameters(format!("missing required field: {field}"))
}
