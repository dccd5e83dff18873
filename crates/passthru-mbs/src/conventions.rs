//! Cash flow conventions.
//!
//! Pool cash flow sources disagree on two details of the level-pay
//! recurrence: how the quoted pay delay maps to a day of month, and whether
//! the payment is levelled over the remaining term or one month less. Both
//! are explicit choices here rather than hard-coded.

use serde::{Deserialize, Serialize};

use crate::error::{MbsError, MbsResult};

/// Days subtracted from the pay delay under [`PayDelayConvention::OriginationOffset`].
pub const ORIGINATION_OFFSET_DAYS: u32 = 29;

/// How the pay delay in days maps to the day of month cash is received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayDelayConvention {
    /// The delay is the day of month (a 25-day delay pays on the 25th).
    #[default]
    AbsoluteDay,
    /// The delay counts from the first of the accrual month, so cash lands
    /// on day `delay - 29` of the following month (45 days pays on the 16th).
    OriginationOffset,
}

impl PayDelayConvention {
    /// Day-of-month anchor for a pay delay.
    ///
    /// # Errors
    ///
    /// Returns `MbsError::InvalidScheduleParameters` if the anchor falls
    /// outside 1..=31.
    pub fn anchor_day(&self, pay_delay: u32) -> MbsResult<u32> {
        let anchor = match self {
            PayDelayConvention::AbsoluteDay => Some(pay_delay),
            PayDelayConvention::OriginationOffset => pay_delay.checked_sub(ORIGINATION_OFFSET_DAYS),
        };

        match anchor {
            Some(day) if (1..=31).contains(&day) => Ok(day),
            _ => Err(MbsError::invalid_parameters(format!(
                "pay delay {pay_delay} gives no valid day of month under {self:?}"
            ))),
        }
    }
}

/// Number of periods the level payment is spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTermConvention {
    /// Level over the remaining term, `n = wam`.
    #[default]
    RemainingTerm,
    /// Level over one month less, `n = wam - 1`.
    RemainingTermLessOne,
}

impl PaymentTermConvention {
    /// Periods to level over with `wam` months remaining.
    #[must_use]
    pub fn periods(&self, wam: u32) -> u32 {
        match self {
            PaymentTermConvention::RemainingTerm => wam,
            PaymentTermConvention::RemainingTermLessOne => wam.saturating_sub(1),
        }
    }
}

/// Conventions applied when generating a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CashFlowConventions {
    /// Pay delay mapping.
    pub pay_delay: PayDelayConvention,
    /// Payment levelling term.
    pub payment_term: PaymentTermConvention,
    /// Whether the prepayment rate applies during interest-only months.
    pub prepay_during_io: bool,
}

impl Default for CashFlowConventions {
    fn default() -> Self {
        Self {
            pay_delay: PayDelayConvention::AbsoluteDay,
            payment_term: PaymentTermConvention::RemainingTerm,
            prepay_during_io: true,
        }
    }
}

impl CashFlowConventions {
    /// Sets the pay delay convention.
    #[must_use]
    pub fn with_pay_delay(mut self, pay_delay: PayDelayConvention) -> Self {
        self.pay_delay = pay_delay;
        self
    }

    /// Sets the payment term convention.
    #[must_use]
    pub fn with_payment_term(mut self, payment_term: PaymentTermConvention) -> Self {
        self.payment_term = payment_term;
        self
    }

    /// Sets whether prepayments run during interest-only months.
    #[must_use]
    pub fn with_prepay_during_io(mut self, prepay: bool) -> Self {
        self.prepay_during_io = prepay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_anchor() {
        let conv = PayDelayConvention::AbsoluteDay;
        assert_eq!(conv.anchor_day(15).unwrap(), 15);
        assert_eq!(conv.anchor_day(31).unwrap(), 31);
        assert!(conv.anchor_day(0).is_err());
        assert!(conv.anchor_day(45).is_err());
    }

    #[test]
    fn test_offset_anchor() {
        let conv = PayDelayConvention::OriginationOffset;
        assert_eq!(conv.anchor_day(45).unwrap(), 16);
        assert_eq!(conv.anchor_day(54).unwrap(), 25);
        assert!(conv.anchor_day(29).is_err());
        assert!(conv.anchor_day(15).is_err());
    }

    #[test]
    fn test_payment_periods() {
        assert_eq!(PaymentTermConvention::RemainingTerm.periods(360), 360);
        assert_eq!(PaymentTermConvention::RemainingTermLessOne.periods(360), 359);
        assert_eq!(PaymentTermConvention::RemainingTermLessOne.periods(0), 0);
    }

    #[test]
    fn test_defaults() {
        let conv = CashFlowConventions::default();
        assert_eq!(conv.pay_delay, PayDelayConvention::AbsoluteDay);
        assert_eq!(conv.payment_term, PaymentTermConvention::RemainingTerm);
        assert!(conv.prepay_during_io);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PayDelayConvention::OriginationOffset).unwrap();
        assert_eq!(json, r#""origination_offset""#);
    }
}
