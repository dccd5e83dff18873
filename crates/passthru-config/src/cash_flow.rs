//! Cash-flow generation settings.

use serde::{Deserialize, Serialize};

use passthru_mbs::{CashFlowConventions, PayDelayConvention, PaymentTermConvention};

use crate::error::{Validate, ValidationError};

/// Conventions used when a pool is amortized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowConfig {
    /// How the pay-delay maps to a day of the month.
    #[serde(default)]
    pub pay_delay: PayDelayConvention,

    /// Exponent used for the level payment.
    #[serde(default)]
    pub payment_term: PaymentTermConvention,

    /// Whether prepayments run during interest-only months.
    #[serde(default = "default_prepay_during_io")]
    pub prepay_during_io: bool,
}

fn default_prepay_during_io() -> bool {
    true
}

impl Default for CashFlowConfig {
    fn default() -> Self {
        Self {
            pay_delay: PayDelayConvention::default(),
            payment_term: PaymentTermConvention::default(),
            prepay_during_io: default_prepay_during_io(),
        }
    }
}

impl CashFlowConfig {
    /// Sets the pay-delay convention.
    #[must_use]
    pub fn with_pay_delay(mut self, pay_delay: PayDelayConvention) -> Self {
        self.pay_delay = pay_delay;
        self
    }

    /// Sets the payment-term convention.
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

    /// Engine-level conventions for `passthru_mbs::generate`.
    #[must_use]
    pub fn conventions(&self) -> CashFlowConventions {
        CashFlowConventions::default()
            .with_pay_delay(self.pay_delay)
            .with_payment_term(self.payment_term)
            .with_prepay_during_io(self.prepay_during_io)
    }
}

impl Validate for CashFlowConfig {
    // Every combination of the enums is a usable convention set.
    fn validate(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}
