//! Pricing defaults.

use serde::{Deserialize, Serialize};

use passthru_analytics::{PricingConventions, StubDiscount};
use passthru_core::{CoreResult, Spread, SpreadType};

use crate::error::{Validate, ValidationError};

/// Conventions used when a schedule is priced off a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Spread convention used when a caller does not name one.
    #[serde(default)]
    pub default_spread_type: SpreadType,

    /// How the settlement-to-first-pay stub is discounted.
    #[serde(default)]
    pub stub_discount: StubDiscount,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_spread_type: SpreadType::ZSpread,
            stub_discount: StubDiscount::FlatMey,
        }
    }
}

impl PricingConfig {
    /// Sets the default spread type.
    #[must_use]
    pub fn with_default_spread_type(mut self, spread_type: SpreadType) -> Self {
        self.default_spread_type = spread_type;
        self
    }

    /// Sets the stub discount convention.
    #[must_use]
    pub fn with_stub_discount(mut self, stub_discount: StubDiscount) -> Self {
        self.stub_discount = stub_discount;
        self
    }

    /// Engine-level conventions for `PricingEngine::with_conventions`.
    #[must_use]
    pub fn conventions(&self) -> PricingConventions {
        PricingConventions::default().with_stub_discount(self.stub_discount)
    }

    /// A spread in the default convention.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSpread` if `bps` is not finite.
    pub fn spread(&self, bps: f64) -> CoreResult<Spread> {
        Spread::from_bps_f64(bps, self.default_spread_type)
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.default_spread_type, SpreadType::ZSpread);
        assert_eq!(config.conventions(), PricingConventions::default());
    }

    #[test]
    fn test_spread_uses_default_type() {
        let config = PricingConfig::default().with_default_spread_type(SpreadType::ISpread);
        let spread = config.spread(85.0).unwrap();
        assert_eq!(spread.spread_type(), SpreadType::ISpread);
        assert_eq!(spread.as_bps_f64(), 85.0);
    }

    #[test]
    fn test_spread_rejects_nan() {
        assert!(PricingConfig::default().spread(f64::NAN).is_err());
    }

    #[test]
    fn test_stub_discount_flows_through() {
        let config = PricingConfig::default().with_stub_discount(StubDiscount::None);
        assert_eq!(config.conventions().stub_discount, StubDiscount::None);
    }
}
