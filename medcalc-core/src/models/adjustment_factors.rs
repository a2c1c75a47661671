use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display-only adjustments applied to the rows returned by the pricing service.
///
/// Changing any of these re-renders the table but never triggers a new request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    /// Annual inflation in percent (e.g. `6` for 6%).
    pub inflation_rate: Decimal,
    /// Multiplier from the service's currency into the display currency.
    pub currency_rate: Decimal,
    /// Whether inflation compounding is applied at all.
    pub inflation_enabled: bool,
}

impl Default for AdjustmentFactors {
    fn default() -> Self {
        Self {
            inflation_rate: Decimal::from(6),
            currency_rate: Decimal::new(785, 2),
            inflation_enabled: true,
        }
    }
}

impl AdjustmentFactors {
    /// One year's growth multiplier, `1 + rate / 100`, or exactly one when
    /// inflation is disabled.
    pub fn annual_growth(&self) -> Decimal {
        if self.inflation_enabled {
            Decimal::ONE + self.inflation_rate / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE
        }
    }
}
