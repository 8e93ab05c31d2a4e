//! # Engine Configuration
//!
//! Operator-tunable knobs for the engine. The pricing *rules* (GST rate,
//! hourly percentage) live in shutter-core as constants; this module holds
//! the per-deployment values.

use shutter_core::Money;

/// Engine configuration.
///
/// ## Example
/// ```rust
/// use shutter_core::Money;
/// use shutter_engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .delivery_fee(Money::from_rupees(750))
///     .max_commit_retries(5);
/// assert_eq!(config.delivery_fee, Money::from_rupees(750));
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Flat service charge for equipment-rental bookings.
    /// Default: ₹500
    pub delivery_fee: Money,

    /// Flat service charge for shoot bookings (event coverage, function
    /// shoots, studio sessions).
    /// Default: ₹2,000
    pub service_fee: Money,

    /// How many times a mutating operation reloads and retries after a
    /// version conflict before giving up with `Conflict`.
    /// Default: 3
    pub max_commit_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            delivery_fee: Money::from_rupees(500),
            service_fee: Money::from_rupees(2_000),
            max_commit_retries: 3,
        }
    }
}

impl EngineConfig {
    /// Sets the equipment-rental delivery fee.
    pub fn delivery_fee(mut self, fee: Money) -> Self {
        self.delivery_fee = fee;
        self
    }

    /// Sets the shoot service fee.
    pub fn service_fee(mut self, fee: Money) -> Self {
        self.service_fee = fee;
        self
    }

    /// Sets the conflict retry budget.
    pub fn max_commit_retries(mut self, retries: u32) -> Self {
        self.max_commit_retries = retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.delivery_fee, Money::from_rupees(500));
        assert_eq!(config.service_fee, Money::from_rupees(2_000));
        assert_eq!(config.max_commit_retries, 3);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .service_fee(Money::from_rupees(3_000))
            .max_commit_retries(1);
        assert_eq!(config.service_fee, Money::from_rupees(3_000));
        assert_eq!(config.max_commit_retries, 1);
    }
}
