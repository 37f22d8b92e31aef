//! Configuration for a constant-product pool.

use core::fmt;

use crate::domain::{AssetPair, BasisPoints, FeeTier};
use crate::error::PoolError;

/// Immutable parameters of a pool: which two assets it trades and what
/// fee it charges on swap inputs.
///
/// Reserves are not part of the configuration. A configured pool starts
/// empty and is seeded by
/// [`Pool::initialize`](crate::pool::Pool::initialize).
///
/// # Validation
///
/// - The fee tier must be strictly below 100%.
/// - The asset pair is validated at [`AssetPair`] construction time.
///
/// With the `serde` feature, configs can be deserialized from host
/// configuration files; [`Pool::from_config`](crate::pool::Pool::from_config)
/// re-runs [`validate`](Self::validate) so a deserialized value is checked
/// before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    pair: AssetPair,
    #[cfg_attr(feature = "serde", serde(default))]
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if the fee tier is 100% or more.
    pub fn new(pair: AssetPair, fee_tier: FeeTier) -> Result<Self, PoolError> {
        let config = Self { pair, fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Config with the standard 30 bp fee.
    #[must_use]
    pub const fn with_default_fee(pair: AssetPair) -> Self {
        Self {
            pair,
            fee_tier: FeeTier::DEFAULT,
        }
    }

    /// Checks all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if the fee tier is 100% or
    /// more, or if both assets share an id (reachable only through
    /// deserialization).
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.pair.asset_a().id() == self.pair.asset_b().id() {
            return Err(PoolError::InvalidArgument(
                "asset pair requires two distinct asset ids",
            ));
        }
        if self.fee_tier.basis_points() >= BasisPoints::MAX_PERCENT {
            return Err(PoolError::InvalidArgument("fee tier must be below 100%"));
        }
        Ok(())
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}

impl fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolConfig({}, {})", self.pair, self.fee_tier)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Asset, AssetId, Decimals};

    fn pair() -> AssetPair {
        let Ok(pair) = AssetPair::new(
            Asset::new(AssetId::NATIVE, Decimals::MICRO),
            Asset::new(AssetId::new(77), Decimals::MICRO),
        ) else {
            panic!("valid pair");
        };
        pair
    }

    #[test]
    fn default_fee() {
        let cfg = PoolConfig::with_default_fee(pair());
        assert_eq!(cfg.fee_tier(), FeeTier::DEFAULT);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn full_fee_rejected() {
        let result = PoolConfig::new(pair(), FeeTier::new(BasisPoints::MAX_PERCENT));
        assert_eq!(
            result,
            Err(PoolError::InvalidArgument("fee tier must be below 100%"))
        );
    }

    #[test]
    fn zero_fee_allowed() {
        let Ok(cfg) = PoolConfig::new(pair(), FeeTier::ZERO) else {
            panic!("expected Ok");
        };
        assert!(cfg.fee_tier().is_zero());
    }

    #[test]
    fn display() {
        let cfg = PoolConfig::with_default_fee(pair());
        assert_eq!(
            cfg.to_string(),
            "PoolConfig(native/asset#77, FeeTier(30bp))"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_without_fee_uses_default() {
        let json = r#"{"pair":{"asset_a":{"id":0,"decimals":6},"asset_b":{"id":77,"decimals":6}}}"#;
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(json) else {
            panic!("expected valid json");
        };
        assert_eq!(cfg, PoolConfig::with_default_fee(pair()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_invalid_decimals_rejected() {
        let json = r#"{"pair":{"asset_a":{"id":0,"decimals":42},"asset_b":{"id":77,"decimals":6}}}"#;
        assert!(serde_json::from_str::<PoolConfig>(json).is_err());
    }
}
