//! Asset decimal places.

use crate::error::PoolError;

/// Largest decimal count for which `u64::MAX * 10^decimals` still fits a `u128`.
const MAX_DECIMALS: u8 = 19;

/// Number of decimal places between an asset's display unit and its raw
/// unit (six for micro-denominated assets).
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert!(Decimals::new(20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Six decimal places, the micro-unit convention.
    pub const MICRO: Self = Self(6);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if `value` exceeds 19.
    pub const fn new(value: u8) -> Result<Self, PoolError> {
        if value > MAX_DECIMALS {
            return Err(PoolError::InvalidArgument("decimals must be 0..=19"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Decimals {
    type Error = PoolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for v in [0_u8, 6, 19] {
            let Ok(d) = Decimals::new(v) else {
                panic!("expected Ok for {v}");
            };
            assert_eq!(d.get(), v);
        }
    }

    #[test]
    fn twenty_rejected() {
        let Err(e) = Decimals::new(20) else {
            panic!("expected Err");
        };
        assert_eq!(e, PoolError::InvalidArgument("decimals must be 0..=19"));
    }
}
