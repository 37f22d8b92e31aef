//! Basis-point representation for rates.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::PoolError;
use crate::math::mul_div;

/// Denominator that represents 100%.
const BPS_DENOMINATOR: u32 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// let fee = bp.apply(Amount::new(10_000), Rounding::Up).expect("fits");
/// assert_eq!(fee, Amount::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so this only fails when the
    /// result itself does not fit an [`Amount`].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ArithmeticOverflow`] if the result exceeds
    /// `u128`.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
        .map_err(|_| PoolError::ArithmeticOverflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
