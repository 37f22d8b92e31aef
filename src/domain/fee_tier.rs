//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints, Rounding};

/// The fee charged on the input side of every swap.
///
/// The pool's default is [`FeeTier::DEFAULT`] (30 bp). A tier must be
/// strictly below 100%, otherwise no input would ever reach the pricing
/// formula; [`PoolConfig`](crate::config::PoolConfig) enforces that.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeTier};
///
/// let fee = FeeTier::DEFAULT.fee_on(Amount::new(10_000)).expect("fits");
/// assert_eq!(fee, Amount::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30%, the standard constant-product fee.
    pub const DEFAULT: Self = Self(BasisPoints::new(30));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if the tier charges nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.get() == 0
    }

    /// Fee owed on a gross input, rounded up in favour of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ArithmeticOverflow`](crate::error::PoolError::ArithmeticOverflow)
    /// if the fee does not fit an [`Amount`].
    pub fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
