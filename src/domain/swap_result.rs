//! Outcome of a swap.

use core::fmt;

use super::{Amount, BasisPoints, Price, Rounding, SwapDirection};
use crate::error::PoolError;
use crate::math::mul_div;

/// The amounts exchanged by one swap.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, SwapDirection, SwapResult};
///
/// let result = SwapResult::new(
///     SwapDirection::AToB,
///     Amount::new(10_000),
///     Amount::new(18_132),
///     Amount::new(30),
/// );
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a validated `SwapResult`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if either amount is zero or
    /// `fee >= amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(PoolError::InvalidArgument("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(PoolError::InvalidArgument("amount_out must be positive"));
        }
        if fee.get() >= amount_in.get() {
            return Err(PoolError::InvalidArgument("fee must be less than amount_in"));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Which asset went in.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Gross input, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output paid by the pool.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee charged on the input side.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Input that reached the pricing formula (`amount_in - fee`).
    pub const fn net_input(&self) -> Amount {
        // fee < amount_in is a constructor invariant
        Amount::new(self.amount_in.get() - self.fee.get())
    }

    /// Realised price, `amount_out / amount_in`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ArithmeticOverflow`] if the ratio exceeds the
    /// fixed-point range.
    pub fn effective_price(&self) -> crate::error::Result<Price> {
        Price::from_ratio(self.amount_out, self.amount_in, Rounding::Down)
    }

    /// Slippage against `spot_before`, the output-per-input price quoted
    /// before the swap: `(spot - effective) / spot`, truncated to whole
    /// basis points. The fee is included.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidArgument`] if `spot_before` is zero.
    /// - Propagates errors from [`effective_price`](Self::effective_price).
    pub fn price_impact(&self, spot_before: Price) -> crate::error::Result<BasisPoints> {
        let spot = spot_before.get().to_bits();
        if spot <= 0 {
            return Err(PoolError::InvalidArgument("reference price must be positive"));
        }
        let effective = self.effective_price()?.get().to_bits();
        let gap = spot.saturating_sub(effective).max(0).unsigned_abs();
        let bps = mul_div(gap, 10_000, spot.unsigned_abs(), Rounding::Down)?;
        let bps = u32::try_from(bps)
            .map_err(|_| PoolError::ArithmeticOverflow("price impact exceeds u32"))?;
        Ok(BasisPoints::new(bps))
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
