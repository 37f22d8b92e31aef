//! Point-in-time copies of pool state.

use core::fmt;

use super::{Amount, Shares, Side};

/// Every counter a pool holds, captured at one instant.
///
/// Snapshots are plain values: reading one never locks or mutates the pool
/// it came from, and [`Pool::restore`](crate::pool::Pool::restore) accepts
/// one back for compensating rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    /// Reserve of asset A.
    pub reserve_a: Amount,
    /// Reserve of asset B.
    pub reserve_b: Amount,
    /// Outstanding pool shares.
    pub share_supply: Shares,
    /// Lifetime fees charged in asset A.
    pub accumulated_fee_a: Amount,
    /// Lifetime fees charged in asset B.
    pub accumulated_fee_b: Amount,
}

impl PoolSnapshot {
    /// Reserve on `side`.
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// Accumulated fee on `side`.
    pub const fn accumulated_fee(&self, side: Side) -> Amount {
        match side {
            Side::A => self.accumulated_fee_a,
            Side::B => self.accumulated_fee_b,
        }
    }

    /// The fee-related subset used for distribution.
    #[must_use]
    pub const fn fees(&self) -> FeeSnapshot {
        FeeSnapshot {
            accumulated_fee_a: self.accumulated_fee_a,
            accumulated_fee_b: self.accumulated_fee_b,
            share_supply: self.share_supply,
        }
    }

    /// `true` when the pool holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.share_supply.is_zero() && self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reserves=({}, {}) shares={} fees=({}, {})",
            self.reserve_a,
            self.reserve_b,
            self.share_supply,
            self.accumulated_fee_a,
            self.accumulated_fee_b
        )
    }
}

/// Fee counters and share supply, the inputs to
/// [`provider_fee_share`](crate::pool::provider_fee_share).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSnapshot {
    /// Lifetime fees charged in asset A.
    pub accumulated_fee_a: Amount,
    /// Lifetime fees charged in asset B.
    pub accumulated_fee_b: Amount,
    /// Outstanding pool shares.
    pub share_supply: Shares,
}
