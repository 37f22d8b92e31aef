//! Ordered pair of distinct assets.

use core::fmt;

use super::{Asset, AssetId, Side, SwapDirection};
use crate::error::PoolError;

/// The two assets of a pool, in A/B order.
///
/// Unlike a canonically sorted pair, the order here is the caller's: the
/// first asset backs `reserve_a`, the second `reserve_b`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Asset, AssetId, AssetPair, Decimals, Side};
///
/// let algo = Asset::new(AssetId::NATIVE, Decimals::MICRO);
/// let rand = Asset::new(AssetId::new(1001), Decimals::MICRO);
/// let pair = AssetPair::new(algo, rand).expect("distinct assets");
/// assert_eq!(pair.side_of(rand.id()), Some(Side::B));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    asset_a: Asset,
    asset_b: Asset,
}

impl AssetPair {
    /// Creates a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if both assets share an id.
    pub fn new(asset_a: Asset, asset_b: Asset) -> Result<Self, PoolError> {
        if asset_a.id() == asset_b.id() {
            return Err(PoolError::InvalidArgument(
                "asset pair requires two distinct asset ids",
            ));
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the asset backing `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> Asset {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Returns asset A.
    #[must_use]
    pub const fn asset_a(&self) -> Asset {
        self.asset_a
    }

    /// Returns asset B.
    #[must_use]
    pub const fn asset_b(&self) -> Asset {
        self.asset_b
    }

    /// Returns the side holding the asset with ledger id `id`, if any.
    #[must_use]
    pub fn side_of(&self, id: AssetId) -> Option<Side> {
        if self.asset_a.id() == id {
            Some(Side::A)
        } else if self.asset_b.id() == id {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Swap direction that sells the asset with ledger id `id`.
    #[must_use]
    pub fn direction_selling(&self, id: AssetId) -> Option<SwapDirection> {
        self.side_of(id).map(SwapDirection::selling)
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}
