//! Asset identity.

use core::fmt;

use super::Decimals;

/// Ledger identifier of an asset. Id `0` is reserved for the ledger's
/// native currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetId(u64);

impl AssetId {
    /// The ledger's native currency.
    pub const NATIVE: Self = Self(0);

    /// Creates an asset id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the native currency.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "asset#{}", self.0)
        }
    }
}

/// An asset traded by a pool: its ledger id plus its decimal places.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Asset, AssetId, Decimals};
///
/// let algo = Asset::new(AssetId::NATIVE, Decimals::MICRO);
/// assert_eq!(algo.decimals(), Decimals::MICRO);
/// assert_eq!(algo.to_string(), "native");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    id: AssetId,
    decimals: Decimals,
}

impl Asset {
    /// Creates a new `Asset`.
    #[must_use]
    pub const fn new(id: AssetId, decimals: Decimals) -> Self {
        Self { id, decimals }
    }

    /// Returns the ledger id.
    #[must_use]
    pub const fn id(&self) -> AssetId {
        self.id
    }

    /// Returns the decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
