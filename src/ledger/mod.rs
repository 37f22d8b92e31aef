//! Settlement seam between the pool and whatever moves real balances.
//!
//! The pool only does arithmetic. A [`Ledger`] holds balances per
//! [`Party`] and asset and settles groups of [`Transfer`] legs atomically.
//! [`Exchange`] ties the two together: it computes each operation with the
//! pool, settles the matching legs, and rolls the pool back if settlement
//! fails.

mod exchange;
mod memory;

use core::fmt;

use thiserror::Error;

use crate::domain::{Amount, AssetId};
use crate::error::PoolError;

pub use exchange::Exchange;
pub use memory::InMemoryLedger;

/// An account on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Party(String);

impl Party {
    /// Creates a party from its account name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Party {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One leg of a settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// Moves `amount` of `asset` between two parties.
    Move {
        asset: AssetId,
        from: Party,
        to: Party,
        amount: Amount,
    },
    /// Creates `amount` of `asset` in `to`'s account.
    Mint {
        asset: AssetId,
        to: Party,
        amount: Amount,
    },
    /// Destroys `amount` of `asset` from `from`'s account.
    Burn {
        asset: AssetId,
        from: Party,
        amount: Amount,
    },
}

/// Error raised by a ledger or by [`Exchange`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient {asset} balance for {party}: have {available}, need {needed}")]
    InsufficientBalance {
        party: Party,
        asset: AssetId,
        available: Amount,
        needed: Amount,
    },

    #[error("{asset} balance of {party} would overflow")]
    BalanceOverflow { party: Party, asset: AssetId },

    #[error("asset {0} is not traded by this pool")]
    UnknownAsset(AssetId),

    #[error("share asset {0} collides with a pooled asset")]
    ShareAssetCollision(AssetId),

    #[error("pool already holds liquidity with no ledger counterpart")]
    PoolNotEmpty,

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Balance store that settles transfer groups atomically.
pub trait Ledger {
    /// Current balance of `asset` held by `party`; zero if unknown.
    fn balance(&self, party: &Party, asset: AssetId) -> Amount;

    /// Applies every leg, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] or
    /// [`LedgerError::BalanceOverflow`] for the first leg that cannot be
    /// applied; balances are then unchanged.
    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), LedgerError>;
}
