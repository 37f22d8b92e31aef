//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    Amount, Asset, AssetId, AssetPair, BasisPoints, Decimals, FeeTier, PoolSnapshot, Price,
    Rounding, Shares, Side, SwapDirection, SwapResult,
};
pub use crate::error::{ErrorKind, PoolError, Result};
pub use crate::ledger::{Exchange, InMemoryLedger, Ledger, LedgerError, Party, Transfer};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{provider_fee_share, Pool, SharedPool};
