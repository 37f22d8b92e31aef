//! Domain value types used throughout the pool core.
//!
//! Amounts, shares, rates, prices, and asset identities are newtypes with
//! validated constructors; swap results and snapshots are plain values
//! returned by the pool.

mod amount;
mod asset;
mod asset_pair;
mod basis_points;
mod decimals;
mod fee_tier;
mod price;
mod rounding;
mod shares;
mod side;
mod snapshot;
mod swap_result;

pub use amount::Amount;
pub use asset::{Asset, AssetId};
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use price::Price;
pub use rounding::Rounding;
pub use shares::Shares;
pub use side::{Side, SwapDirection};
pub use snapshot::{FeeSnapshot, PoolSnapshot};
pub use swap_result::SwapResult;
