//! # Pair AMM
//!
//! Core of a two-asset constant-product (`x · y = k`) liquidity pool:
//! reserve accounting, pool-share issuance, and fee-bearing swaps, all in
//! checked integer arithmetic.
//!
//! Amounts are `u128` raw units. Every product is formed in 256 bits and
//! every division states its rounding: fees round up, payouts and minted
//! shares round down. Overflow is an error, never a wrap.
//!
//! # Quick Start
//!
//! ```rust
//! use pair_amm::prelude::*;
//!
//! // 1. Describe the two assets
//! let pair = AssetPair::new(
//!     Asset::new(AssetId::NATIVE, Decimals::MICRO),
//!     Asset::new(AssetId::new(31_566_704), Decimals::MICRO),
//! )
//! .expect("distinct assets");
//!
//! // 2. Build an empty pool with a 0.30% fee
//! let config = PoolConfig::new(pair, FeeTier::new(BasisPoints::new(30))).expect("valid config");
//! let mut pool = Pool::from_config(&config).expect("valid pool");
//!
//! // 3. Seed it; the first deposit mints floor(sqrt(a * b)) shares
//! let shares = pool.initialize(Amount::new(100_000), Amount::new(200_000)).expect("seeded");
//! assert_eq!(shares, Shares::new(141_421));
//!
//! // 4. Sell 10 000 units of A
//! let result = pool.swap(Amount::new(10_000), SwapDirection::AToB).expect("swap ok");
//! assert_eq!(result.fee(), Amount::new(30));
//! assert_eq!(result.amount_out(), Amount::new(18_132));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Exchange   │  pool + ledger, settle-or-roll-back
//! └──────┬──────┘
//!        │ SharedPool::transact
//!        ▼
//! ┌─────────────┐
//! │ SharedPool  │  one exclusive lock, snapshot rollback
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │    Pool     │  initialize / add / remove / swap + quotes
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │ Domain/Math │  Amount, Shares, FeeTier, Price, mul_div, sqrt
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), [`SwapResult`](domain::SwapResult), etc. |
//! | [`config`] | [`PoolConfig`](config::PoolConfig): asset pair and fee tier |
//! | [`pool`]   | [`Pool`](pool::Pool), [`SharedPool`](pool::SharedPool), fee attribution |
//! | [`ledger`] | [`Ledger`](ledger::Ledger) seam, [`InMemoryLedger`](ledger::InMemoryLedger), [`Exchange`](ledger::Exchange) |
//! | [`math`]   | 256-bit `mul_div`, integer square root, checked arithmetic |
//! | [`error`]  | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for config, domain values, and snapshots |
//!
//! # Logging
//!
//! Mutations emit `tracing` events at `debug`; the [`Exchange`](ledger::Exchange)
//! emits `info`/`warn` inside per-operation spans. The crate never installs
//! a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
