//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint for a pool: its asset pair
//! and fee tier. Construct one, then hand it to
//! [`Pool::from_config`](crate::pool::Pool::from_config).

mod pool_config;

pub use pool_config::PoolConfig;
