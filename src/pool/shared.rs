//! Thread-safe handle to a [`Pool`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::Pool;
use crate::domain::{Amount, PoolSnapshot, Shares, SwapDirection, SwapResult};
use crate::error::PoolError;

/// A [`Pool`] behind a single exclusive lock.
///
/// Every operation, reads included, takes the same lock, so concurrent
/// callers observe a strict serial order. Clones share the same pool.
#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<Mutex<Pool>>,
}

impl SharedPool {
    /// Wraps `pool`.
    pub fn new(pool: Pool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Runs `f` with read access to the pool.
    pub fn read<R>(&self, f: impl FnOnce(&Pool) -> R) -> R {
        let pool = self.inner.lock();
        f(&pool)
    }

    /// Runs `f` with exclusive access to the pool.
    ///
    /// If `f` returns `Err`, the pool is restored to its state at entry,
    /// undoing any mutations `f` made before failing. Other callers never
    /// observe the intermediate state.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns.
    pub fn transact<T, E>(&self, f: impl FnOnce(&mut Pool) -> Result<T, E>) -> Result<T, E> {
        let mut pool = self.inner.lock();
        let before = pool.snapshot();
        let outcome = f(&mut pool);
        if outcome.is_err() && pool.snapshot() != before {
            match pool.restore(before) {
                Ok(()) => debug!(%before, "transaction rolled back"),
                Err(e) => warn!(error = %e, %before, "rollback failed, pool left as modified"),
            }
        }
        outcome
    }

    /// Copies the current counters.
    pub fn snapshot(&self) -> PoolSnapshot {
        self.inner.lock().snapshot()
    }

    /// See [`Pool::initialize`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::initialize`].
    pub fn initialize(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        self.inner.lock().initialize(amount_a, amount_b)
    }

    /// See [`Pool::add_liquidity`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::add_liquidity`].
    pub fn add_liquidity(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        self.inner.lock().add_liquidity(amount_a, amount_b)
    }

    /// See [`Pool::remove_liquidity`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::remove_liquidity`].
    pub fn remove_liquidity(&self, shares: Shares) -> Result<(Amount, Amount), PoolError> {
        self.inner.lock().remove_liquidity(shares)
    }

    /// See [`Pool::swap`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::swap`].
    pub fn swap(&self, amount_in: Amount, direction: SwapDirection) -> Result<SwapResult, PoolError> {
        self.inner.lock().swap(amount_in, direction)
    }
}

impl From<Pool> for SharedPool {
    fn from(pool: Pool) -> Self {
        Self::new(pool)
    }
}
