//! Constant-product pool (`x · y = k`).
//!
//! Fees are deducted from the input amount **before** the pricing formula
//! is applied, and stay in the pool.
//!
//! # Swap Algorithm (asset A → asset B)
//!
//! 1. `fee = ceil(amount_in × fee_bps / 10 000)`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = floor(reserve_b × net_input / (reserve_a + net_input))`
//! 4. `reserve_a += amount_in`
//! 5. `reserve_b −= amount_out`
//! 6. `accumulated_fee_a += fee`
//!
//! # Invariants
//!
//! - `share_supply == 0` iff both reserves are zero.
//! - Both reserves are positive whenever `share_supply > 0`.
//! - `k = reserve_a × reserve_b` never decreases across a swap: the output
//!   is floored and the fee enlarges `reserve_in` without any output.
//!
//! Every operation validates and computes the complete new state before
//! assigning any field, so an `Err` leaves the pool untouched.

use core::fmt;

use tracing::debug;

use crate::config::PoolConfig;
use crate::domain::{
    Amount, AssetPair, FeeSnapshot, FeeTier, PoolSnapshot, Price, Rounding, Shares, Side,
    SwapDirection, SwapResult,
};
use crate::error::PoolError;
use crate::math::{mul_div, sqrt_product, wide_mul, CheckedArithmetic, U256};

/// A constant-product liquidity pool over two assets.
///
/// Created empty from a [`PoolConfig`], seeded once with
/// [`initialize`](Self::initialize), then mutated in place by
/// [`add_liquidity`](Self::add_liquidity),
/// [`remove_liquidity`](Self::remove_liquidity), and [`swap`](Self::swap).
/// Each of those has a read-only `quote_*` twin returning exactly what the
/// mutation would.
///
/// `Pool` has no interior synchronisation; share it between threads with
/// [`SharedPool`](super::SharedPool).
///
/// # State
///
/// - `reserve_a` / `reserve_b`: balances held, fees included (raw units)
/// - `share_supply`: outstanding pool shares
/// - `accumulated_fee_a` / `accumulated_fee_b`: lifetime fee counters
///
/// # Example
///
/// ```rust
/// use pair_amm::domain::{Amount, Asset, AssetId, AssetPair, Decimals, SwapDirection};
/// use pair_amm::pool::Pool;
///
/// let pair = AssetPair::new(
///     Asset::new(AssetId::NATIVE, Decimals::MICRO),
///     Asset::new(AssetId::new(1001), Decimals::MICRO),
/// )
/// .expect("distinct assets");
/// let mut pool = Pool::new(pair);
///
/// pool.initialize(Amount::new(100_000), Amount::new(200_000)).expect("seeded");
/// let result = pool.swap(Amount::new(10_000), SwapDirection::AToB).expect("swap ok");
///
/// assert_eq!(result.fee(), Amount::new(30));
/// assert_eq!(result.amount_out(), Amount::new(18_132));
/// assert_eq!(pool.reserve_b(), Amount::new(181_868));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    config: PoolConfig,
    reserve_a: Amount,
    reserve_b: Amount,
    share_supply: Shares,
    accumulated_fee_a: Amount,
    accumulated_fee_b: Amount,
}

impl Pool {
    /// Creates an empty pool charging the default 30 bp fee.
    #[must_use]
    pub const fn new(pair: AssetPair) -> Self {
        Self::empty(PoolConfig::with_default_fee(pair))
    }

    /// Creates an empty pool from a configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::empty(*config))
    }

    const fn empty(config: PoolConfig) -> Self {
        Self {
            config,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            share_supply: Shares::ZERO,
            accumulated_fee_a: Amount::ZERO,
            accumulated_fee_b: Amount::ZERO,
        }
    }

    // -- accessors ------------------------------------------------------------

    /// Returns the configuration the pool was built from.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the traded asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        self.config.pair()
    }

    /// Returns the swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Returns the current reserve of asset A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the current reserve of asset B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the reserve on `side`.
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// Returns the outstanding pool-share supply.
    pub const fn share_supply(&self) -> Shares {
        self.share_supply
    }

    /// Returns the lifetime fees charged in asset A.
    pub const fn accumulated_fee_a(&self) -> Amount {
        self.accumulated_fee_a
    }

    /// Returns the lifetime fees charged in asset B.
    pub const fn accumulated_fee_b(&self) -> Amount {
        self.accumulated_fee_b
    }

    /// Returns the lifetime fees charged on `side`.
    pub const fn accumulated_fee(&self, side: Side) -> Amount {
        match side {
            Side::A => self.accumulated_fee_a,
            Side::B => self.accumulated_fee_b,
        }
    }

    /// `true` once [`initialize`](Self::initialize) has succeeded and the
    /// pool has not since been fully withdrawn.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        !self.share_supply.is_zero()
    }

    /// The invariant `reserve_a × reserve_b`, computed exactly.
    #[must_use]
    pub fn constant_product(&self) -> U256 {
        wide_mul(self.reserve_a.get(), self.reserve_b.get())
    }

    /// Marginal price of `base` in units of the other asset:
    /// `reserve_other / reserve_base`, rounded down.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidState`] if the pool is not initialized.
    /// - [`PoolError::ArithmeticOverflow`] if the ratio exceeds the
    ///   fixed-point range.
    pub fn spot_price(&self, base: Side) -> Result<Price, PoolError> {
        self.require_initialized()?;
        Price::from_ratio(self.reserve(base.opposite()), self.reserve(base), Rounding::Down)
    }

    /// Copies every counter.
    #[must_use]
    pub const fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            share_supply: self.share_supply,
            accumulated_fee_a: self.accumulated_fee_a,
            accumulated_fee_b: self.accumulated_fee_b,
        }
    }

    /// Fee counters and share supply, for
    /// [`provider_fee_share`](super::provider_fee_share).
    #[must_use]
    pub const fn fee_snapshot(&self) -> FeeSnapshot {
        self.snapshot().fees()
    }

    /// Replaces all counters with `snapshot`.
    ///
    /// Used to undo an optimistic mutation when the matching ledger
    /// settlement fails.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if the snapshot violates the
    /// reserve/share invariants.
    pub fn restore(&mut self, snapshot: PoolSnapshot) -> Result<(), PoolError> {
        check_reserves(snapshot.reserve_a, snapshot.reserve_b, snapshot.share_supply)
            .map_err(|_| PoolError::InvalidArgument("snapshot violates pool invariants"))?;
        self.reserve_a = snapshot.reserve_a;
        self.reserve_b = snapshot.reserve_b;
        self.share_supply = snapshot.share_supply;
        self.accumulated_fee_a = snapshot.accumulated_fee_a;
        self.accumulated_fee_b = snapshot.accumulated_fee_b;
        debug!(%snapshot, "pool state restored");
        Ok(())
    }

    /// Verifies the reserve/share invariants of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidState`] describing the first violation.
    pub fn check_invariants(&self) -> Result<(), PoolError> {
        check_reserves(self.reserve_a, self.reserve_b, self.share_supply)
    }

    /// Shares a deposit of `(amount_a, amount_b)` would mint in the pool's
    /// current state: [`quote_initialize`](Self::quote_initialize) while
    /// empty, [`quote_add_liquidity`](Self::quote_add_liquidity) afterwards.
    ///
    /// # Errors
    ///
    /// Same as the dispatched quote.
    pub fn quote_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        if self.is_initialized() {
            self.quote_add_liquidity(amount_a, amount_b)
        } else {
            self.quote_initialize(amount_a, amount_b)
        }
    }

    // -- initialize -------------------------------------------------------------

    /// Shares [`initialize`](Self::initialize) would mint:
    /// `floor(√(amount_a × amount_b))`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidArgument`] if either amount is zero.
    /// - [`PoolError::InvalidState`] if the pool is already initialized.
    pub fn quote_initialize(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        require_positive_pair(amount_a, amount_b)?;
        if self.is_initialized() {
            return Err(PoolError::InvalidState("pool is already initialized"));
        }
        // Both amounts are at least 1, so the root is at least 1.
        Ok(Shares::new(sqrt_product(amount_a.get(), amount_b.get())))
    }

    /// Seeds an empty pool and mints the initial share supply,
    /// `floor(√(amount_a × amount_b))`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidArgument`] if either amount is zero.
    /// - [`PoolError::InvalidState`] if the pool is already initialized.
    pub fn initialize(&mut self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        let minted = self.quote_initialize(amount_a, amount_b)?;

        self.reserve_a = amount_a;
        self.reserve_b = amount_b;
        self.share_supply = minted;

        debug!(%amount_a, %amount_b, %minted, "pool initialized");
        Ok(minted)
    }

    // -- add liquidity ----------------------------------------------------------

    /// Shares [`add_liquidity`](Self::add_liquidity) would mint:
    /// `min(⌊a × S / Ra⌋, ⌊b × S / Rb⌋)`.
    ///
    /// # Errors
    ///
    /// Same as [`add_liquidity`](Self::add_liquidity).
    pub fn quote_add_liquidity(
        &self,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, PoolError> {
        require_positive_pair(amount_a, amount_b)?;
        self.require_initialized()?;

        let supply = self.share_supply.get();
        let by_a = mul_div(amount_a.get(), supply, self.reserve_a.get(), Rounding::Down)?;
        let by_b = mul_div(amount_b.get(), supply, self.reserve_b.get(), Rounding::Down)?;
        let minted = by_a.min(by_b);

        if minted == 0 {
            return Err(PoolError::InvalidArgument("deposit too small to mint shares"));
        }
        Ok(Shares::new(minted))
    }

    /// Deposits both assets into an initialized pool.
    ///
    /// Shares are minted for the smaller of the two contribution ratios. A
    /// deposit off the current reserve ratio is accepted in full, but the
    /// surplus of the over-supplied asset earns no shares and stays in the
    /// pool for all holders.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidArgument`] if either amount is zero, or the
    ///   deposit is too small to mint a single share.
    /// - [`PoolError::InvalidState`] if the pool is not initialized.
    /// - [`PoolError::ArithmeticOverflow`] if a reserve or the supply would
    ///   overflow.
    pub fn add_liquidity(&mut self, amount_a: Amount, amount_b: Amount) -> Result<Shares, PoolError> {
        let minted = self.quote_add_liquidity(amount_a, amount_b)?;

        let reserve_a = self.reserve_a.safe_add(&amount_a, "reserve_a overflow on deposit")?;
        let reserve_b = self.reserve_b.safe_add(&amount_b, "reserve_b overflow on deposit")?;
        let share_supply = self.share_supply.safe_add(&minted, "share supply overflow")?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.share_supply = share_supply;

        debug!(%amount_a, %amount_b, %minted, supply = %share_supply, "liquidity added");
        Ok(minted)
    }

    // -- remove liquidity -------------------------------------------------------

    /// Amounts [`remove_liquidity`](Self::remove_liquidity) would return:
    /// `⌊reserve × shares / supply⌋` on each side.
    ///
    /// # Errors
    ///
    /// Same as [`remove_liquidity`](Self::remove_liquidity).
    pub fn quote_withdrawal(&self, shares: Shares) -> Result<(Amount, Amount), PoolError> {
        if shares.is_zero() {
            return Err(PoolError::InvalidArgument("shares to burn must be positive"));
        }
        if shares > self.share_supply {
            return Err(PoolError::InvalidArgument("shares exceed outstanding supply"));
        }
        let supply = self.share_supply.get();
        let out_a = mul_div(self.reserve_a.get(), shares.get(), supply, Rounding::Down)?;
        let out_b = mul_div(self.reserve_b.get(), shares.get(), supply, Rounding::Down)?;
        Ok((Amount::new(out_a), Amount::new(out_b)))
    }

    /// Burns `shares` and pays out the proportional slice of both
    /// reserves. Burning the whole supply empties the pool exactly.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if `shares` is zero or
    /// exceeds the supply.
    pub fn remove_liquidity(&mut self, shares: Shares) -> Result<(Amount, Amount), PoolError> {
        let (out_a, out_b) = self.quote_withdrawal(shares)?;

        let reserve_a = self.reserve_a.safe_sub(&out_a, "reserve_a underflow on withdrawal")?;
        let reserve_b = self.reserve_b.safe_sub(&out_b, "reserve_b underflow on withdrawal")?;
        let share_supply = self.share_supply.safe_sub(&shares, "share supply underflow")?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.share_supply = share_supply;

        debug!(%shares, %out_a, %out_b, supply = %share_supply, "liquidity removed");
        Ok((out_a, out_b))
    }

    // -- swap ---------------------------------------------------------------------

    /// The [`SwapResult`] [`swap`](Self::swap) would produce.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap).
    pub fn quote_swap(
        &self,
        amount_in: Amount,
        direction: SwapDirection,
    ) -> Result<SwapResult, PoolError> {
        if amount_in.is_zero() {
            return Err(PoolError::InvalidArgument("swap amount must be positive"));
        }
        self.require_initialized()?;

        let reserve_in = self.reserve(direction.input());
        let reserve_out = self.reserve(direction.output());

        let fee = self.fee_tier().fee_on(amount_in)?;
        let net_input = amount_in.safe_sub(&fee, "net input underflow")?;
        if net_input.is_zero() {
            return Err(PoolError::InvalidArgument(
                "swap amount is consumed entirely by the fee",
            ));
        }

        let denominator = reserve_in.safe_add(&net_input, "swap denominator overflow")?;
        let amount_out = Amount::new(mul_div(
            reserve_out.get(),
            net_input.get(),
            denominator.get(),
            Rounding::Down,
        )?);

        if amount_out.is_zero() {
            return Err(PoolError::InvalidArgument(
                "swap amount too small to produce output",
            ));
        }
        if amount_out >= reserve_out {
            return Err(PoolError::InvalidState("swap would drain the output reserve"));
        }

        SwapResult::new(direction, amount_in, amount_out, fee)
    }

    /// Sells `amount_in` of the direction's input asset for the other.
    ///
    /// The whole gross input, fee included, is added to the input reserve
    /// and the fee is also recorded in that side's fee counter.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidArgument`] if `amount_in` is zero, is consumed
    ///   by the fee, or produces no output.
    /// - [`PoolError::InvalidState`] if the pool is not initialized.
    /// - [`PoolError::ArithmeticOverflow`] if a reserve or fee counter
    ///   would overflow.
    pub fn swap(
        &mut self,
        amount_in: Amount,
        direction: SwapDirection,
    ) -> Result<SwapResult, PoolError> {
        let result = self.quote_swap(amount_in, direction)?;
        let input = direction.input();
        let output = direction.output();

        let new_in = self
            .reserve(input)
            .safe_add(&amount_in, "reserve_in overflow after swap")?;
        let new_out = self
            .reserve(output)
            .safe_sub(&result.amount_out(), "reserve_out underflow after swap")?;
        let new_fee = self
            .accumulated_fee(input)
            .safe_add(&result.fee(), "accumulated fee overflow")?;

        match input {
            Side::A => {
                self.reserve_a = new_in;
                self.reserve_b = new_out;
                self.accumulated_fee_a = new_fee;
            }
            Side::B => {
                self.reserve_b = new_in;
                self.reserve_a = new_out;
                self.accumulated_fee_b = new_fee;
            }
        }

        debug!(
            %direction,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            fee = %result.fee(),
            "swap executed"
        );
        Ok(result)
    }

    fn require_initialized(&self) -> Result<(), PoolError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(PoolError::InvalidState("pool is not initialized"))
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool[{}] {}", self.pair(), self.snapshot())
    }
}

fn require_positive_pair(amount_a: Amount, amount_b: Amount) -> Result<(), PoolError> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(PoolError::InvalidArgument("deposit amounts must be positive"));
    }
    Ok(())
}

fn check_reserves(reserve_a: Amount, reserve_b: Amount, supply: Shares) -> Result<(), PoolError> {
    if supply.is_zero() {
        if !reserve_a.is_zero() || !reserve_b.is_zero() {
            return Err(PoolError::InvalidState("reserves held without shares"));
        }
    } else if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(PoolError::InvalidState("shares outstanding over an empty reserve"));
    }
    Ok(())
}
