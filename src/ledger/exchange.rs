//! Orchestrator that keeps a pool and a ledger in step.
//!
//! Each operation runs inside [`SharedPool::transact`]: the pool is
//! mutated first, the matching transfer group is settled, and a failed
//! settlement restores the pool snapshot. Either both sides change or
//! neither does.
//!
//! The exchange owns its pool outright. Callers get read access only, so
//! no mutation can reach the pool without a matching settlement.

use tracing::{info, instrument, warn};

use super::{Ledger, LedgerError, Party, Transfer};
use crate::domain::{Amount, AssetId, PoolSnapshot, Shares, SwapResult};
use crate::pool::{split_fees, Pool, ProviderFees, SharedPool};

/// Pool plus ledger, driven as one unit.
///
/// Pooled assets are held by `pool_account` on the ledger. Pool shares are
/// a ledger asset of their own (`share_asset`), minted to providers on
/// deposit and burned on withdrawal, so a provider's share balance on the
/// ledger always matches what the pool issued to them.
#[derive(Debug)]
pub struct Exchange<L> {
    pool: SharedPool,
    ledger: L,
    pool_account: Party,
    share_asset: AssetId,
}

impl<L: Ledger> Exchange<L> {
    /// Creates an exchange that takes ownership of the empty `pool`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ShareAssetCollision`] if `share_asset` is one of the
    ///   pooled assets.
    /// - [`LedgerError::PoolNotEmpty`] if `pool` already holds liquidity,
    ///   since those reserves and shares have no counterpart on `ledger`.
    pub fn new(
        pool: Pool,
        ledger: L,
        pool_account: Party,
        share_asset: AssetId,
    ) -> Result<Self, LedgerError> {
        if pool.pair().side_of(share_asset).is_some() {
            return Err(LedgerError::ShareAssetCollision(share_asset));
        }
        if pool.is_initialized() {
            return Err(LedgerError::PoolNotEmpty);
        }
        Ok(Self {
            pool: SharedPool::new(pool),
            ledger,
            pool_account,
            share_asset,
        })
    }

    /// Runs `f` with read access to the pool.
    pub fn read_pool<R>(&self, f: impl FnOnce(&Pool) -> R) -> R {
        self.pool.read(f)
    }

    /// Copies the pool's current counters.
    pub fn snapshot(&self) -> PoolSnapshot {
        self.pool.snapshot()
    }

    /// Returns the ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access, e.g. for funding accounts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Returns the account that holds the pooled assets.
    pub const fn pool_account(&self) -> &Party {
        &self.pool_account
    }

    /// Returns the ledger asset that represents pool shares.
    pub const fn share_asset(&self) -> AssetId {
        self.share_asset
    }

    /// Pool shares `party` holds on the ledger.
    pub fn shares_of(&self, party: &Party) -> Shares {
        Shares::new(self.ledger.balance(party, self.share_asset).get())
    }

    /// Deposits both assets from `provider` and mints shares to them.
    ///
    /// Seeds the pool if it is empty, otherwise adds liquidity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pool`] if the pool rejects the deposit, or the
    /// ledger's error if `provider` cannot fund it.
    #[instrument(skip_all, fields(provider = %provider, %amount_a, %amount_b))]
    pub fn provide(
        &mut self,
        provider: &Party,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, LedgerError> {
        let ledger = &mut self.ledger;
        let pool_account = &self.pool_account;
        let share_asset = self.share_asset;

        let result = self.pool.transact(|pool| {
            let minted = if pool.is_initialized() {
                pool.add_liquidity(amount_a, amount_b)?
            } else {
                pool.initialize(amount_a, amount_b)?
            };
            let pair = *pool.pair();
            ledger.settle(&[
                Transfer::Move {
                    asset: pair.asset_a().id(),
                    from: provider.clone(),
                    to: pool_account.clone(),
                    amount: amount_a,
                },
                Transfer::Move {
                    asset: pair.asset_b().id(),
                    from: provider.clone(),
                    to: pool_account.clone(),
                    amount: amount_b,
                },
                Transfer::Mint {
                    asset: share_asset,
                    to: provider.clone(),
                    amount: Amount::new(minted.get()),
                },
            ])?;
            Ok(minted)
        });

        match &result {
            Ok(minted) => info!(%minted, "liquidity provided"),
            Err(e) => warn!(error = %e, "deposit rejected"),
        }
        result
    }

    /// Burns `shares` held by `provider` and pays out both assets.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pool`] if the pool rejects the share count, or
    /// [`LedgerError::InsufficientBalance`] if `provider` holds fewer shares.
    #[instrument(skip_all, fields(provider = %provider, %shares))]
    pub fn withdraw(
        &mut self,
        provider: &Party,
        shares: Shares,
    ) -> Result<(Amount, Amount), LedgerError> {
        let ledger = &mut self.ledger;
        let pool_account = &self.pool_account;
        let share_asset = self.share_asset;

        let result = self.pool.transact(|pool| {
            let (out_a, out_b) = pool.remove_liquidity(shares)?;
            let pair = *pool.pair();
            ledger.settle(&[
                Transfer::Burn {
                    asset: share_asset,
                    from: provider.clone(),
                    amount: Amount::new(shares.get()),
                },
                Transfer::Move {
                    asset: pair.asset_a().id(),
                    from: pool_account.clone(),
                    to: provider.clone(),
                    amount: out_a,
                },
                Transfer::Move {
                    asset: pair.asset_b().id(),
                    from: pool_account.clone(),
                    to: provider.clone(),
                    amount: out_b,
                },
            ])?;
            Ok((out_a, out_b))
        });

        match &result {
            Ok((out_a, out_b)) => info!(%out_a, %out_b, "liquidity withdrawn"),
            Err(e) => warn!(error = %e, "withdrawal rejected"),
        }
        result
    }

    /// Sells `amount_in` of `asset_in` from `trader` for the other asset.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAsset`] if `asset_in` is not pooled,
    /// [`LedgerError::Pool`] if the pool rejects the swap, or the ledger's
    /// error if `trader` cannot pay.
    #[instrument(skip_all, fields(trader = %trader, %asset_in, %amount_in))]
    pub fn swap(
        &mut self,
        trader: &Party,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<SwapResult, LedgerError> {
        let ledger = &mut self.ledger;
        let pool_account = &self.pool_account;

        let result = self.pool.transact(|pool| {
            let pair = *pool.pair();
            let direction = pair
                .direction_selling(asset_in)
                .ok_or(LedgerError::UnknownAsset(asset_in))?;
            let swap = pool.swap(amount_in, direction)?;
            ledger.settle(&[
                Transfer::Move {
                    asset: asset_in,
                    from: trader.clone(),
                    to: pool_account.clone(),
                    amount: amount_in,
                },
                Transfer::Move {
                    asset: pair.asset(direction.output()).id(),
                    from: pool_account.clone(),
                    to: trader.clone(),
                    amount: swap.amount_out(),
                },
            ])?;
            Ok(swap)
        });

        match &result {
            Ok(swap) => info!(%swap, "swap settled"),
            Err(e) => warn!(error = %e, "swap rejected"),
        }
        result
    }

    /// Attributes the pool's lifetime fees to `providers` in proportion to
    /// the shares each holds on the ledger.
    ///
    /// Nothing is transferred: fees stay in the reserves and each provider
    /// realises their part when withdrawing.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pool`] if the pool has no shares outstanding
    /// or the listed holdings exceed the supply (e.g. a provider listed
    /// twice).
    #[instrument(skip_all, fields(providers = providers.len()))]
    pub fn distribute_fees(
        &self,
        providers: &[Party],
    ) -> Result<Vec<ProviderFees<Party>>, LedgerError> {
        let fees = self.pool.read(|pool| pool.fee_snapshot());
        let holdings = providers
            .iter()
            .map(|party| (party.clone(), self.shares_of(party)));
        let report = split_fees(&fees, holdings)?;
        for line in &report {
            info!(
                provider = %line.holder,
                shares = %line.shares,
                fee_a = %line.fee_a,
                fee_b = %line.fee_b,
                "fee share"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Asset, AssetPair, Decimals};
    use crate::error::PoolError;
    use crate::ledger::InMemoryLedger;

    const TOKEN: AssetId = AssetId::new(31_566_704);
    const LP_TOKEN: AssetId = AssetId::new(90_001);

    fn lp1() -> Party {
        Party::from("lp1")
    }

    fn lp2() -> Party {
        Party::from("lp2")
    }

    fn trader() -> Party {
        Party::from("trader")
    }

    fn pair() -> AssetPair {
        let Ok(pair) = AssetPair::new(
            Asset::new(AssetId::NATIVE, Decimals::MICRO),
            Asset::new(TOKEN, Decimals::MICRO),
        ) else {
            panic!("valid pair");
        };
        pair
    }

    fn exchange() -> Exchange<InMemoryLedger> {
        let mut ledger = InMemoryLedger::new();
        for party in [lp1(), lp2(), trader()] {
            let Ok(()) = ledger.fund(&party, AssetId::NATIVE, Amount::new(1_000_000)) else {
                panic!("fund failed");
            };
            let Ok(()) = ledger.fund(&party, TOKEN, Amount::new(1_000_000)) else {
                panic!("fund failed");
            };
        }
        let Ok(exchange) = Exchange::new(
            Pool::new(pair()),
            ledger,
            Party::from("pool"),
            LP_TOKEN,
        ) else {
            panic!("valid exchange");
        };
        exchange
    }

    fn assert_books_match(exchange: &Exchange<InMemoryLedger>) {
        let snap = exchange.snapshot();
        let account = exchange.pool_account();
        assert_eq!(exchange.ledger().balance(account, AssetId::NATIVE), snap.reserve_a);
        assert_eq!(exchange.ledger().balance(account, TOKEN), snap.reserve_b);
        assert_eq!(
            exchange.ledger().total_issued(LP_TOKEN),
            Some(snap.share_supply.get())
        );
    }

    #[test]
    fn share_asset_must_be_distinct() {
        let result = Exchange::new(
            Pool::new(pair()),
            InMemoryLedger::new(),
            Party::from("pool"),
            TOKEN,
        );
        assert!(matches!(result, Err(LedgerError::ShareAssetCollision(id)) if id == TOKEN));
    }

    #[test]
    fn seeded_pool_rejected() {
        let mut pool = Pool::new(pair());
        let Ok(_) = pool.initialize(Amount::new(100_000), Amount::new(200_000)) else {
            panic!("initialize failed");
        };
        let result = Exchange::new(pool, InMemoryLedger::new(), Party::from("pool"), LP_TOKEN);
        assert!(matches!(result, Err(LedgerError::PoolNotEmpty)));
    }

    #[test]
    fn drained_pool_accepted() {
        let mut pool = Pool::new(pair());
        let Ok(minted) = pool.initialize(Amount::new(100_000), Amount::new(200_000)) else {
            panic!("initialize failed");
        };
        let Ok(_) = pool.remove_liquidity(minted) else {
            panic!("remove failed");
        };
        let result = Exchange::new(pool, InMemoryLedger::new(), Party::from("pool"), LP_TOKEN);
        assert!(result.is_ok());
    }

    #[test]
    fn pool_reads_track_settlements() {
        let mut ex = exchange();
        let Ok(_) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        let Ok(_) = ex.swap(&trader(), AssetId::NATIVE, Amount::new(10_000)) else {
            panic!("swap failed");
        };
        assert_eq!(ex.read_pool(Pool::reserve_a), Amount::new(110_000));
        assert_books_match(&ex);

        // the sole provider can take everything back out
        let Ok((out_a, out_b)) = ex.withdraw(&lp1(), Shares::new(141_421)) else {
            panic!("withdraw failed");
        };
        assert_eq!((out_a, out_b), (Amount::new(110_000), Amount::new(181_868)));
        assert!(ex.snapshot().is_empty());
        assert_books_match(&ex);
    }

    #[test]
    fn provide_seeds_then_adds() {
        let mut ex = exchange();
        let Ok(first) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        assert_eq!(first, Shares::new(141_421));
        let Ok(second) = ex.provide(&lp2(), Amount::new(50_000), Amount::new(100_000)) else {
            panic!("add failed");
        };
        assert_eq!(second, Shares::new(70_710));
        assert_eq!(ex.shares_of(&lp1()), first);
        assert_eq!(ex.shares_of(&lp2()), second);
        assert_eq!(
            ex.ledger().balance(&lp1(), AssetId::NATIVE),
            Amount::new(900_000)
        );
        assert_books_match(&ex);
    }

    #[test]
    fn swap_moves_both_legs() {
        let mut ex = exchange();
        let Ok(_) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        let Ok(result) = ex.swap(&trader(), AssetId::NATIVE, Amount::new(10_000)) else {
            panic!("swap failed");
        };
        assert_eq!(result.amount_out(), Amount::new(18_132));
        assert_eq!(
            ex.ledger().balance(&trader(), AssetId::NATIVE),
            Amount::new(990_000)
        );
        assert_eq!(
            ex.ledger().balance(&trader(), TOKEN),
            Amount::new(1_018_132)
        );
        assert_books_match(&ex);
    }

    #[test]
    fn unfunded_swap_rolls_back_pool() {
        let mut ex = exchange();
        let Ok(_) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        let before = ex.snapshot();
        let result = ex.swap(&Party::from("nobody"), TOKEN, Amount::new(5_000));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { ref party, .. }) if party.name() == "nobody"
        ));
        assert_eq!(ex.snapshot(), before);
        assert_books_match(&ex);
    }

    #[test]
    fn unknown_asset_rejected() {
        let mut ex = exchange();
        let Ok(_) = ex.provide(&lp1(), Amount::new(1_000), Amount::new(1_000)) else {
            panic!("seed failed");
        };
        assert_eq!(
            ex.swap(&trader(), AssetId::new(3), Amount::new(10)),
            Err(LedgerError::UnknownAsset(AssetId::new(3)))
        );
    }

    #[test]
    fn pool_errors_pass_through() {
        let mut ex = exchange();
        assert_eq!(
            ex.swap(&trader(), AssetId::NATIVE, Amount::new(10)),
            Err(LedgerError::Pool(PoolError::InvalidState("pool is not initialized")))
        );
    }

    #[test]
    fn withdraw_more_than_held_rolls_back() {
        let mut ex = exchange();
        let Ok(_) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        let Ok(_) = ex.provide(&lp2(), Amount::new(50_000), Amount::new(100_000)) else {
            panic!("add failed");
        };
        let before = ex.snapshot();
        // within supply, beyond lp2's holding
        let result = ex.withdraw(&lp2(), Shares::new(100_000));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(ex.snapshot(), before);
    }

    #[test]
    fn full_cycle_returns_everything() {
        let mut ex = exchange();
        let Ok(shares1) = ex.provide(&lp1(), Amount::new(100_000), Amount::new(200_000)) else {
            panic!("seed failed");
        };
        let Ok(shares2) = ex.provide(&lp2(), Amount::new(50_000), Amount::new(100_000)) else {
            panic!("add failed");
        };
        let Ok(_) = ex.swap(&trader(), AssetId::NATIVE, Amount::new(10_000)) else {
            panic!("swap failed");
        };
        let Ok(_) = ex.swap(&trader(), TOKEN, Amount::new(20_000)) else {
            panic!("swap failed");
        };

        let Ok(report) = ex.distribute_fees(&[lp1(), lp2()]) else {
            panic!("fee report failed");
        };
        assert_eq!(report.len(), 2);
        assert!(report[0].fee_a > report[1].fee_a);

        let Ok(_) = ex.withdraw(&lp1(), shares1) else {
            panic!("withdraw failed");
        };
        let Ok(_) = ex.withdraw(&lp2(), shares2) else {
            panic!("withdraw failed");
        };
        assert!(ex.snapshot().is_empty());
        assert_books_match(&ex);
        // nothing created or destroyed
        assert_eq!(ex.ledger().total_issued(AssetId::NATIVE), Some(3_000_000));
        assert_eq!(ex.ledger().total_issued(TOKEN), Some(3_000_000));
    }

    #[test]
    fn fee_report_needs_shares() {
        let ex = exchange();
        assert_eq!(
            ex.distribute_fees(&[lp1()]),
            Err(LedgerError::Pool(PoolError::InvalidState("no shares outstanding")))
        );
    }
}
