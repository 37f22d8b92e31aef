//! In-memory `HashMap` ledger for tests, demos, and simulations.
//!
//! Balances are lost when the value is dropped.

use std::collections::HashMap;

use tracing::debug;

use super::{Ledger, LedgerError, Party, Transfer};
use crate::domain::{Amount, AssetId};

type Key = (Party, AssetId);

/// `HashMap`-backed [`Ledger`].
///
/// Settlement stages every touched balance first and only writes them
/// back once all legs have been applied, so a failing leg leaves the
/// ledger untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<Key, Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `party` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceOverflow`] if the balance would
    /// overflow.
    pub fn fund(&mut self, party: &Party, asset: AssetId, amount: Amount) -> Result<(), LedgerError> {
        self.settle(&[Transfer::Mint {
            asset,
            to: party.clone(),
            amount,
        }])
    }

    /// Sum of all balances of `asset`, or `None` if it exceeds `u128`.
    #[must_use]
    pub fn total_issued(&self, asset: AssetId) -> Option<u128> {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .try_fold(0u128, |total, (_, amount)| total.checked_add(amount.get()))
    }

    fn staged<'a>(&self, staged: &'a mut HashMap<Key, Amount>, key: Key) -> &'a mut Amount {
        staged.entry(key).or_insert_with_key(|k| {
            self.balances.get(k).copied().unwrap_or(Amount::ZERO)
        })
    }

    fn debit(
        &self,
        staged: &mut HashMap<Key, Amount>,
        party: &Party,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let balance = self.staged(staged, (party.clone(), asset));
        let available = *balance;
        *balance = available
            .checked_sub(&amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                party: party.clone(),
                asset,
                available,
                needed: amount,
            })?;
        Ok(())
    }

    fn credit(
        &self,
        staged: &mut HashMap<Key, Amount>,
        party: &Party,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let balance = self.staged(staged, (party.clone(), asset));
        let held = *balance;
        *balance = held
            .checked_add(&amount)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                party: party.clone(),
                asset,
            })?;
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, party: &Party, asset: AssetId) -> Amount {
        self.balances
            .get(&(party.clone(), asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), LedgerError> {
        let mut staged = HashMap::new();
        for transfer in transfers {
            match transfer {
                Transfer::Move {
                    asset,
                    from,
                    to,
                    amount,
                } => {
                    self.debit(&mut staged, from, *asset, *amount)?;
                    self.credit(&mut staged, to, *asset, *amount)?;
                }
                Transfer::Mint { asset, to, amount } => {
                    self.credit(&mut staged, to, *asset, *amount)?;
                }
                Transfer::Burn {
                    asset,
                    from,
                    amount,
                } => {
                    self.debit(&mut staged, from, *asset, *amount)?;
                }
            }
        }
        self.balances.extend(staged);
        debug!(legs = transfers.len(), "transfers settled");
        Ok(())
    }
}
