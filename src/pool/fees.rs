//! Pro-rata attribution of accumulated swap fees to share holders.
//!
//! Fees never leave the pool: they are part of the reserves and a holder
//! realises them on withdrawal. These helpers only answer how much of the
//! lifetime fee counters a given holding corresponds to.

use crate::domain::{Amount, FeeSnapshot, Rounding, Shares};
use crate::error::PoolError;
use crate::math::{mul_div, CheckedArithmetic};

/// Portion of each fee counter attributable to `provider_shares`:
/// `⌊accumulated_fee × provider_shares / share_supply⌋` per side.
///
/// # Errors
///
/// - [`PoolError::InvalidState`] if no shares are outstanding.
/// - [`PoolError::InvalidArgument`] if `provider_shares` exceeds the supply.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeSnapshot, Shares};
/// use pair_amm::pool::provider_fee_share;
///
/// let fees = FeeSnapshot {
///     accumulated_fee_a: Amount::new(90),
///     accumulated_fee_b: Amount::new(10),
///     share_supply: Shares::new(3),
/// };
/// let share = provider_fee_share(&fees, Shares::new(1)).expect("valid holding");
/// assert_eq!(share, (Amount::new(30), Amount::new(3)));
/// ```
pub fn provider_fee_share(
    fees: &FeeSnapshot,
    provider_shares: Shares,
) -> Result<(Amount, Amount), PoolError> {
    if fees.share_supply.is_zero() {
        return Err(PoolError::InvalidState("no shares outstanding"));
    }
    if provider_shares > fees.share_supply {
        return Err(PoolError::InvalidArgument("holding exceeds share supply"));
    }
    let supply = fees.share_supply.get();
    let fee_a = mul_div(
        fees.accumulated_fee_a.get(),
        provider_shares.get(),
        supply,
        Rounding::Down,
    )?;
    let fee_b = mul_div(
        fees.accumulated_fee_b.get(),
        provider_shares.get(),
        supply,
        Rounding::Down,
    )?;
    Ok((Amount::new(fee_a), Amount::new(fee_b)))
}

/// One holder's line in a fee report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFees<K> {
    /// Holder key.
    pub holder: K,
    /// Shares held.
    pub shares: Shares,
    /// Attributed fees in asset A.
    pub fee_a: Amount,
    /// Attributed fees in asset B.
    pub fee_b: Amount,
}

/// Applies [`provider_fee_share`] to every holding.
///
/// Because each line is floored, the attributed totals never exceed the
/// counters.
///
/// # Errors
///
/// Propagates [`provider_fee_share`] errors, and returns
/// [`PoolError::InvalidArgument`] if the holdings sum past the supply.
pub fn split_fees<K, I>(fees: &FeeSnapshot, holdings: I) -> Result<Vec<ProviderFees<K>>, PoolError>
where
    I: IntoIterator<Item = (K, Shares)>,
{
    let mut total = Shares::ZERO;
    let mut report = Vec::new();
    for (holder, shares) in holdings {
        total = total.safe_add(&shares, "holding total overflow")?;
        if total > fees.share_supply {
            return Err(PoolError::InvalidArgument("holdings exceed share supply"));
        }
        let (fee_a, fee_b) = provider_fee_share(fees, shares)?;
        report.push(ProviderFees {
            holder,
            shares,
            fee_a,
            fee_b,
        });
    }
    Ok(report)
}
