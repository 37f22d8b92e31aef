//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers:
//!
//! 1. **Swap reversibility**: round-trip A→B→A returns ≤ original.
//! 2. **Invariant preservation**: `k` is non-decreasing, and strictly
//!    increasing when a non-zero fee is charged.
//! 3. **Fee monotonicity**: larger input ⇒ larger or equal fee.
//! 4. **Liquidity conservation**: add then remove returns ≤ the deposit.
//! 5. **Price movement direction**: selling A lowers A's spot price.
//! 6. **Atomic failure**: rejected operations leave the pool unchanged.

use proptest::prelude::*;

use super::{provider_fee_share, Pool};
use crate::config::PoolConfig;
use crate::domain::{
    Amount, Asset, AssetId, AssetPair, BasisPoints, Decimals, FeeTier, Shares, Side,
    SwapDirection,
};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pair() -> AssetPair {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    let Ok(pair) = AssetPair::new(
        Asset::new(AssetId::NATIVE, d),
        Asset::new(AssetId::new(31_566_704), d),
    ) else {
        panic!("valid pair");
    };
    pair
}

fn make_pool(ra: u128, rb: u128, fee_bps: u32) -> Pool {
    let Ok(cfg) = PoolConfig::new(make_pair(), FeeTier::new(BasisPoints::new(fee_bps))) else {
        panic!("valid config");
    };
    let Ok(mut pool) = Pool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.initialize(Amount::new(ra), Amount::new(rb)) else {
        panic!("initialize failed");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Fee tiers from zero up to 10%.
fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=1_000u32
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::AToB), Just(SwapDirection::BToA)]
}

// ---------------------------------------------------------------------------
// Property 1: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut pool = make_pool(ra, rb, fee);

        let Ok(result_ab) = pool.swap(Amount::new(swap_in), SwapDirection::AToB) else {
            return Ok(());
        };
        let Ok(result_ba) = pool.swap(result_ab.amount_out(), SwapDirection::BToA) else {
            return Ok(());
        };
        let final_a = result_ba.amount_out().get();

        prop_assert!(
            final_a <= swap_in,
            "round-trip should lose value: final={} > original={}",
            final_a, swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
        swaps in prop::collection::vec((1u128..=1_000_000u128, direction_strategy()), 1..10),
    ) {
        let mut pool = make_pool(ra, rb, fee);
        for (amount, direction) in swaps {
            let k_before = pool.constant_product();
            if pool.swap(Amount::new(amount), direction).is_err() {
                continue;
            }
            let k_after = pool.constant_product();
            prop_assert!(k_after >= k_before, "k decreased: {} < {}", k_after, k_before);
            if fee > 0 {
                prop_assert!(k_after > k_before, "k flat despite a {}bp fee", fee);
            }
            prop_assert!(pool.check_invariants().is_ok());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Fee Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_monotonicity(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        small in 2u128..=50_000u128,
        extra in 1u128..=50_000u128,
    ) {
        let pool = make_pool(ra, rb, 30);
        let large = small + extra;
        let (Ok(q_small), Ok(q_large)) = (
            pool.quote_swap(Amount::new(small), SwapDirection::AToB),
            pool.quote_swap(Amount::new(large), SwapDirection::AToB),
        ) else {
            return Ok(());
        };
        prop_assert!(q_large.fee() >= q_small.fee());
        prop_assert!(q_large.amount_out() >= q_small.amount_out());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_returns_at_most_deposit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        add_a in 1u128..=1_000_000u128,
        add_b in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb, 30);
        let supply_before = pool.share_supply();

        let Ok(minted) = pool.add_liquidity(Amount::new(add_a), Amount::new(add_b)) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.remove_liquidity(minted) else {
            return Err(TestCaseError::fail("freshly minted shares must be burnable"));
        };

        prop_assert!(out_a.get() <= add_a, "withdrew more A: {} > {}", out_a, add_a);
        prop_assert!(out_b.get() <= add_b, "withdrew more B: {} > {}", out_b, add_b);
        prop_assert_eq!(pool.share_supply(), supply_before);
    }

    #[test]
    fn prop_remove_then_readd_restores_supply(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        pct in 1u128..=50u128,
    ) {
        let mut pool = make_pool(ra, rb, 30);
        let supply_before = pool.share_supply().get();
        let burn = Shares::new(supply_before * pct / 100);
        if burn.is_zero() { return Ok(()); }

        let Ok((out_a, out_b)) = pool.remove_liquidity(burn) else {
            return Ok(());
        };
        let Ok(_) = pool.add_liquidity(out_a, out_b) else {
            return Ok(());
        };

        let diff = pool.share_supply().get().abs_diff(supply_before);
        // Both legs floor, so the re-mint falls short by a rounding margin.
        let tolerance = supply_before / 1_000 + 2;
        prop_assert!(
            diff <= tolerance,
            "supply should be restored: before={} after={} diff={}",
            supply_before, pool.share_supply(), diff
        );
        prop_assert!(pool.share_supply().get() <= supply_before);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Price Movement Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selling_a_lowers_its_price(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let mut pool = make_pool(ra, rb, 30);
        let Ok(before) = pool.spot_price(Side::A) else {
            return Err(TestCaseError::fail("initialized pool has a price"));
        };
        if pool.swap(Amount::new((ra / 100).max(1_000)), SwapDirection::AToB).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.spot_price(Side::A) else {
            return Err(TestCaseError::fail("pool still initialized"));
        };
        prop_assert!(after <= before, "price of A rose: {} > {}", after, before);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Atomic Failure
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rejected_withdrawal_is_noop(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        excess in 1u128..=1_000u128,
    ) {
        let mut pool = make_pool(ra, rb, 30);
        let before = pool.clone();
        let too_many = Shares::new(pool.share_supply().get() + excess);
        prop_assert!(pool.remove_liquidity(too_many).is_err());
        prop_assert_eq!(pool, before);
    }

    #[test]
    fn prop_fee_shares_never_exceed_counters(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in prop::collection::vec(100u128..=100_000u128, 1..8),
        holder_pct in 0u128..=100u128,
    ) {
        let mut pool = make_pool(ra, rb, 30);
        for (i, amount) in trades.iter().enumerate() {
            let direction = if i % 2 == 0 { SwapDirection::AToB } else { SwapDirection::BToA };
            let _ = pool.swap(Amount::new(*amount), direction);
        }
        let fees = pool.fee_snapshot();
        let holding = Shares::new(fees.share_supply.get() * holder_pct / 100);
        let Ok((fee_a, fee_b)) = provider_fee_share(&fees, holding) else {
            return Err(TestCaseError::fail("holding within supply"));
        };
        prop_assert!(fee_a <= fees.accumulated_fee_a);
        prop_assert!(fee_b <= fees.accumulated_fee_b);
    }
}
