//! Liquidity pool simulation against an in-memory ledger.
//!
//! A creator seeds a native/token pool, two providers join, two traders
//! swap in opposite directions, fees are attributed to the holders, and
//! everyone withdraws.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pair_amm=debug cargo run --example simulation
//! ```

use std::env;

use pair_amm::prelude::*;

const TOKEN: AssetId = AssetId::new(31_566_704);
const LP_TOKEN: AssetId = AssetId::new(31_566_705);

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Constant Product Pool Simulation ===\n");

    // ── 1. Accounts and funding ─────────────────────────────────────────
    let creator = Party::from("creator");
    let lp1 = Party::from("lp1");
    let lp2 = Party::from("lp2");
    let trader1 = Party::from("trader1");
    let trader2 = Party::from("trader2");

    let mut ledger = InMemoryLedger::new();
    ledger.fund(&creator, AssetId::NATIVE, Amount::new(300_000))?;
    ledger.fund(&creator, TOKEN, Amount::new(300_000))?;
    for party in [&lp1, &lp2, &trader1, &trader2] {
        ledger.fund(party, AssetId::NATIVE, Amount::new(300_000))?;
        ledger.fund(party, TOKEN, Amount::new(100_000))?;
    }
    println!("Funded 5 accounts with {} and {TOKEN}", AssetId::NATIVE);

    // ── 2. Pool with the default 0.30% fee ──────────────────────────────
    let pair = AssetPair::new(
        Asset::new(AssetId::NATIVE, Decimals::MICRO),
        Asset::new(TOKEN, Decimals::MICRO),
    )?;
    let config = PoolConfig::with_default_fee(pair);
    let pool = Pool::from_config(&config)?;
    let mut exchange = Exchange::new(pool, ledger, Party::from("pool"), LP_TOKEN)?;
    println!("Pool config: {config}");

    // ── 3. Liquidity ────────────────────────────────────────────────────
    let seed = exchange.provide(&creator, Amount::new(100_000), Amount::new(200_000))?;
    println!("\nCreator seeded 100000 / 200000, minted {seed} shares");
    let s1 = exchange.provide(&lp1, Amount::new(50_000), Amount::new(100_000))?;
    let s2 = exchange.provide(&lp2, Amount::new(50_000), Amount::new(100_000))?;
    println!("LP1 minted {s1} shares, LP2 minted {s2} shares");
    println!("Pool: {}", exchange.snapshot());

    // ── 4. Trading ──────────────────────────────────────────────────────
    let spot_before = exchange.read_pool(|p| p.spot_price(Side::A))?;
    let r1 = exchange.swap(&trader1, AssetId::NATIVE, Amount::new(10_000))?;
    println!("\n--- Trader1 sells 10000 {} ---", AssetId::NATIVE);
    println!("  Received:     {}", r1.amount_out());
    println!("  Fee paid:     {}", r1.fee());
    println!("  Price impact: {}", r1.price_impact(spot_before)?);

    let r2 = exchange.swap(&trader2, TOKEN, Amount::new(20_000))?;
    println!("\n--- Trader2 sells 20000 {TOKEN} ---");
    println!("  Received:     {}", r2.amount_out());
    println!("  Fee paid:     {}", r2.fee());
    println!("\nSpot price after trading: {}", exchange.read_pool(|p| p.spot_price(Side::A))?);

    // ── 5. Fee attribution ──────────────────────────────────────────────
    let holders = [creator.clone(), lp1.clone(), lp2.clone()];
    println!("\n--- Fees earned (kept in reserves) ---");
    for line in exchange.distribute_fees(&holders)? {
        println!(
            "  {:<8} {:>7} shares → {} {} + {} {TOKEN}",
            line.holder.name(),
            line.shares,
            line.fee_a,
            AssetId::NATIVE,
            line.fee_b
        );
    }

    // ── 6. Withdraw everything ──────────────────────────────────────────
    println!("\n--- Withdrawals ---");
    for (party, shares) in [(&lp1, s1), (&lp2, s2), (&creator, seed)] {
        let (a, b) = exchange.withdraw(party, shares)?;
        println!("  {:<8} withdrew {a} {} and {b} {TOKEN}", party.name(), AssetId::NATIVE);
    }

    println!("\nFinal pool state: {}", exchange.snapshot());
    for party in [&creator, &lp1, &lp2, &trader1, &trader2] {
        println!(
            "  {:<8} {:>7} {} {:>7} {TOKEN}",
            party.name(),
            exchange.ledger().balance(party, AssetId::NATIVE),
            AssetId::NATIVE,
            exchange.ledger().balance(party, TOKEN)
        );
    }

    Ok(())
}
