//! Constant-product pair lifecycle example.
//!
//! Creates a pair through the registry, seeds it with liquidity, trades in
//! both directions, turns the protocol fee on, and withdraws.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pair_amm=debug cargo run --example pair_lifecycle
//! ```

use std::rc::Rc;

use pair_amm::prelude::*;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Constant Product Pair Lifecycle ===\n");

    // ── 1. Registry and shared collaborators ────────────────────────────
    let setter = Address::from_bytes([0x5E; 32]);
    let treasury = Address::from_bytes([0xFE; 32]);
    let lp = Address::from_bytes([0x10; 32]);
    let trader = Address::from_bytes([0x20; 32]);
    let usdc = Address::from_bytes([0x01; 32]);
    let weth = Address::from_bytes([0x02; 32]);

    let assets = Rc::new(MemoryAssets::new());
    let clock = Rc::new(ManualClock::new(1_700_000_000));
    let mut factory: PairFactory<_, Rc<ShareBook>, _> = PairFactory::new(
        Address::from_bytes([0xFA; 32]),
        setter,
        Rc::clone(&assets),
        Rc::clone(&clock),
        PairConfig::default(),
    )?;
    let pair = factory.create_pair(weth, usdc)?;
    println!("Pair created at {}", pair.address());
    println!("  Swap fee:        {}", factory.config().swap_fee());
    println!("  Pairs in registry: {}", factory.all_pairs_len());

    // ── 2. First deposit ────────────────────────────────────────────────
    //    Shares = sqrt(amount0 * amount1) - minimum liquidity.
    assets.deposit(&usdc, &lp, Amount::new(5 * E18))?;
    assets.deposit(&weth, &lp, Amount::new(10 * E18))?;
    assets.transfer(&usdc, &lp, &pair.address(), Amount::new(5 * E18))?;
    assets.transfer(&weth, &lp, &pair.address(), Amount::new(10 * E18))?;
    let minted = pair.mint(&lp, &lp)?;
    print_reserves("After first deposit", &pair.get_reserves());
    println!("  Shares minted:   {minted}");
    println!("  Total supply:    {}", pair.shares().total_supply());

    // ── 3. Sell 1 USDC for WETH ─────────────────────────────────────────
    clock.advance(12);
    let reserves = pair.get_reserves();
    let out = get_amount_out(
        Amount::new(E18),
        reserves.reserve0.as_amount(),
        reserves.reserve1.as_amount(),
        pair.config().swap_fee(),
    )?;
    assets.deposit(&usdc, &trader, Amount::new(E18))?;
    assets.transfer(&usdc, &trader, &pair.address(), Amount::new(E18))?;
    pair.swap(&trader, Amount::ZERO, out, &trader, None)?;
    print_reserves("\nAfter selling 1 USDC", &pair.get_reserves());
    println!("  WETH received:   {out}");

    // One wei more than the quote breaks the invariant and is rejected.
    let over = get_amount_out(
        Amount::new(E18),
        pair.get_reserves().reserve0.as_amount(),
        pair.get_reserves().reserve1.as_amount(),
        pair.config().swap_fee(),
    )?;
    assets.deposit(&usdc, &trader, Amount::new(E18))?;
    let checkpoints: [&dyn Checkpoint; 2] = [&*assets, &**pair.shares()];
    let rejected = atomically(&checkpoints, || {
        assets.transfer(&usdc, &trader, &pair.address(), Amount::new(E18))?;
        let greedy = over.checked_add(&Amount::new(1)).ok_or(PairError::Overflow("demo"))?;
        pair.swap(&trader, Amount::ZERO, greedy, &trader, None)
    });
    println!("  Greedy swap:     {rejected:?}");

    // ── 4. Exact-output trade back to USDC ──────────────────────────────
    clock.advance(12);
    let want = Amount::new(E18 / 2);
    let reserves = pair.get_reserves();
    let needed = get_amount_in(
        want,
        reserves.reserve1.as_amount(),
        reserves.reserve0.as_amount(),
        pair.config().swap_fee(),
    )?;
    assets.deposit(&weth, &trader, needed)?;
    assets.transfer(&weth, &trader, &pair.address(), needed)?;
    pair.swap(&trader, want, Amount::ZERO, &trader, None)?;
    print_reserves("\nAfter buying 0.5 USDC", &pair.get_reserves());
    println!("  WETH paid:       {needed}");

    // ── 5. Protocol fee ─────────────────────────────────────────────────
    factory.fee_switch().set_fee_to(&setter, Some(treasury))?;
    assets.deposit(&usdc, &lp, Amount::new(E18))?;
    assets.deposit(&weth, &lp, Amount::new(2 * E18))?;
    assets.transfer(&usdc, &lp, &pair.address(), Amount::new(E18))?;
    assets.transfer(&weth, &lp, &pair.address(), Amount::new(2 * E18))?;
    pair.mint(&lp, &lp)?;
    println!("\nProtocol fee enabled, recipient {}", treasury);
    println!("  k_last:          {}", pair.k_last());

    for _ in 0..3 {
        let reserves = pair.get_reserves();
        let out = get_amount_out(
            Amount::new(E18),
            reserves.reserve0.as_amount(),
            reserves.reserve1.as_amount(),
            pair.config().swap_fee(),
        )?;
        assets.deposit(&usdc, &trader, Amount::new(E18))?;
        assets.transfer(&usdc, &trader, &pair.address(), Amount::new(E18))?;
        pair.swap(&trader, Amount::ZERO, out, &trader, None)?;
    }

    // ── 6. Withdraw everything ──────────────────────────────────────────
    let shares = pair.shares().balance_of(&lp);
    pair.shares().transfer(&lp, &pair.address(), shares)?;
    let (out0, out1) = pair.burn(&lp, &lp)?;
    print_reserves("\nAfter withdrawal", &pair.get_reserves());
    println!("  LP received:     {out0} USDC, {out1} WETH");
    println!("  Treasury shares: {}", pair.shares().balance_of(&treasury));

    // ── 7. Oracle accumulators ──────────────────────────────────────────
    println!("\nPrice accumulators (UQ112.112 · seconds):");
    println!("  price0: {}", pair.price0_cumulative_last());
    println!("  price1: {}", pair.price1_cumulative_last());

    println!("\nEvents:");
    for event in pair.take_events() {
        println!("  {:<5} {event:?}", event.kind());
    }

    Ok(())
}

fn print_reserves(label: &str, reserves: &Reserves) {
    println!("{label}:");
    println!("  reserve0 (USDC): {}", reserves.reserve0);
    println!("  reserve1 (WETH): {}", reserves.reserve1);
    println!("  last update:     {}", reserves.block_timestamp_last);
}
