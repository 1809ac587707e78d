//! Flash swap example.
//!
//! Borrows WETH from a USDC/WETH pair, repays it in WETH plus the swap fee
//! from inside the callback, and shows that the pair is locked against
//! reentry while the callback runs.  An underpaid loan is then rolled back.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pair_amm=debug cargo run --example flash_swap
//! ```

use std::cell::Cell;
use std::rc::Rc;

use pair_amm::factory::FactoryPair;
use pair_amm::prelude::*;

const E18: u128 = 1_000_000_000_000_000_000;

type DemoPair = FactoryPair<Rc<MemoryAssets>, Rc<ShareBook>, Rc<ManualClock>>;

/// Repays `repay` WETH out of its own wallet after trying to re-enter.
struct FlashBorrower {
    assets: Rc<MemoryAssets>,
    weth: Address,
    wallet: Address,
    repay: Amount,
    reentry: Cell<Option<Result<(), PairError>>>,
}

impl SwapCallee<DemoPair> for FlashBorrower {
    fn on_swap(
        &self,
        pair: &DemoPair,
        initiator: &Address,
        _amount0_out: Amount,
        amount1_out: Amount,
        data: &[u8],
    ) -> Result<(), PairError> {
        println!(
            "  callback: initiator {initiator:?} borrowed {amount1_out} WETH, data {:?}",
            String::from_utf8_lossy(data)
        );
        self.reentry.set(Some(pair.sync()));
        // The borrowed funds arrived at `wallet`; return them with the fee.
        self.assets
            .transfer(&self.weth, &self.wallet, &pair.address(), self.repay)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Flash Swap ===\n");

    let lp = Address::from_bytes([0x10; 32]);
    let borrower = Address::from_bytes([0x30; 32]);
    let usdc = Address::from_bytes([0x01; 32]);
    let weth = Address::from_bytes([0x02; 32]);

    let assets = Rc::new(MemoryAssets::new());
    let mut factory: PairFactory<_, Rc<ShareBook>, _> = PairFactory::new(
        Address::from_bytes([0xFA; 32]),
        Address::from_bytes([0x5E; 32]),
        Rc::clone(&assets),
        Rc::new(ManualClock::new(1_700_000_000)),
        PairConfig::default(),
    )?;
    let pair = factory.create_pair(usdc, weth)?;

    assets.deposit(&usdc, &pair.address(), Amount::new(5 * E18))?;
    assets.deposit(&weth, &pair.address(), Amount::new(10 * E18))?;
    pair.mint(&lp, &lp)?;
    let reserves = pair.get_reserves();
    println!("Pool: {} USDC / {} WETH\n", reserves.reserve0, reserves.reserve1);

    // ── 1. Borrow 1 WETH and repay it with the fee ──────────────────────
    //    repay >= borrowed / (1 - fee), rounded up.
    let borrowed = Amount::new(E18);
    let fee_bps = pair.config().swap_fee().scaled();
    let repay = Amount::new(borrowed.get() * 10_000 / (10_000 - fee_bps) + 1);
    assets.deposit(&weth, &borrower, Amount::new(repay.get() - borrowed.get()))?;

    let callee = FlashBorrower {
        assets: Rc::clone(&assets),
        weth,
        wallet: borrower,
        repay,
        reentry: Cell::new(None),
    };
    println!("Borrowing {borrowed} WETH, repaying {repay}");
    pair.swap(
        &borrower,
        Amount::ZERO,
        borrowed,
        &borrower,
        Some(FlashSwap::new(&callee, b"flash loan")),
    )?;
    println!("  reentry attempt: {:?}", callee.reentry.get());
    println!("  pair locked after swap: {}", pair.is_locked());
    let reserves = pair.get_reserves();
    println!("  pool now: {} USDC / {} WETH", reserves.reserve0, reserves.reserve1);
    println!("  borrower WETH left: {}", assets.balance(&weth, &borrower));

    // ── 2. Underpay by one wei ──────────────────────────────────────────
    let short = Amount::new(repay.get() - 1);
    assets.deposit(&weth, &borrower, Amount::new(short.get() - borrowed.get()))?;
    let stingy = FlashBorrower {
        assets: Rc::clone(&assets),
        weth,
        wallet: borrower,
        repay: short,
        reentry: Cell::new(None),
    };
    let before = pair.get_reserves();
    let checkpoints: [&dyn Checkpoint; 3] = [&*assets, &**pair.shares(), &*pair];
    println!("\nBorrowing {borrowed} WETH, repaying {short}");
    let result = atomically(&checkpoints, || {
        pair.swap(
            &borrower,
            Amount::ZERO,
            borrowed,
            &borrower,
            Some(FlashSwap::new(&stingy, b"flash loan")),
        )
    });
    println!("  result: {result:?}");
    println!("  reserves unchanged: {}", pair.get_reserves() == before);
    println!("  borrower WETH restored: {}", assets.balance(&weth, &borrower));

    Ok(())
}
