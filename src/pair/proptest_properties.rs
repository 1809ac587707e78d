//! Property-based tests for the pair engine.
//!
//! 1. **Constant product** — `reserve0 × reserve1` never decreases across a
//!    successful swap.
//! 2. **Quote boundary** — the quoted output settles; one unit more fails.
//! 3. **First deposit** — `⌊√(a0 × a1)⌋ − 1 000` shares, 1 000 locked.
//! 4. **Burn proportionality** — `⌊L × b_i / S⌋` of each asset.
//! 5. **Sync idempotence** — a second sync leaves reserves unchanged.
//! 6. **Reserves track balances** — after any successful operation.

#![allow(clippy::panic)]

use alloy_primitives::U256;
use proptest::prelude::*;

use super::harness::{Harness, ALICE, BOB, PAIR, TOKEN0, TOKEN1};
use crate::domain::{Address, Amount, FeeTier};
use crate::error::PairError;
use crate::math::get_amount_out;
use crate::memory::{atomically, Checkpoint};
use crate::traits::ShareLedger;

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Floor square root by Newton iteration, independent of the engine's
/// 256-bit root.
fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Reserve values in `[10_000, 10^24]`.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Deposit amounts whose product fits in `u128`.
fn deposit_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000_000u128
}

/// Swap input as a fraction (in basis points) of the input reserve.
fn input_fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=50_000u128
}

fn seeded(r0: u128, r1: u128) -> Harness {
    let h = Harness::new();
    h.provide(r0, r1, ALICE);
    h
}

fn assert_reserves_match_balances(h: &Harness) -> Result<(), TestCaseError> {
    let (r0, r1) = h.reserves();
    prop_assert_eq!(r0, h.balance(TOKEN0, PAIR));
    prop_assert_eq!(r1, h.balance(TOKEN1, PAIR));
    Ok(())
}

// ---------------------------------------------------------------------------
// Property 1 + 2: swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_never_decreases_product(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        frac in input_fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let h = seeded(r0, r1);
        let (reserve_in, reserve_out) = if zero_for_one { (r0, r1) } else { (r1, r0) };
        let amount_in = (reserve_in * frac / 10_000).max(1);
        let Ok(out) = get_amount_out(
            Amount::new(amount_in),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
            FeeTier::default(),
        ) else {
            return Ok(());
        };
        if out.is_zero() {
            return Ok(());
        }

        let (asset_in, out0, out1) = if zero_for_one {
            (TOKEN0, Amount::ZERO, out)
        } else {
            (TOKEN1, out, Amount::ZERO)
        };
        h.send(asset_in, amount_in);
        prop_assert_eq!(h.pair.swap(&ALICE, out0, out1, &BOB, None), Ok(()));

        let (n0, n1) = h.reserves();
        prop_assert!(
            U256::from(n0) * U256::from(n1) >= U256::from(r0) * U256::from(r1),
            "product shrank: {} * {} < {} * {}", n0, n1, r0, r1
        );
        assert_reserves_match_balances(&h)?;
    }

    #[test]
    fn prop_quote_is_exact_boundary(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        frac in input_fraction_strategy(),
    ) {
        let amount_in = (r0 * frac / 10_000).max(1);
        let Ok(out) = get_amount_out(
            Amount::new(amount_in),
            Amount::new(r0),
            Amount::new(r1),
            FeeTier::default(),
        ) else {
            return Ok(());
        };
        if out.get() + 1 >= r1 {
            return Ok(());
        }

        let h = seeded(r0, r1);
        h.send(TOKEN0, amount_in);
        let checkpoints: [&dyn Checkpoint; 1] = [&*h.assets];
        let over = atomically(&checkpoints, || {
            h.pair.swap(&ALICE, Amount::ZERO, Amount::new(out.get() + 1), &BOB, None)
        });
        prop_assert_eq!(over, Err(PairError::InvariantViolation));
        if !out.is_zero() {
            prop_assert_eq!(h.pair.swap(&ALICE, Amount::ZERO, out, &BOB, None), Ok(()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3 + 4: liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_first_deposit_formula(
        a0 in deposit_strategy(),
        a1 in deposit_strategy(),
    ) {
        let root = isqrt(a0 * a1);
        let h = Harness::new();
        h.send(TOKEN0, a0);
        h.send(TOKEN1, a1);
        let result = h.pair.mint(&ALICE, &ALICE);

        if root <= 1_000 {
            prop_assert_eq!(result, Err(PairError::InsufficientLiquidityMinted));
            return Ok(());
        }
        let Ok(minted) = result else {
            panic!("mint should succeed for root {root}");
        };
        prop_assert_eq!(minted.get(), root - 1_000);
        prop_assert_eq!(h.shares.balance_of(&Address::ZERO).get(), 1_000);
        prop_assert_eq!(h.shares.total_supply().get(), root);
        assert_reserves_match_balances(&h)?;
    }

    #[test]
    fn prop_burn_is_proportional(
        a0 in 1_000_000u128..=1_000_000_000_000_000_000u128,
        a1 in 1_000_000u128..=1_000_000_000_000_000_000u128,
        donation in 0u128..=1_000_000u128,
        fraction in 1u128..=10_000u128,
    ) {
        let h = Harness::new();
        let held = h.provide(a0, a1, ALICE).get();
        h.send(TOKEN0, donation);

        let burn = (held * fraction / 10_000).max(1);
        h.return_shares(ALICE, burn);
        let supply = h.shares.total_supply().get();
        let b0 = h.balance(TOKEN0, PAIR);
        let b1 = h.balance(TOKEN1, PAIR);
        let expected = (floor_mul_div(burn, b0, supply), floor_mul_div(burn, b1, supply));

        match h.pair.burn(&ALICE, &BOB) {
            Ok((out0, out1)) => {
                prop_assert_eq!((out0.get(), out1.get()), expected);
                prop_assert_eq!(h.balance(TOKEN0, BOB), out0.get());
                prop_assert_eq!(h.shares.total_supply().get(), supply - burn);
                assert_reserves_match_balances(&h)?;
            }
            Err(err) => {
                prop_assert_eq!(err, PairError::InsufficientLiquidityBurned);
                prop_assert!(expected.0 == 0 || expected.1 == 0);
            }
        }
    }
}

/// `⌊a × b / d⌋`, reference arithmetic for the burn property.
fn floor_mul_div(a: u128, b: u128, d: u128) -> u128 {
    let Ok(v) = u128::try_from(U256::from(a) * U256::from(b) / U256::from(d)) else {
        panic!("quotient fits");
    };
    v
}

// ---------------------------------------------------------------------------
// Property 5 + 6: maintenance
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sync_is_idempotent(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        drift0 in 0u128..=1_000_000u128,
        drift1 in 0u128..=1_000_000u128,
    ) {
        let h = seeded(r0, r1);
        h.send(TOKEN0, drift0);
        h.send(TOKEN1, drift1);
        prop_assert_eq!(h.pair.sync(), Ok(()));
        let first = h.pair.get_reserves();
        prop_assert_eq!(h.pair.sync(), Ok(()));
        prop_assert_eq!(h.pair.get_reserves(), first);
        prop_assert_eq!(h.reserves(), (r0 + drift0, r1 + drift1));
    }

    #[test]
    fn prop_reserves_track_balances(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        ops in proptest::collection::vec((0u8..4, 1u128..=5_000u128), 1..12),
    ) {
        let h = seeded(r0, r1);
        for (op, size) in ops {
            let (c0, c1) = h.reserves();
            let outcome = match op {
                0 => {
                    let amount_in = (c0 * size / 10_000).max(1);
                    let Ok(out) = get_amount_out(
                        Amount::new(amount_in),
                        Amount::new(c0),
                        Amount::new(c1),
                        FeeTier::default(),
                    ) else {
                        continue;
                    };
                    h.send(TOKEN0, amount_in);
                    h.pair.swap(&ALICE, Amount::ZERO, out, &BOB, None)
                }
                1 => {
                    h.send(TOKEN0, (c0 * size / 10_000).max(1));
                    h.send(TOKEN1, (c1 * size / 10_000).max(1));
                    h.pair.mint(&BOB, &BOB).map(|_| ())
                }
                2 => {
                    let held = h.shares.balance_of(&ALICE).get();
                    h.return_shares(ALICE, (held * size / 10_000).max(1).min(held));
                    h.pair.burn(&ALICE, &ALICE).map(|_| ())
                }
                _ => {
                    h.send(TOKEN1, size);
                    h.pair.skim(&BOB)
                }
            };
            if outcome.is_ok() {
                assert_reserves_match_balances(&h)?;
            }
            prop_assert!(!h.pair.is_locked());
        }
    }
}
