//! # Pair AMM
//!
//! Constant-product liquidity pairs (Uniswap V2 style): a self-contained
//! pool engine that holds custody of two assets, prices trades against the
//! fee-adjusted invariant `x · y ≥ k`, issues liquidity shares, and keeps
//! time-weighted price accumulators.
//!
//! The engine owns reserve accounting and nothing else.  Asset balances,
//! share bookkeeping, the protocol fee switch, flash-swap receivers, and
//! time are consumed through the capabilities in [`traits`]; [`memory`]
//! supplies in-process implementations of all of them.
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! pair-amm = "0.1"
//! ```
//!
//! ## Create a pair, add liquidity, and swap
//!
//! ```rust
//! use std::rc::Rc;
//! use pair_amm::prelude::*;
//!
//! let assets = Rc::new(MemoryAssets::new());
//! let mut factory: PairFactory<_, Rc<ShareBook>, _> = PairFactory::new(
//!     Address::from_bytes([0xFA; 32]),
//!     Address::from_bytes([0x5E; 32]),
//!     Rc::clone(&assets),
//!     Rc::new(ManualClock::new(1_700_000_000)),
//!     PairConfig::default(),
//! )
//! .expect("valid config");
//!
//! let usdc = Address::from_bytes([1; 32]);
//! let weth = Address::from_bytes([2; 32]);
//! let alice = Address::from_bytes([0xA1; 32]);
//! let pair = factory.create_pair(usdc, weth).expect("new pair");
//!
//! // 1. Deposit both assets into the pair, then mint shares.
//! assets.deposit(&usdc, &pair.address(), Amount::new(5_000_000)).expect("faucet");
//! assets.deposit(&weth, &pair.address(), Amount::new(10_000_000)).expect("faucet");
//! let shares = pair.mint(&alice, &alice).expect("minted");
//! assert!(shares.get() > 0);
//!
//! // 2. Pay 10 000 USDC in, take the quoted WETH out.
//! let reserves = pair.get_reserves();
//! let out = get_amount_out(
//!     Amount::new(10_000),
//!     reserves.reserve0.as_amount(),
//!     reserves.reserve1.as_amount(),
//!     pair.config().swap_fee(),
//! )
//! .expect("quotable");
//! assets.deposit(&usdc, &pair.address(), Amount::new(10_000)).expect("faucet");
//! pair.swap(&alice, Amount::ZERO, out, &alice, None).expect("swap settles");
//!
//! assert_eq!(assets.balance(&weth, &alice), out);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Registry    │  PairFactory: create_pair, get_pair, FeeSwitch
//! └──────┬──────┘
//!        │ new + bind
//!        ▼
//! ┌─────────────┐
//! │    Pair      │  mint, burn, swap, skim, sync behind a ReentrancyGate
//! └──────┬──────┘
//!        │ AssetLedger, ShareLedger, FeeRecipientSource, SwapCallee, Clock
//!        ▼
//! ┌─────────────┐
//! │ Collaborators│  MemoryAssets, ShareBook, ManualClock, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Reserve`](domain::Reserve), [`PairEvent`](domain::PairEvent), etc. |
//! | [`math`] | Checked and 256-bit arithmetic, square roots, UQ112.112, quoting |
//! | [`traits`] | Capabilities a pair consumes |
//! | [`config`] | [`PairConfig`](config::PairConfig) |
//! | [`pair`] | The [`Pair`](pair::Pair) engine and its [`ReentrancyGate`](pair::ReentrancyGate) |
//! | [`factory`] | [`PairFactory`](factory::PairFactory) registry and [`FeeSwitch`](factory::FeeSwitch) |
//! | [`memory`] | In-memory collaborators and [`atomically`](memory::atomically) |
//! | [`error`] | [`PairError`](error::PairError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod memory;
pub mod pair;
pub mod prelude;
pub mod traits;
