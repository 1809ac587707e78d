//! The pair engine.
//!
//! [`Pair`] is a self-contained constant-product market over two assets.
//! Its mutating entry points (`bind`, `mint`, `burn`, `swap`, `skim`,
//! `sync`) all run behind a [`ReentrancyGate`] and end by writing the
//! reserves they observed.

mod engine;
mod gate;
mod state;

#[cfg(test)]
pub(crate) mod harness;
#[cfg(test)]
mod proptest_properties;

pub use engine::{FlashSwap, Pair};
pub use gate::{GateGuard, LockState, ReentrancyGate};
pub use state::PairState;
