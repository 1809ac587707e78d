//! Pair configuration.
//!
//! [`PairConfig`] holds the parameters a registry hands to every pair it
//! creates: the swap fee, the protocol's share of fee growth, and the
//! amount of liquidity locked on the first deposit.

mod pair_config;

pub use pair_config::PairConfig;
