//! Mutable fields of a pair.

use alloy_primitives::U256;

use crate::domain::{AssetPair, BlockTimestamp, Reserve, Reserves};

/// Everything a pair mutates, in one `Copy` value.
///
/// Held in a `Cell` by [`Pair`](super::Pair) and replaced wholesale, so an
/// operation either writes a complete new state or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairState {
    /// Set once by `bind`.
    pub assets: Option<AssetPair>,
    /// Cached balance of asset0.
    pub reserve0: Reserve,
    /// Cached balance of asset1.
    pub reserve1: Reserve,
    /// Truncated time of the last reserve write.
    pub block_timestamp_last: BlockTimestamp,
    /// Σ (reserve1 / reserve0 as UQ112.112) × elapsed, wrapping.
    pub price0_cumulative_last: U256,
    /// Σ (reserve0 / reserve1 as UQ112.112) × elapsed, wrapping.
    pub price1_cumulative_last: U256,
    /// `reserve0 × reserve1` after the last liquidity event while the
    /// protocol fee was on; zero otherwise.
    pub k_last: U256,
}

impl PairState {
    /// Reserve snapshot view.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        Reserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            block_timestamp_last: self.block_timestamp_last,
        }
    }
}
