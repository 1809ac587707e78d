//! Reserve snapshot returned by `get_reserves`.

use super::{BlockTimestamp, Reserve};

/// The pair's cached reserves and the time they were last written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    /// Cached balance of asset0.
    pub reserve0: Reserve,
    /// Cached balance of asset1.
    pub reserve1: Reserve,
    /// Truncated timestamp of the last reserve update.
    pub block_timestamp_last: BlockTimestamp,
}
