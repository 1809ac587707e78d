//! Truncated 32-bit block timestamps.

use core::fmt;

/// A wall-clock timestamp in seconds, truncated modulo `2^32`.
///
/// Only differences between timestamps are meaningful; they are computed
/// with wrapping arithmetic so the counter may roll over.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::BlockTimestamp;
///
/// let before = BlockTimestamp::from_secs(u64::from(u32::MAX));
/// let after = BlockTimestamp::from_secs(u64::from(u32::MAX) + 10);
/// assert_eq!(after.elapsed_since(before), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockTimestamp(u32);

impl BlockTimestamp {
    /// The zero timestamp every pair starts with.
    pub const ZERO: Self = Self(0);

    /// Truncates a seconds value into a 32-bit timestamp.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_secs(secs: u64) -> Self {
        Self((secs % (1u64 << 32)) as u32)
    }

    /// Returns the raw 32-bit value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Seconds elapsed since `earlier`, tolerant of one rollover.
    #[must_use]
    pub const fn elapsed_since(&self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl fmt::Display for BlockTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
