//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::BasisPoints;

/// A swap fee tier wrapping [`BasisPoints`] with common presets.
///
/// The pair charges its fee implicitly: the constant-product check is
/// evaluated on balances scaled by [`FeeTier::SCALE`] with
/// `amount_in × bps` subtracted, so the fee stays in the reserves.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.scaled(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// Scale on which the fee-adjusted balances are expressed (100%).
    pub const SCALE: u128 = 10_000;

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), the classic constant-product fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns the fee as a raw multiplier on the [`FeeTier::SCALE`] scale.
    #[must_use]
    pub const fn scaled(&self) -> u128 {
        self.0.get() as u128
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
