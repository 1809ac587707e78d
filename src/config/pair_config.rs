//! Configuration for constant-product pairs.

use crate::domain::{BasisPoints, FeeTier, Liquidity};
use crate::error::PairError;

/// Parameters shared by every pair a registry creates.
///
/// # Fields
///
/// - `swap_fee` — charged on swap inputs and left in the pool.  The
///   constant-product check runs on a 10 000 scale:
///   `adjusted = balance × 10 000 − amount_in × fee_bps`.
/// - `protocol_fee_share` — when the protocol fee is on, the recipient
///   receives `1 / protocol_fee_share` of the growth in `√k`.
/// - `minimum_liquidity` — shares locked forever on the first deposit.
///
/// # Validation
///
/// - `swap_fee` strictly below 100%.
/// - `protocol_fee_share` within `2..=100`.
/// - `minimum_liquidity` non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairConfig {
    swap_fee: FeeTier,
    protocol_fee_share: u8,
    minimum_liquidity: Liquidity,
}

impl PairConfig {
    /// Default protocol share: one sixth of fee growth.
    pub const DEFAULT_PROTOCOL_FEE_SHARE: u8 = 6;

    /// Default number of permanently locked shares.
    pub const DEFAULT_MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`] if any field is out of
    /// range.
    pub fn new(
        swap_fee: FeeTier,
        protocol_fee_share: u8,
        minimum_liquidity: Liquidity,
    ) -> Result<Self, PairError> {
        let config = Self {
            swap_fee,
            protocol_fee_share,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InvalidConfiguration`] naming the first field
    /// that is out of range.
    pub fn validate(&self) -> Result<(), PairError> {
        let fee = self.swap_fee.basis_points();
        if !fee.is_valid_percent() || fee == BasisPoints::MAX_PERCENT {
            return Err(PairError::InvalidConfiguration(
                "swap fee must be below 100%",
            ));
        }
        if !(2..=100).contains(&self.protocol_fee_share) {
            return Err(PairError::InvalidConfiguration(
                "protocol fee share must be within 2..=100",
            ));
        }
        if self.minimum_liquidity.is_zero() {
            return Err(PairError::InvalidConfiguration(
                "minimum liquidity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> FeeTier {
        self.swap_fee
    }

    /// Returns the protocol fee denominator `n` (recipient gets `1/n`).
    #[must_use]
    pub const fn protocol_fee_share(&self) -> u8 {
        self.protocol_fee_share
    }

    /// Returns the number of shares locked on the first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Liquidity {
        self.minimum_liquidity
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            swap_fee: FeeTier::TIER_0_30_PERCENT,
            protocol_fee_share: Self::DEFAULT_PROTOCOL_FEE_SHARE,
            minimum_liquidity: Self::DEFAULT_MINIMUM_LIQUIDITY,
        }
    }
}
