//! 112.112 binary fixed-point numbers for the price accumulators.

use alloy_primitives::U256;

use crate::domain::Reserve;
use crate::error::PairError;

/// An unsigned 112.112 fixed-point number stored in 224 bits.
///
/// Only used to integrate spot prices over time; never consulted by an
/// invariant check.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, Reserve};
/// use pair_amm::math::Uq112x112;
///
/// let two = Reserve::try_from_amount(Amount::new(2)).expect("fits");
/// let four = Reserve::try_from_amount(Amount::new(4)).expect("fits");
/// let half = Uq112x112::encode(two).div_reserve(four).expect("non-zero");
/// assert_eq!(half.raw(), Uq112x112::Q112 >> 1usize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    /// Fixed-point one, `2^112`.
    pub const Q112: U256 = U256::from_limbs([0, 1u64 << 48, 0, 0]);

    /// Encodes a reserve as a fixed-point value.
    #[must_use]
    pub fn encode(value: Reserve) -> Self {
        Self(U256::from(value.get()) << 112usize)
    }

    /// Divides by a reserve, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::DivisionByZero`] if `divisor` is zero.
    pub fn div_reserve(self, divisor: Reserve) -> Result<Self, PairError> {
        self.0
            .checked_div(U256::from(divisor.get()))
            .map(Self)
            .ok_or(PairError::DivisionByZero)
    }

    /// Returns the raw 224-bit representation.
    #[must_use]
    pub const fn raw(self) -> U256 {
        self.0
    }

    /// Price of `numerator` in units of `denominator`, times `elapsed`,
    /// ready to be added to a cumulative accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::DivisionByZero`] if `denominator` is zero.
    pub fn time_weighted(
        numerator: Reserve,
        denominator: Reserve,
        elapsed: u32,
    ) -> Result<U256, PairError> {
        let price = Self::encode(numerator).div_reserve(denominator)?;
        Ok(price.0.wrapping_mul(U256::from(elapsed)))
    }
}
