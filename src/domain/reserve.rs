//! Bounded 112-bit reserve values.

use core::fmt;

use super::Amount;
use crate::error::PairError;

/// A cached pair reserve, bounded to `0..=2^112 - 1`.
///
/// Reserves are narrower than the balances they mirror so that the
/// product of two reserves and the 112.112 fixed-point price both fit in
/// 256 bits.  Narrowing an [`Amount`] is explicit and fails with
/// [`PairError::ReserveOverflow`] instead of truncating.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, Reserve};
/// use pair_amm::error::PairError;
///
/// let r = Reserve::try_from_amount(Amount::new(1_000)).expect("fits");
/// assert_eq!(r.get(), 1_000);
///
/// let too_big = Amount::new(Reserve::MAX.get() + 1);
/// assert_eq!(Reserve::try_from_amount(too_big), Err(PairError::ReserveOverflow));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Reserve(u128);

impl Reserve {
    /// Width of a reserve in bits.
    pub const BITS: u32 = 112;

    /// Empty reserve.
    pub const ZERO: Self = Self(0);

    /// Largest representable reserve, `2^112 - 1`.
    pub const MAX: Self = Self((1u128 << Self::BITS) - 1);

    /// Narrows a balance into a reserve.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::ReserveOverflow`] if `amount` exceeds
    /// [`Reserve::MAX`].
    pub const fn try_from_amount(amount: Amount) -> Result<Self, PairError> {
        if amount.get() > Self::MAX.0 {
            return Err(PairError::ReserveOverflow);
        }
        Ok(Self(amount.get()))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the reserve is empty.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Widens the reserve back into an [`Amount`].
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl TryFrom<Amount> for Reserve {
    type Error = PairError;

    fn try_from(amount: Amount) -> Result<Self, Self::Error> {
        Self::try_from_amount(amount)
    }
}

impl From<Reserve> for Amount {
    fn from(reserve: Reserve) -> Self {
        reserve.as_amount()
    }
}

impl fmt::Display for Reserve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
