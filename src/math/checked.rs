//! Checked arithmetic for domain wrapper types and 256-bit intermediates.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, PairError>`](crate::error::PairError) instead
//! of panicking on overflow or underflow.
//!
//! Products that can exceed 128 bits (reserve products, share pro-rating,
//! the fee-adjusted K check) are widened to [`U256`] with [`wide`] and
//! brought back with [`narrow`].
//!
//! # Examples
//!
//! ```
//! use pair_amm::domain::Amount;
//! use pair_amm::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert_eq!(a.safe_add(&b), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use alloy_primitives::U256;

use crate::domain::{Amount, Liquidity};
use crate::error::PairError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every failure maps to a [`PairError`] naming the operation, so share and
/// balance arithmetic composes with `?`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, PairError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, PairError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_add(other)
            .ok_or(PairError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_sub(other)
            .ok_or(PairError::Underflow("amount subtraction underflow"))
    }
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_add(other)
            .ok_or(PairError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PairError> {
        self.checked_sub(other)
            .ok_or(PairError::Underflow("liquidity subtraction underflow"))
    }
}

// ---------------------------------------------------------------------------
// 256-bit helpers
// ---------------------------------------------------------------------------

/// Widens a 128-bit value.
#[inline]
#[must_use]
pub fn wide(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows a 256-bit value back to 128 bits.
///
/// # Errors
///
/// Returns [`PairError::Overflow`] with `context` if `value` does not fit.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128, PairError> {
    u128::try_from(value).map_err(|_| PairError::Overflow(context))
}

/// Computes `a × b / denominator` in 256 bits, rounding down.
///
/// # Errors
///
/// - [`PairError::Overflow`] if `a × b` exceeds 256 bits.
/// - [`PairError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div(a: U256, b: U256, denominator: U256, context: &'static str) -> Result<U256, PairError> {
    let product = a.checked_mul(b).ok_or(PairError::Overflow(context))?;
    product
        .checked_div(denominator)
        .ok_or(PairError::DivisionByZero)
}
