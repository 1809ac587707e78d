//! Single-hop quoting against a pair's reserves.
//!
//! These helpers compute the amounts that exactly satisfy the pair's
//! fee-adjusted constant-product check, so a caller can size a trade
//! before transferring funds.
//!
//! # Exact-in (Asset In → Asset Out)
//!
//! ```text
//! in_with_fee = amount_in × (10 000 − fee_bps)
//! amount_out  = in_with_fee × reserve_out / (reserve_in × 10 000 + in_with_fee)
//! ```
//!
//! # Exact-out
//!
//! ```text
//! amount_in = reserve_in × amount_out × 10 000
//!             / ((reserve_out − amount_out) × (10 000 − fee_bps)) + 1
//! ```

use alloy_primitives::U256;

use super::checked::{narrow, wide};
use crate::domain::{Amount, FeeTier};
use crate::error::PairError;

fn fee_complement(fee: FeeTier) -> Result<U256, PairError> {
    match fee.basis_points().complement() {
        Some(c) if c.get() > 0 => Ok(U256::from(c.get())),
        _ => Err(PairError::InvalidConfiguration("fee must be below 100%")),
    }
}

/// Amount of asset B worth `amount_a` of asset A at the current reserve
/// ratio, ignoring fees.
///
/// # Errors
///
/// - [`PairError::InsufficientInputAmount`] if `amount_a` is zero.
/// - [`PairError::InsufficientLiquidity`] if either reserve is zero.
/// - [`PairError::Overflow`] if the result exceeds 128 bits.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount, PairError> {
    if amount_a.is_zero() {
        return Err(PairError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(PairError::InsufficientLiquidity);
    }
    let out = wide(amount_a.get()) * wide(reserve_b.get()) / wide(reserve_a.get());
    narrow(out, "quote result").map(Amount::new)
}

/// Largest output the pair will release for `amount_in`.
///
/// # Errors
///
/// - [`PairError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`PairError::InsufficientLiquidity`] if either reserve is zero.
/// - [`PairError::InvalidConfiguration`] if the fee is 100% or more.
/// - [`PairError::Overflow`] if the intermediate product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeTier};
/// use pair_amm::math::get_amount_out;
///
/// let e18 = 1_000_000_000_000_000_000u128;
/// let out = get_amount_out(
///     Amount::new(e18),
///     Amount::new(5 * e18),
///     Amount::new(10 * e18),
///     FeeTier::TIER_0_30_PERCENT,
/// )
/// .expect("quotable");
/// assert_eq!(out, Amount::new(1_662_497_915_624_478_906));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, PairError> {
    if amount_in.is_zero() {
        return Err(PairError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PairError::InsufficientLiquidity);
    }
    let scale = U256::from(FeeTier::SCALE);
    let in_with_fee = wide(amount_in.get()) * fee_complement(fee)?;
    let numerator = in_with_fee
        .checked_mul(wide(reserve_out.get()))
        .ok_or(PairError::Overflow("amount out numerator"))?;
    let denominator = wide(reserve_in.get()) * scale + in_with_fee;
    narrow(numerator / denominator, "amount out").map(Amount::new)
}

/// Smallest input that pays for `amount_out`.
///
/// # Errors
///
/// - [`PairError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`PairError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` is not below `reserve_out`.
/// - [`PairError::InvalidConfiguration`] if the fee is 100% or more.
/// - [`PairError::Overflow`] if the required input exceeds 128 bits.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, PairError> {
    if amount_out.is_zero() {
        return Err(PairError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(PairError::InsufficientLiquidity);
    }
    let scale = U256::from(FeeTier::SCALE);
    let numerator = (wide(reserve_in.get()) * wide(amount_out.get()))
        .checked_mul(scale)
        .ok_or(PairError::Overflow("amount in numerator"))?;
    let denominator = wide(reserve_out.get() - amount_out.get()) * fee_complement(fee)?;
    let amount_in = numerator / denominator + U256::from(1u8);
    narrow(amount_in, "amount in").map(Amount::new)
}
