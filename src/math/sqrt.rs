//! Integer square roots.

use alloy_primitives::U256;

/// Floor square root of a 256-bit value (Babylonian method).
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use pair_amm::math::isqrt_u256;
///
/// assert_eq!(isqrt_u256(U256::from(1_000_000u64)), U256::from(1_000u64));
/// assert_eq!(isqrt_u256(U256::from(15u64)), U256::from(3u64));
/// ```
#[must_use]
pub fn isqrt_u256(y: U256) -> U256 {
    let three = U256::from(3u8);
    if y > three {
        let mut z = y;
        let mut x = (y >> 1usize) + U256::from(1u8);
        while x < z {
            z = x;
            x = (y / x + x) >> 1usize;
        }
        z
    } else if y.is_zero() {
        U256::ZERO
    } else {
        U256::from(1u8)
    }
}
