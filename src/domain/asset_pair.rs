//! Pair of distinct asset identities held by one pool.

use super::Address;
use crate::error::PairError;

/// The two assets a pair trades, as `(asset0, asset1)`.
///
/// Both identities are non-null and distinct.  [`AssetPair::new`] sorts
/// them so that `asset0 < asset1`, which is how the registry keys one pair
/// per unordered set of assets.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Address, AssetPair};
///
/// let usdc = Address::from_bytes([1u8; 32]);
/// let weth = Address::from_bytes([2u8; 32]);
///
/// // Order is enforced automatically:
/// let pair = AssetPair::new(weth, usdc).expect("distinct assets");
/// assert_eq!(pair.asset0(), usdc);
/// assert_eq!(pair.asset1(), weth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    asset0: Address,
    asset1: Address,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// - [`PairError::IdenticalAssets`] if both identities are equal.
    /// - [`PairError::NullAsset`] if either identity is [`Address::ZERO`].
    pub fn new(a: Address, b: Address) -> Result<Self, PairError> {
        let (asset0, asset1) = if a < b { (a, b) } else { (b, a) };
        Self::from_parts(asset0, asset1)
    }

    /// Creates a pair that keeps the given order.
    ///
    /// # Errors
    ///
    /// Same as [`AssetPair::new`].
    pub fn from_parts(asset0: Address, asset1: Address) -> Result<Self, PairError> {
        if asset0 == asset1 {
            return Err(PairError::IdenticalAssets);
        }
        if asset0.is_zero() || asset1.is_zero() {
            return Err(PairError::NullAsset);
        }
        Ok(Self { asset0, asset1 })
    }

    /// Returns the first asset.
    #[must_use]
    pub const fn asset0(&self) -> Address {
        self.asset0
    }

    /// Returns the second asset.
    #[must_use]
    pub const fn asset1(&self) -> Address {
        self.asset1
    }

    /// Returns `true` if `address` is one of the two assets.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.asset0 == *address || self.asset1 == *address
    }
}
