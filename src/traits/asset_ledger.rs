//! Balance and transfer capability for the traded assets.
//!
//! A pair never tracks asset balances itself.  It reads authoritative
//! balances through [`AssetLedger::balance_of`] and moves its own custody
//! with [`AssetLedger::safe_transfer`].  One ledger handle serves every
//! asset; each call names the asset it addresses.

use std::rc::Rc;
use std::sync::Arc;

use crate::domain::{Address, Amount};
use crate::error::PairError;

/// Access to the balances of fungible assets, keyed by asset identity.
///
/// # Contract
///
/// - `safe_transfer` either moves exactly `amount` or returns `Err`; it
///   never reports success for a partial or skipped transfer.
/// - Transfers of a zero amount succeed without effect.
/// - Fee-on-transfer and rebasing assets are not supported: the pair
///   infers deposits from balance deltas and assumes a transfer of `x`
///   changes the recipient's balance by exactly `x`.
pub trait AssetLedger {
    /// Returns `owner`'s balance of `asset`.
    ///
    /// # Errors
    ///
    /// Implementations may fail if the asset is unknown to them.
    fn balance_of(&self, asset: &Address, owner: &Address) -> Result<Amount, PairError>;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`PairError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`PairError::Overflow`] if the recipient balance would overflow.
    fn safe_transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError>;
}

impl<T: AssetLedger + ?Sized> AssetLedger for &T {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Result<Amount, PairError> {
        (**self).balance_of(asset, owner)
    }

    fn safe_transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError> {
        (**self).safe_transfer(asset, from, to, amount)
    }
}

impl<T: AssetLedger + ?Sized> AssetLedger for Rc<T> {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Result<Amount, PairError> {
        (**self).balance_of(asset, owner)
    }

    fn safe_transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError> {
        (**self).safe_transfer(asset, from, to, amount)
    }
}

impl<T: AssetLedger + ?Sized> AssetLedger for Arc<T> {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Result<Amount, PairError> {
        (**self).balance_of(asset, owner)
    }

    fn safe_transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError> {
        (**self).safe_transfer(asset, from, to, amount)
    }
}
