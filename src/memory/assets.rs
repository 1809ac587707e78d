//! In-memory multi-asset balance book.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use super::Checkpoint;
use crate::domain::{Address, Amount};
use crate::error::PairError;
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

type Balances = HashMap<(Address, Address), Amount>;

/// Balances of any number of assets, keyed by `(asset, owner)`.
///
/// Implements [`AssetLedger`] so one book can back every pair of a
/// registry.  Transfers validate before they mutate, so a failed transfer
/// never leaves a partial debit behind.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    balances: RefCell<Balances>,
    saved: RefCell<Vec<Balances>>,
}

impl MemoryAssets {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `owner` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the balance would overflow.
    pub fn deposit(&self, asset: &Address, owner: &Address, amount: Amount) -> Result<(), PairError> {
        let mut balances = self.balances.borrow_mut();
        let entry = balances.entry((*asset, *owner)).or_insert(Amount::ZERO);
        *entry = entry.safe_add(&amount)?;
        Ok(())
    }

    /// Returns `owner`'s balance of `asset`, zero if never credited.
    #[must_use]
    pub fn balance(&self, asset: &Address, owner: &Address) -> Amount {
        self.balances
            .borrow()
            .get(&(*asset, *owner))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Sum of all balances of `asset`.
    #[must_use]
    pub fn supply(&self, asset: &Address) -> u128 {
        self.balances
            .borrow()
            .iter()
            .filter(|((a, _), _)| a == asset)
            .map(|(_, amount)| amount.get())
            .fold(0u128, u128::saturating_add)
    }

    /// Moves `amount` of `asset` between two holders.
    ///
    /// # Errors
    ///
    /// - [`PairError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`PairError::Overflow`] if the recipient balance would overflow.
    pub fn transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError> {
        if amount.is_zero() || from == to {
            return self.require(asset, from, amount);
        }
        let mut balances = self.balances.borrow_mut();
        let from_balance = balances
            .get(&(*asset, *from))
            .copied()
            .unwrap_or(Amount::ZERO);
        let to_balance = balances.get(&(*asset, *to)).copied().unwrap_or(Amount::ZERO);

        let debited = from_balance
            .checked_sub(&amount)
            .ok_or(PairError::InsufficientBalance)?;
        let credited = to_balance.safe_add(&amount)?;

        balances.insert((*asset, *from), debited);
        balances.insert((*asset, *to), credited);
        trace!(%asset, %from, %to, %amount, "asset transfer");
        Ok(())
    }

    fn require(&self, asset: &Address, owner: &Address, amount: Amount) -> Result<(), PairError> {
        if self.balance(asset, owner) < amount {
            return Err(PairError::InsufficientBalance);
        }
        Ok(())
    }
}

impl AssetLedger for MemoryAssets {
    fn balance_of(&self, asset: &Address, owner: &Address) -> Result<Amount, PairError> {
        Ok(self.balance(asset, owner))
    }

    fn safe_transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PairError> {
        self.transfer(asset, from, to, amount)
    }
}

impl Checkpoint for MemoryAssets {
    fn begin(&self) {
        let snapshot = self.balances.borrow().clone();
        self.saved.borrow_mut().push(snapshot);
    }

    fn commit(&self) {
        self.saved.borrow_mut().pop();
    }

    fn rollback(&self) {
        if let Some(snapshot) = self.saved.borrow_mut().pop() {
            *self.balances.borrow_mut() = snapshot;
        }
    }
}
