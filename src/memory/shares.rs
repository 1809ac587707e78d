//! In-memory liquidity share ledger.

use std::cell::RefCell;
use std::collections::HashMap;

use super::Checkpoint;
use crate::domain::{Address, Liquidity};
use crate::error::PairError;
use crate::math::CheckedArithmetic;
use crate::traits::ShareLedger;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Book {
    total_supply: Liquidity,
    balances: HashMap<Address, Liquidity>,
}

impl Book {
    fn balance(&self, owner: &Address) -> Liquidity {
        self.balances.get(owner).copied().unwrap_or(Liquidity::ZERO)
    }
}

/// Share ledger for a single pair.
///
/// Keeps `sum(balances) == total_supply` at all times: every mutation
/// computes both sides first and writes only if both succeed.
#[derive(Debug, Default)]
pub struct ShareBook {
    book: RefCell<Book>,
    saved: RefCell<Vec<Book>>,
}

impl ShareBook {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves shares between holders.  Liquidity providers use this to
    /// hand shares to the pair before calling `burn`.
    ///
    /// # Errors
    ///
    /// - [`PairError::InsufficientBalance`] if `from` holds fewer than
    ///   `amount` shares.
    /// - [`PairError::Overflow`] if the recipient balance would overflow.
    pub fn transfer(&self, from: &Address, to: &Address, amount: Liquidity) -> Result<(), PairError> {
        let mut book = self.book.borrow_mut();
        let debited = book
            .balance(from)
            .checked_sub(&amount)
            .ok_or(PairError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let credited = book.balance(to).safe_add(&amount)?;
        book.balances.insert(*from, debited);
        book.balances.insert(*to, credited);
        Ok(())
    }

    /// Number of distinct holders with a non-zero balance.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.book
            .borrow()
            .balances
            .values()
            .filter(|b| !b.is_zero())
            .count()
    }
}

impl ShareLedger for ShareBook {
    fn total_supply(&self) -> Liquidity {
        self.book.borrow().total_supply
    }

    fn balance_of(&self, owner: &Address) -> Liquidity {
        self.book.borrow().balance(owner)
    }

    fn mint(&self, to: &Address, amount: Liquidity) -> Result<(), PairError> {
        let mut book = self.book.borrow_mut();
        let supply = book.total_supply.safe_add(&amount)?;
        let balance = book.balance(to).safe_add(&amount)?;
        book.total_supply = supply;
        book.balances.insert(*to, balance);
        Ok(())
    }

    fn burn(&self, from: &Address, amount: Liquidity) -> Result<(), PairError> {
        let mut book = self.book.borrow_mut();
        let balance = book
            .balance(from)
            .checked_sub(&amount)
            .ok_or(PairError::InsufficientBalance)?;
        let supply = book.total_supply.safe_sub(&amount)?;
        book.total_supply = supply;
        book.balances.insert(*from, balance);
        Ok(())
    }
}

impl Checkpoint for ShareBook {
    fn begin(&self) {
        let snapshot = self.book.borrow().clone();
        self.saved.borrow_mut().push(snapshot);
    }

    fn commit(&self) {
        self.saved.borrow_mut().pop();
    }

    fn rollback(&self) {
        if let Some(snapshot) = self.saved.borrow_mut().pop() {
            *self.book.borrow_mut() = snapshot;
        }
    }
}
