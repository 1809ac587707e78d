//! Liquidity-provider share ledger capability.
//!
//! The pair is the only party that mints or burns against its own share
//! ledger.  Anyone may read balances and the total supply.

use std::rc::Rc;
use std::sync::Arc;

use crate::domain::{Address, Liquidity};
use crate::error::PairError;

/// Fungible share bookkeeping for one pair.
pub trait ShareLedger {
    /// Outstanding shares, including the permanently locked minimum.
    fn total_supply(&self) -> Liquidity;

    /// Shares held by `owner`.
    fn balance_of(&self, owner: &Address) -> Liquidity;

    /// Creates `amount` shares owned by `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Overflow`] if the supply would overflow.
    fn mint(&self, to: &Address, amount: Liquidity) -> Result<(), PairError>;

    /// Destroys `amount` shares owned by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::InsufficientBalance`] if `from` holds fewer
    /// than `amount` shares.
    fn burn(&self, from: &Address, amount: Liquidity) -> Result<(), PairError>;
}

impl<T: ShareLedger + ?Sized> ShareLedger for Rc<T> {
    fn total_supply(&self) -> Liquidity {
        (**self).total_supply()
    }

    fn balance_of(&self, owner: &Address) -> Liquidity {
        (**self).balance_of(owner)
    }

    fn mint(&self, to: &Address, amount: Liquidity) -> Result<(), PairError> {
        (**self).mint(to, amount)
    }

    fn burn(&self, from: &Address, amount: Liquidity) -> Result<(), PairError> {
        (**self).burn(from, amount)
    }
}

impl<T: ShareLedger + ?Sized> ShareLedger for Arc<T> {
    fn total_supply(&self) -> Liquidity {
        (**self).total_supply()
    }

    fn balance_of(&self, owner: &Address) -> Liquidity {
        (**self).balance_of(owner)
    }

    fn mint(&self, to: &Address, amount: Liquidity) -> Result<(), PairError> {
        (**self).mint(to, amount)
    }

    fn burn(&self, from: &Address, amount: Liquidity) -> Result<(), PairError> {
        (**self).burn(from, amount)
    }
}
