//! Protocol fee switch shared by every pair of a registry.

use std::cell::Cell;

use tracing::info;

use crate::domain::Address;
use crate::error::PairError;
use crate::traits::FeeRecipientSource;

/// Registry-wide protocol fee settings.
///
/// `fee_to` receives protocol fee shares when set; `fee_to_setter` is the
/// only identity allowed to change either field.
#[derive(Debug)]
pub struct FeeSwitch {
    fee_to: Cell<Option<Address>>,
    fee_to_setter: Cell<Address>,
}

impl FeeSwitch {
    /// Creates a switch with the protocol fee off.
    #[must_use]
    pub const fn new(fee_to_setter: Address) -> Self {
        Self {
            fee_to: Cell::new(None),
            fee_to_setter: Cell::new(fee_to_setter),
        }
    }

    /// Current fee recipient.
    #[must_use]
    pub fn fee_to(&self) -> Option<Address> {
        self.fee_to.get()
    }

    /// Identity allowed to change the settings.
    #[must_use]
    pub fn fee_to_setter(&self) -> Address {
        self.fee_to_setter.get()
    }

    /// Sets or clears the fee recipient.  [`Address::ZERO`] clears it.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Unauthorized`] unless `caller` is the setter.
    pub fn set_fee_to(&self, caller: &Address, fee_to: Option<Address>) -> Result<(), PairError> {
        self.authorize(caller)?;
        let fee_to = fee_to.filter(|addr| !addr.is_zero());
        self.fee_to.set(fee_to);
        match fee_to {
            Some(addr) => info!(fee_to = %addr, "protocol fee on"),
            None => info!("protocol fee off"),
        }
        Ok(())
    }

    /// Hands the setter role to `setter`.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Unauthorized`] unless `caller` is the setter.
    pub fn set_fee_to_setter(&self, caller: &Address, setter: Address) -> Result<(), PairError> {
        self.authorize(caller)?;
        self.fee_to_setter.set(setter);
        info!(%setter, "fee setter changed");
        Ok(())
    }

    fn authorize(&self, caller: &Address) -> Result<(), PairError> {
        if *caller != self.fee_to_setter.get() {
            return Err(PairError::Unauthorized);
        }
        Ok(())
    }
}

impl FeeRecipientSource for FeeSwitch {
    fn protocol_fee_recipient(&self) -> Option<Address> {
        self.fee_to.get()
    }
}
