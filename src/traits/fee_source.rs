//! Protocol fee recipient lookup.

use std::rc::Rc;
use std::sync::Arc;

use crate::domain::Address;

/// Resolves where protocol fees go.
///
/// The protocol fee is switched on exactly when a recipient is returned.
/// Pairs consult this on every mint and burn, never on swaps.
pub trait FeeRecipientSource {
    /// Current protocol fee recipient, or `None` when the fee is off.
    fn protocol_fee_recipient(&self) -> Option<Address>;
}

/// A fixed recipient (or none); handy for pairs built outside a registry.
impl FeeRecipientSource for Option<Address> {
    fn protocol_fee_recipient(&self) -> Option<Address> {
        self.filter(|addr| !addr.is_zero())
    }
}

impl<T: FeeRecipientSource + ?Sized> FeeRecipientSource for &T {
    fn protocol_fee_recipient(&self) -> Option<Address> {
        (**self).protocol_fee_recipient()
    }
}

impl<T: FeeRecipientSource + ?Sized> FeeRecipientSource for Rc<T> {
    fn protocol_fee_recipient(&self) -> Option<Address> {
        (**self).protocol_fee_recipient()
    }
}

impl<T: FeeRecipientSource + ?Sized> FeeRecipientSource for Arc<T> {
    fn protocol_fee_recipient(&self) -> Option<Address> {
        (**self).protocol_fee_recipient()
    }
}
