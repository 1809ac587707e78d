//! Time source for the price accumulators.

use std::rc::Rc;
use std::sync::Arc;

/// Supplies the current time in whole seconds.
pub trait Clock {
    /// Seconds since an arbitrary, fixed epoch.
    fn now(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Rc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
