//! Flash-swap callback capability.

use crate::domain::{Address, Amount};
use crate::error::PairError;

/// Receiver of a flash-swap callback.
///
/// When a swap carries a non-empty payload, the pair transfers the
/// requested outputs first and then calls [`SwapCallee::on_swap`] on the
/// recipient.  The callee is expected to return the input (plus fee) to
/// the pair before it returns; the pair infers what was paid from its
/// balances afterwards.
///
/// `P` is the pair type, so the callee can call back into the pair.  Any
/// mutating call made on the same pair during the callback fails with
/// [`PairError::Reentrant`].
pub trait SwapCallee<P: ?Sized> {
    /// Called after the outputs have been transferred.
    ///
    /// # Errors
    ///
    /// Any error aborts the surrounding swap.
    fn on_swap(
        &self,
        pair: &P,
        initiator: &Address,
        amount0_out: Amount,
        amount1_out: Amount,
        data: &[u8],
    ) -> Result<(), PairError>;
}
