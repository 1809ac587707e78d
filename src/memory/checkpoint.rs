//! All-or-nothing execution over in-memory collaborators.

use crate::error::PairError;

/// A collaborator whose state can be saved and rolled back.
///
/// Checkpoints nest: every [`begin`](Checkpoint::begin) is matched by
/// exactly one [`commit`](Checkpoint::commit) or
/// [`rollback`](Checkpoint::rollback).
pub trait Checkpoint {
    /// Saves the current state on top of the checkpoint stack.
    fn begin(&self);

    /// Drops the most recent saved state, keeping current state.
    fn commit(&self);

    /// Restores the most recent saved state.
    fn rollback(&self);
}

/// Runs `body` and rolls every participant back if it fails.
///
/// This plays the part of the transactional environment the pair engine
/// relies on: a failed call leaves balances and shares exactly as they
/// were, including any transfers made before the failure was detected.
///
/// # Errors
///
/// Returns whatever `body` returns.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Address, Amount};
/// use pair_amm::error::PairError;
/// use pair_amm::memory::{atomically, Checkpoint, MemoryAssets};
/// use pair_amm::traits::AssetLedger;
///
/// let book = MemoryAssets::new();
/// let asset = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([2u8; 32]);
/// let bob = Address::from_bytes([3u8; 32]);
/// book.deposit(&asset, &alice, Amount::new(10)).expect("deposit");
///
/// let participants: [&dyn Checkpoint; 1] = [&book];
/// let result: Result<(), PairError> = atomically(&participants, || {
///     book.safe_transfer(&asset, &alice, &bob, Amount::new(4))?;
///     Err(PairError::InvariantViolation)
/// });
/// assert!(result.is_err());
/// assert_eq!(book.balance(&asset, &alice), Amount::new(10));
/// ```
pub fn atomically<T>(
    participants: &[&dyn Checkpoint],
    body: impl FnOnce() -> Result<T, PairError>,
) -> Result<T, PairError> {
    for participant in participants {
        participant.begin();
    }
    let result = body();
    for participant in participants.iter().rev() {
        if result.is_ok() {
            participant.commit();
        } else {
            participant.rollback();
        }
    }
    result
}
