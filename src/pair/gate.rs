//! Scoped reentrancy lock.

use std::cell::Cell;

use crate::error::PairError;

/// Lock state of a [`ReentrancyGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// No mutating operation is in progress.
    #[default]
    Unlocked,
    /// A mutating operation is in progress.
    Locked,
}

/// Mutual exclusion for one pair's mutating entry points.
///
/// [`enter`](Self::enter) either fails with [`PairError::Reentrant`] or
/// returns a [`GateGuard`]; the gate unlocks when the guard drops, on every
/// exit path including `?` and unwinding.
///
/// # Example
///
/// ```
/// use pair_amm::error::PairError;
/// use pair_amm::pair::ReentrancyGate;
///
/// let gate = ReentrancyGate::new();
/// {
///     let _guard = gate.enter().expect("unlocked");
///     assert_eq!(gate.enter().err(), Some(PairError::Reentrant));
/// }
/// assert!(gate.enter().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ReentrancyGate {
    state: Cell<LockState>,
}

impl ReentrancyGate {
    /// Creates an unlocked gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Cell::new(LockState::Unlocked),
        }
    }

    /// Returns the current lock state.
    #[must_use]
    pub fn state(&self) -> LockState {
        self.state.get()
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.get() == LockState::Locked
    }

    /// Locks the gate.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::Reentrant`] if the gate is already locked.
    pub fn enter(&self) -> Result<GateGuard<'_>, PairError> {
        if self.is_locked() {
            return Err(PairError::Reentrant);
        }
        self.state.set(LockState::Locked);
        Ok(GateGuard { gate: self })
    }
}

/// Proof that a [`ReentrancyGate`] is held.  Unlocks on drop.
#[derive(Debug)]
#[must_use = "the gate unlocks as soon as the guard is dropped"]
pub struct GateGuard<'a> {
    gate: &'a ReentrancyGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.state.set(LockState::Unlocked);
    }
}
