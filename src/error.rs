//! Unified error types for the pair engine.
//!
//! Every fallible operation in the crate returns [`PairError`].  Engine
//! failures are atomic from the caller's point of view: the reentrancy
//! gate is always released and no partial reserve update survives.

use thiserror::Error;

/// Errors produced by the pair engine, its registry, and the in-memory
/// collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PairError {
    /// A mutating entry point was invoked while the pair was locked.
    #[error("reentrant call rejected: pair is locked")]
    Reentrant,

    /// The caller is not allowed to perform the operation, or the pair
    /// is already bound.
    #[error("unauthorized")]
    Unauthorized,

    /// The pair has not been bound to its two assets yet.
    #[error("pair is not bound to an asset pair")]
    NotBound,

    /// A balance does not fit in the 112-bit reserve range.
    #[error("balance exceeds the 112-bit reserve range")]
    ReserveOverflow,

    /// A deposit was too small to mint any shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A redemption would pay out zero of either asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Both requested swap outputs are zero.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A requested output is not strictly below the matching reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The swap recipient is one of the pair's own assets.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// No input was observed for a swap.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The fee-adjusted constant-product check failed.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// Both asset identities are the same.
    #[error("identical asset identities")]
    IdenticalAssets,

    /// An asset identity is the null address.
    #[error("null asset identity")]
    NullAsset,

    /// The registry already holds a pair for these assets.
    #[error("pair already exists")]
    PairExists,

    /// A ledger debit exceeds the owner's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience alias used across the crate.
pub type Result<T, E = PairError> = core::result::Result<T, E>;
