//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, AssetPair, BasisPoints, BlockTimestamp, FeeTier, Liquidity, PairEvent,
    Reserve, Reserves,
};

pub use crate::traits::{AssetLedger, Clock, FeeRecipientSource, ShareLedger, SwapCallee};

pub use crate::math::{get_amount_in, get_amount_out, quote, CheckedArithmetic};

pub use crate::config::PairConfig;

pub use crate::error::{PairError, Result};

pub use crate::factory::{FeeSwitch, PairFactory};

pub use crate::pair::{FlashSwap, Pair};

pub use crate::memory::{atomically, Checkpoint, ManualClock, MemoryAssets, ShareBook, SystemClock};
