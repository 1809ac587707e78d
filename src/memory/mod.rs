//! In-memory collaborators.
//!
//! Everything a pair consumes through [`crate::traits`] has a plain
//! in-memory implementation here, so a registry, its pairs, and their
//! users can run end to end inside one process:
//!
//! - [`MemoryAssets`] — balances of every asset, keyed by `(asset, owner)`
//! - [`ShareBook`] — one pair's liquidity shares
//! - [`ManualClock`] / [`SystemClock`] — time
//! - [`atomically`] — rolls [`Checkpoint`] participants back when a call
//!   fails

mod assets;
mod checkpoint;
mod clock;
mod shares;

pub use assets::MemoryAssets;
pub use checkpoint::{atomically, Checkpoint};
pub use clock::{ManualClock, SystemClock};
pub use shares::ShareBook;
