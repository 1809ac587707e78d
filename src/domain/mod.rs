//! Fundamental domain value types used throughout the pair engine.
//!
//! Identities, amounts, shares, bounded reserves, timestamps, fee tiers,
//! and the events a pair records.  All types are newtypes with validated
//! constructors where an invariant exists.

mod address;
mod amount;
mod asset_pair;
mod basis_points;
mod event;
mod fee_tier;
mod liquidity;
mod reserve;
mod reserves;
mod timestamp;

pub use address::Address;
pub use amount::Amount;
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use event::PairEvent;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use reserve::Reserve;
pub use reserves::Reserves;
pub use timestamp::BlockTimestamp;
