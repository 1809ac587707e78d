//! Pair registry.
//!
//! [`PairFactory`] creates one [`Pair`](crate::pair::Pair) per unordered
//! asset couple, binds it, and indexes it.  Its [`FeeSwitch`] is the
//! [`FeeRecipientSource`](crate::traits::FeeRecipientSource) every pair
//! consults for the protocol fee.
//!
//! # Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use pair_amm::config::PairConfig;
//! use pair_amm::domain::Address;
//! use pair_amm::factory::PairFactory;
//! use pair_amm::memory::{ManualClock, MemoryAssets, ShareBook};
//!
//! let setter = Address::from_bytes([0x5E; 32]);
//! let mut factory: PairFactory<_, Rc<ShareBook>, _> = PairFactory::new(
//!     Address::from_bytes([0xFA; 32]),
//!     setter,
//!     Rc::new(MemoryAssets::new()),
//!     Rc::new(ManualClock::new(0)),
//!     PairConfig::default(),
//! )
//! .expect("valid config");
//!
//! factory
//!     .fee_switch()
//!     .set_fee_to(&setter, Some(setter))
//!     .expect("setter may switch the fee on");
//! let pair = factory
//!     .create_pair(Address::from_bytes([1; 32]), Address::from_bytes([2; 32]))
//!     .expect("created");
//! assert_eq!(pair.get_reserves().reserve0.get(), 0);
//! ```

mod fee_switch;
mod registry;

pub use fee_switch::FeeSwitch;
pub use registry::{FactoryPair, PairFactory};
