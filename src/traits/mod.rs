//! Capabilities the pair engine consumes.
//!
//! The engine owns reserve accounting and nothing else.  Asset balances,
//! share bookkeeping, the protocol fee switch, flash-swap receivers, and
//! time are all reached through these traits:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`AssetLedger`] | authoritative balances and custody transfers |
//! | [`ShareLedger`] | liquidity-provider shares (mint/burn) |
//! | [`FeeRecipientSource`] | protocol fee recipient, if any |
//! | [`SwapCallee`] | flash-swap callback on the recipient |
//! | [`Clock`] | seconds for the price accumulators |

mod asset_ledger;
mod clock;
mod fee_source;
mod share_ledger;
mod swap_callee;

pub use asset_ledger::AssetLedger;
pub use clock::Clock;
pub use fee_source::FeeRecipientSource;
pub use share_ledger::ShareLedger;
pub use swap_callee::SwapCallee;
