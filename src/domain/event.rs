//! Observational records emitted by a pair.

use super::{Address, Amount, Reserve};

/// A state change recorded by a pair after a successful operation.
///
/// Events never feed back into pair accounting; they exist for indexers,
/// tests, and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairEvent {
    /// Reserves were overwritten with freshly observed balances.
    Sync {
        /// New `reserve0`.
        reserve0: Reserve,
        /// New `reserve1`.
        reserve1: Reserve,
    },

    /// Shares were minted against a deposit.
    Mint {
        /// Identity that invoked `mint`.
        sender: Address,
        /// Asset0 deposited.
        amount0: Amount,
        /// Asset1 deposited.
        amount1: Amount,
    },

    /// Shares were burned and assets paid out.
    Burn {
        /// Identity that invoked `burn`.
        sender: Address,
        /// Asset0 paid out.
        amount0: Amount,
        /// Asset1 paid out.
        amount1: Amount,
        /// Recipient of the payout.
        to: Address,
    },

    /// A trade settled.
    Swap {
        /// Identity that invoked `swap`.
        sender: Address,
        /// Asset0 received by the pair.
        amount0_in: Amount,
        /// Asset1 received by the pair.
        amount1_in: Amount,
        /// Asset0 sent out.
        amount0_out: Amount,
        /// Asset1 sent out.
        amount1_out: Amount,
        /// Recipient of the outputs.
        to: Address,
    },
}

impl PairEvent {
    /// Short name used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sync { .. } => "sync",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::Swap { .. } => "swap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        let sync = PairEvent::Sync {
            reserve0: Reserve::ZERO,
            reserve1: Reserve::ZERO,
        };
        assert_eq!(sync.kind(), "sync");
        let mint = PairEvent::Mint {
            sender: Address::ZERO,
            amount0: Amount::ZERO,
            amount1: Amount::ZERO,
        };
        assert_eq!(mint.kind(), "mint");
    }
}
