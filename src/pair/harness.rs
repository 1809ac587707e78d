//! One bound pair over in-memory collaborators, for tests.

#![allow(clippy::panic)]

use std::rc::Rc;

use crate::config::PairConfig;
use crate::domain::{Address, Amount, Liquidity, Reserve};
use crate::factory::FeeSwitch;
use crate::memory::{ManualClock, MemoryAssets, ShareBook};
use crate::pair::Pair;

pub(crate) type TestPair = Pair<Rc<MemoryAssets>, Rc<ShareBook>, Rc<FeeSwitch>, Rc<ManualClock>>;

pub(crate) const E18: u128 = 1_000_000_000_000_000_000;

pub(crate) const REGISTRY: Address = Address::from_bytes([0xAA; 32]);
pub(crate) const PAIR: Address = Address::from_bytes([0xBB; 32]);
pub(crate) const TOKEN0: Address = Address::from_bytes([0x01; 32]);
pub(crate) const TOKEN1: Address = Address::from_bytes([0x02; 32]);
pub(crate) const ALICE: Address = Address::from_bytes([0xA1; 32]);
pub(crate) const BOB: Address = Address::from_bytes([0xB0; 32]);
pub(crate) const SETTER: Address = Address::from_bytes([0x5E; 32]);
pub(crate) const FEE_TO: Address = Address::from_bytes([0xFE; 32]);

pub(crate) const START: u64 = 1_000;

pub(crate) struct Harness {
    pub assets: Rc<MemoryAssets>,
    pub shares: Rc<ShareBook>,
    pub fees: Rc<FeeSwitch>,
    pub clock: Rc<ManualClock>,
    pub pair: TestPair,
}

impl Harness {
    pub fn unbound(config: PairConfig) -> Self {
        let assets = Rc::new(MemoryAssets::new());
        let shares = Rc::new(ShareBook::new());
        let fees = Rc::new(FeeSwitch::new(SETTER));
        let clock = Rc::new(ManualClock::new(START));
        let Ok(pair) = Pair::new(
            PAIR,
            REGISTRY,
            config,
            Rc::clone(&assets),
            Rc::clone(&shares),
            Rc::clone(&fees),
            Rc::clone(&clock),
        ) else {
            panic!("valid pair config");
        };
        Self {
            assets,
            shares,
            fees,
            clock,
            pair,
        }
    }

    pub fn with_config(config: PairConfig) -> Self {
        let h = Self::unbound(config);
        let Ok(()) = h.pair.bind(&REGISTRY, TOKEN0, TOKEN1) else {
            panic!("registry binds");
        };
        h
    }

    pub fn new() -> Self {
        Self::with_config(PairConfig::default())
    }

    /// Credits `amount` of `asset` straight into the pair's custody.
    pub fn send(&self, asset: Address, amount: u128) {
        let Ok(()) = self.assets.deposit(&asset, &PAIR, Amount::new(amount)) else {
            panic!("deposit into pair");
        };
    }

    /// Funds `owner` outside the pair.
    pub fn fund(&self, asset: Address, owner: Address, amount: u128) {
        let Ok(()) = self.assets.deposit(&asset, &owner, Amount::new(amount)) else {
            panic!("deposit");
        };
    }

    /// Deposits both assets and mints to `to`.
    pub fn provide(&self, amount0: u128, amount1: u128, to: Address) -> Liquidity {
        self.send(TOKEN0, amount0);
        self.send(TOKEN1, amount1);
        let Ok(minted) = self.pair.mint(&to, &to) else {
            panic!("mint {amount0}/{amount1}");
        };
        minted
    }

    /// Moves `amount` of `owner`'s shares into the pair.
    pub fn return_shares(&self, owner: Address, amount: u128) {
        let Ok(()) = self.shares.transfer(&owner, &PAIR, Liquidity::new(amount)) else {
            panic!("share transfer");
        };
    }

    pub fn balance(&self, asset: Address, owner: Address) -> u128 {
        self.assets.balance(&asset, &owner).get()
    }

    pub fn reserves(&self) -> (u128, u128) {
        let r = self.pair.get_reserves();
        (r.reserve0.get(), r.reserve1.get())
    }

    pub fn fee_on(&self) {
        let Ok(()) = self.fees.set_fee_to(&SETTER, Some(FEE_TO)) else {
            panic!("setter toggles fee");
        };
    }
}

pub(crate) fn reserve(value: u128) -> Reserve {
    let Ok(r) = Reserve::try_from_amount(Amount::new(value)) else {
        panic!("{value} fits in 112 bits");
    };
    r
}
