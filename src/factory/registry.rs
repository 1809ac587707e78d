//! Pair registry.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use alloy_primitives::keccak256;
use tracing::info;

use super::FeeSwitch;
use crate::config::PairConfig;
use crate::domain::{Address, AssetPair};
use crate::error::PairError;
use crate::pair::Pair;
use crate::traits::{AssetLedger, Clock, ShareLedger};

/// Pair type produced by a [`PairFactory`].
pub type FactoryPair<A, S, C> = Pair<A, S, Rc<FeeSwitch>, C>;

/// Creates, binds, and indexes one pair per unordered asset couple.
///
/// Every pair shares the factory's asset ledger, clock, configuration, and
/// [`FeeSwitch`]; each gets a fresh share ledger (`S::default()`).
///
/// # Pair addresses
///
/// `keccak256(factory ‖ asset0 ‖ asset1)` with the assets in canonical
/// order, so an address can be computed without consulting the registry
/// (see [`PairFactory::pair_address`]).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use pair_amm::config::PairConfig;
/// use pair_amm::domain::Address;
/// use pair_amm::factory::PairFactory;
/// use pair_amm::memory::{ManualClock, MemoryAssets, ShareBook};
///
/// let mut factory: PairFactory<_, Rc<ShareBook>, _> = PairFactory::new(
///     Address::from_bytes([0xFA; 32]),
///     Address::from_bytes([0x5E; 32]),
///     Rc::new(MemoryAssets::new()),
///     Rc::new(ManualClock::new(0)),
///     PairConfig::default(),
/// )
/// .expect("valid config");
///
/// let (a, b) = (Address::from_bytes([2; 32]), Address::from_bytes([1; 32]));
/// let pair = factory.create_pair(a, b).expect("created");
/// assert_eq!(pair.assets().map(|p| p.asset0()), Some(b));
/// assert!(factory.get_pair(a, b).is_some());
/// assert_eq!(factory.all_pairs_len(), 1);
/// ```
pub struct PairFactory<A, S, C> {
    address: Address,
    config: PairConfig,
    assets: A,
    clock: C,
    fee_switch: Rc<FeeSwitch>,
    pairs: HashMap<(Address, Address), Rc<FactoryPair<A, S, C>>>,
    all_pairs: Vec<Rc<FactoryPair<A, S, C>>>,
}

impl<A, S, C> PairFactory<A, S, C>
where
    A: AssetLedger + Clone,
    S: ShareLedger + Default,
    C: Clock + Clone,
{
    /// Creates an empty registry with the protocol fee off.
    ///
    /// # Errors
    ///
    /// Propagates [`PairConfig::validate`] failures.
    pub fn new(
        address: Address,
        fee_to_setter: Address,
        assets: A,
        clock: C,
        config: PairConfig,
    ) -> Result<Self, PairError> {
        config.validate()?;
        Ok(Self {
            address,
            config,
            assets,
            clock,
            fee_switch: Rc::new(FeeSwitch::new(fee_to_setter)),
            pairs: HashMap::new(),
            all_pairs: Vec::new(),
        })
    }

    /// Registry identity; the only caller allowed to bind its pairs.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Configuration handed to every new pair.
    #[must_use]
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// The shared protocol fee switch.
    #[must_use]
    pub fn fee_switch(&self) -> &Rc<FeeSwitch> {
        &self.fee_switch
    }

    /// Deterministic address of the pair for `assets`.
    #[must_use]
    pub fn pair_address(&self, assets: &AssetPair) -> Address {
        let mut preimage = [0u8; 96];
        preimage[..32].copy_from_slice(&self.address.as_bytes());
        preimage[32..64].copy_from_slice(&assets.asset0().as_bytes());
        preimage[64..].copy_from_slice(&assets.asset1().as_bytes());
        Address::from_bytes(keccak256(preimage).0)
    }

    /// Creates and binds the pair for `a` and `b` (in either order).
    ///
    /// # Errors
    ///
    /// - [`PairError::IdenticalAssets`] if `a == b`.
    /// - [`PairError::NullAsset`] if either is [`Address::ZERO`].
    /// - [`PairError::PairExists`] if the pair was already created.
    pub fn create_pair(
        &mut self,
        a: Address,
        b: Address,
    ) -> Result<Rc<FactoryPair<A, S, C>>, PairError> {
        let assets = AssetPair::new(a, b)?;
        let key = (assets.asset0(), assets.asset1());
        if self.pairs.contains_key(&key) {
            return Err(PairError::PairExists);
        }

        let address = self.pair_address(&assets);
        let pair = Pair::new(
            address,
            self.address,
            self.config,
            self.assets.clone(),
            S::default(),
            Rc::clone(&self.fee_switch),
            self.clock.clone(),
        )?;
        pair.bind(&self.address, assets.asset0(), assets.asset1())?;

        let pair = Rc::new(pair);
        self.pairs.insert(key, Rc::clone(&pair));
        self.pairs.insert((key.1, key.0), Rc::clone(&pair));
        self.all_pairs.push(Rc::clone(&pair));
        info!(
            pair = %address,
            asset0 = %assets.asset0(),
            asset1 = %assets.asset1(),
            index = self.all_pairs.len() - 1,
            "pair created"
        );
        Ok(pair)
    }

    /// Looks up a pair by its assets, in either order.
    #[must_use]
    pub fn get_pair(&self, a: Address, b: Address) -> Option<Rc<FactoryPair<A, S, C>>> {
        self.pairs.get(&(a, b)).cloned()
    }

    /// Every pair, in creation order.
    #[must_use]
    pub fn all_pairs(&self) -> &[Rc<FactoryPair<A, S, C>>] {
        &self.all_pairs
    }

    /// Number of pairs created.
    #[must_use]
    pub fn all_pairs_len(&self) -> usize {
        self.all_pairs.len()
    }
}

impl<A, S, C> fmt::Debug for PairFactory<A, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairFactory")
            .field("address", &self.address)
            .field("config", &self.config)
            .field("fee_switch", &self.fee_switch)
            .field("pairs", &self.all_pairs.len())
            .finish_non_exhaustive()
    }
}
