//! Constant-product pair engine (Uniswap V2 style).
//!
//! A [`Pair`] holds custody of two assets and prices trades so that the
//! fee-adjusted product of its balances never decreases.  It never trusts
//! caller-declared amounts: deposits, repayments, and share redemptions
//! are all inferred from balances it reads back through its collaborators.
//!
//! # Swap check (asset0 in, asset1 out)
//!
//! ```text
//! amount_in_i = balance_i − (reserve_i − amount_out_i)     (or 0)
//! adjusted_i  = balance_i × 10 000 − amount_in_i × fee_bps
//! adjusted_0 × adjusted_1 ≥ reserve_0 × reserve_1 × 10 000²
//! ```
//!
//! # Liquidity
//!
//! - First deposit: `√(amount0 × amount1) − MINIMUM_LIQUIDITY`, with the
//!   minimum locked at [`Address::ZERO`].
//! - Later deposits: `min(amount0 × S / reserve0, amount1 × S / reserve1)`.
//! - Redemption: `L × balance_i / S` of each asset.

use std::cell::{Cell, RefCell};
use std::fmt;

use alloy_primitives::U256;
use tracing::{debug, trace};

use super::gate::ReentrancyGate;
use super::state::PairState;
use crate::config::PairConfig;
use crate::domain::{
    Address, Amount, AssetPair, BlockTimestamp, FeeTier, Liquidity, PairEvent, Reserve, Reserves,
};
use crate::error::PairError;
use crate::math::{isqrt_u256, mul_div, narrow, wide, Uq112x112};
use crate::memory::Checkpoint;
use crate::traits::{AssetLedger, Clock, FeeRecipientSource, ShareLedger, SwapCallee};

/// Callback request attached to a swap.
///
/// The callee runs after the outputs have been transferred and before the
/// pair checks what it was paid.  It is skipped when `data` is empty.
pub struct FlashSwap<'a, P: ?Sized> {
    /// Receiver of the callback, normally owned by the swap recipient.
    pub callee: &'a dyn SwapCallee<P>,
    /// Opaque payload forwarded to the callee.
    pub data: &'a [u8],
}

impl<'a, P: ?Sized> FlashSwap<'a, P> {
    /// Creates a callback request.
    pub fn new(callee: &'a dyn SwapCallee<P>, data: &'a [u8]) -> Self {
        Self { callee, data }
    }
}

impl<P: ?Sized> fmt::Debug for FlashSwap<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashSwap")
            .field("data_len", &self.data.len())
            .finish_non_exhaustive()
    }
}

/// One constant-product market between two assets.
///
/// # Type Parameters
///
/// - `A` — [`AssetLedger`]: balances and custody of the two assets.
/// - `S` — [`ShareLedger`]: this pair's liquidity shares.
/// - `F` — [`FeeRecipientSource`]: the protocol fee switch.
/// - `C` — [`Clock`]: time for the price accumulators.
///
/// # Reentrancy
///
/// Every mutating entry point takes `&self` and runs behind a
/// [`ReentrancyGate`].  A flash-swap callee that calls back into the same
/// pair gets [`PairError::Reentrant`]; the outer swap is unaffected.
///
/// # Failure
///
/// A failed call leaves the pair's own state and event log untouched.
/// Transfers and share mints already made through collaborators are not
/// undone here; run calls through [`atomically`](crate::memory::atomically)
/// (or an equivalent transactional environment) for all-or-nothing
/// collaborator state.  A pair is itself a [`Checkpoint`], so other pairs
/// touched by a flash-swap callee can join the same rollback.
pub struct Pair<A, S, F, C> {
    address: Address,
    registry: Address,
    config: PairConfig,
    assets: A,
    shares: S,
    fee_source: F,
    clock: C,
    gate: ReentrancyGate,
    state: Cell<PairState>,
    events: RefCell<Vec<PairEvent>>,
    saved: RefCell<Vec<(PairState, usize)>>,
}

impl<A, S, F, C> Pair<A, S, F, C>
where
    A: AssetLedger,
    S: ShareLedger,
    F: FeeRecipientSource,
    C: Clock,
{
    /// Creates an unbound pair.
    ///
    /// Only `registry` may later [`bind`](Self::bind) it to its assets.
    ///
    /// # Errors
    ///
    /// Propagates [`PairConfig::validate`] failures.
    pub fn new(
        address: Address,
        registry: Address,
        config: PairConfig,
        assets: A,
        shares: S,
        fee_source: F,
        clock: C,
    ) -> Result<Self, PairError> {
        config.validate()?;
        Ok(Self {
            address,
            registry,
            config,
            assets,
            shares,
            fee_source,
            clock,
            gate: ReentrancyGate::new(),
            state: Cell::new(PairState::default()),
            events: RefCell::new(Vec::new()),
            saved: RefCell::new(Vec::new()),
        })
    }

    // -- accessors ----------------------------------------------------------

    /// Identity under which the pair holds custody.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Identity allowed to bind the pair.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// The pair's configuration.
    #[must_use]
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// The bound assets, or `None` before [`bind`](Self::bind).
    #[must_use]
    pub fn assets(&self) -> Option<AssetPair> {
        self.state.get().assets
    }

    /// The asset ledger handle.
    pub const fn asset_ledger(&self) -> &A {
        &self.assets
    }

    /// The share ledger handle.
    pub const fn shares(&self) -> &S {
        &self.shares
    }

    /// `true` while a mutating operation is in progress.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    /// Cached reserves and the time they were last written.
    #[must_use]
    pub fn get_reserves(&self) -> Reserves {
        self.state.get().reserves()
    }

    /// Cumulative price of asset0 in asset1, UQ112.112 × seconds.
    #[must_use]
    pub fn price0_cumulative_last(&self) -> U256 {
        self.state.get().price0_cumulative_last
    }

    /// Cumulative price of asset1 in asset0, UQ112.112 × seconds.
    #[must_use]
    pub fn price1_cumulative_last(&self) -> U256 {
        self.state.get().price1_cumulative_last
    }

    /// `reserve0 × reserve1` as of the last liquidity event with the
    /// protocol fee on.
    #[must_use]
    pub fn k_last(&self) -> U256 {
        self.state.get().k_last
    }

    /// Copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PairEvent> {
        self.events.borrow().clone()
    }

    /// Drains the recorded events.
    pub fn take_events(&self) -> Vec<PairEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    // -- entry points -------------------------------------------------------

    /// Records the pair's two assets.  Callable once, by the registry.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::Unauthorized`] if `caller` is not the registry or the
    ///   pair is already bound.
    /// - [`PairError::IdenticalAssets`] / [`PairError::NullAsset`] for
    ///   invalid identities.
    pub fn bind(&self, caller: &Address, asset0: Address, asset1: Address) -> Result<(), PairError> {
        self.guarded("bind", || {
            if *caller != self.registry {
                return Err(PairError::Unauthorized);
            }
            let mut state = self.state.get();
            if state.assets.is_some() {
                return Err(PairError::Unauthorized);
            }
            state.assets = Some(AssetPair::from_parts(asset0, asset1)?);
            self.state.set(state);
            debug!(pair = %self.address, %asset0, %asset1, "pair bound");
            Ok(())
        })
    }

    /// Mints shares to `to` against the assets deposited since the last
    /// reserve update.
    ///
    /// Both assets must already sit in the pair's custody.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::NotBound`] before [`bind`](Self::bind).
    /// - [`PairError::Underflow`] if a balance dropped below its reserve.
    /// - [`PairError::InsufficientLiquidityMinted`] if the deposit earns no
    ///   shares.
    /// - [`PairError::ReserveOverflow`] if a new balance exceeds 112 bits.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use pair_amm::config::PairConfig;
    /// use pair_amm::domain::{Address, Amount, Liquidity};
    /// use pair_amm::memory::{ManualClock, MemoryAssets, ShareBook};
    /// use pair_amm::pair::Pair;
    /// use pair_amm::traits::ShareLedger;
    ///
    /// let registry = Address::from_bytes([0xAA; 32]);
    /// let (usdc, weth) = (Address::from_bytes([1; 32]), Address::from_bytes([2; 32]));
    /// let lp = Address::from_bytes([7; 32]);
    /// let assets = Rc::new(MemoryAssets::new());
    /// let pair = Pair::new(
    ///     Address::from_bytes([0xBB; 32]),
    ///     registry,
    ///     PairConfig::default(),
    ///     Rc::clone(&assets),
    ///     ShareBook::new(),
    ///     None::<Address>,
    ///     ManualClock::new(1),
    /// )
    /// .expect("valid config");
    /// pair.bind(&registry, usdc, weth).expect("bound");
    ///
    /// assets.deposit(&usdc, &pair.address(), Amount::new(4_000)).expect("faucet");
    /// assets.deposit(&weth, &pair.address(), Amount::new(9_000)).expect("faucet");
    /// let minted = pair.mint(&lp, &lp).expect("minted");
    ///
    /// // √(4 000 × 9 000) = 6 000, minus the 1 000 locked shares
    /// assert_eq!(minted, Liquidity::new(5_000));
    /// assert_eq!(pair.shares().total_supply(), Liquidity::new(6_000));
    /// ```
    pub fn mint(&self, caller: &Address, to: &Address) -> Result<Liquidity, PairError> {
        self.guarded("mint", || {
            let assets = self.bound()?;
            let before = self.state.get();
            let (reserve0, reserve1) = (before.reserve0, before.reserve1);
            let (balance0, balance1) = self.balances(&assets)?;
            let amount0 = balance0
                .checked_sub(&reserve0.as_amount())
                .ok_or(PairError::Underflow("balance0 below reserve0"))?;
            let amount1 = balance1
                .checked_sub(&reserve1.as_amount())
                .ok_or(PairError::Underflow("balance1 below reserve1"))?;

            let fee_on = self.mint_fee(reserve0, reserve1)?;
            let total_supply = self.shares.total_supply();
            let minimum = self.config.minimum_liquidity();

            let liquidity = if total_supply.is_zero() {
                let root = isqrt_u256(wide(amount0.get()) * wide(amount1.get()));
                let root = narrow(root, "initial liquidity")?;
                let liquidity = root
                    .checked_sub(minimum.get())
                    .filter(|l| *l > 0)
                    .ok_or(PairError::InsufficientLiquidityMinted)?;
                self.shares.mint(&Address::ZERO, minimum)?;
                liquidity
            } else {
                let supply = wide(total_supply.get());
                let by0 = mul_div(
                    wide(amount0.get()),
                    supply,
                    wide(reserve0.get()),
                    "liquidity from amount0",
                )?;
                let by1 = mul_div(
                    wide(amount1.get()),
                    supply,
                    wide(reserve1.get()),
                    "liquidity from amount1",
                )?;
                narrow(by0.min(by1), "minted liquidity")?
            };
            if liquidity == 0 {
                return Err(PairError::InsufficientLiquidityMinted);
            }
            let liquidity = Liquidity::new(liquidity);
            self.shares.mint(to, liquidity)?;

            self.update(balance0, balance1, reserve0, reserve1)?;
            if fee_on {
                self.refresh_k_last();
            }
            self.emit(PairEvent::Mint {
                sender: *caller,
                amount0,
                amount1,
            });
            debug!(
                pair = %self.address,
                %to,
                %amount0,
                %amount1,
                %liquidity,
                "liquidity minted"
            );
            Ok(liquidity)
        })
    }

    /// Burns the shares the pair holds in its own custody and pays the
    /// proportional balances to `to`.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::NotBound`] before [`bind`](Self::bind).
    /// - [`PairError::InsufficientLiquidityBurned`] if either payout is zero.
    /// - Transfer and share-ledger failures, unchanged.
    pub fn burn(&self, caller: &Address, to: &Address) -> Result<(Amount, Amount), PairError> {
        self.guarded("burn", || {
            let assets = self.bound()?;
            let before = self.state.get();
            let (reserve0, reserve1) = (before.reserve0, before.reserve1);
            let (balance0, balance1) = self.balances(&assets)?;
            let liquidity = self.shares.balance_of(&self.address);

            let fee_on = self.mint_fee(reserve0, reserve1)?;
            let total_supply = self.shares.total_supply();
            if total_supply.is_zero() {
                return Err(PairError::InsufficientLiquidityBurned);
            }
            let supply = wide(total_supply.get());
            let amount0 = narrow(
                mul_div(wide(liquidity.get()), wide(balance0.get()), supply, "burn amount0")?,
                "burn amount0",
            )?;
            let amount1 = narrow(
                mul_div(wide(liquidity.get()), wide(balance1.get()), supply, "burn amount1")?,
                "burn amount1",
            )?;
            if amount0 == 0 || amount1 == 0 {
                return Err(PairError::InsufficientLiquidityBurned);
            }
            let (amount0, amount1) = (Amount::new(amount0), Amount::new(amount1));

            self.shares.burn(&self.address, liquidity)?;
            self.assets
                .safe_transfer(&assets.asset0(), &self.address, to, amount0)?;
            self.assets
                .safe_transfer(&assets.asset1(), &self.address, to, amount1)?;

            let (balance0, balance1) = self.balances(&assets)?;
            self.update(balance0, balance1, reserve0, reserve1)?;
            if fee_on {
                self.refresh_k_last();
            }
            self.emit(PairEvent::Burn {
                sender: *caller,
                amount0,
                amount1,
                to: *to,
            });
            debug!(
                pair = %self.address,
                %to,
                %liquidity,
                %amount0,
                %amount1,
                "liquidity burned"
            );
            Ok((amount0, amount1))
        })
    }

    /// Sends the requested outputs to `to` and checks that the pair was
    /// paid enough for them.
    ///
    /// With a non-empty [`FlashSwap`] payload the callee runs between the
    /// transfer and the check, so it may pay for the outputs with the
    /// outputs themselves.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::NotBound`] before [`bind`](Self::bind).
    /// - [`PairError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`PairError::InsufficientLiquidity`] if an output is not strictly
    ///   below its reserve.
    /// - [`PairError::InvalidRecipient`] if `to` is one of the assets.
    /// - [`PairError::InsufficientInputAmount`] if nothing was paid in.
    /// - [`PairError::InvariantViolation`] if the fee-adjusted product
    ///   shrank.
    /// - [`PairError::ReserveOverflow`] if a new balance exceeds 112 bits.
    /// - Any error returned by the callee.
    pub fn swap(
        &self,
        caller: &Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: &Address,
        flash: Option<FlashSwap<'_, Self>>,
    ) -> Result<(), PairError> {
        self.guarded("swap", || {
            if amount0_out.is_zero() && amount1_out.is_zero() {
                return Err(PairError::InsufficientOutputAmount);
            }
            let assets = self.bound()?;
            let before = self.state.get();
            let (reserve0, reserve1) = (before.reserve0, before.reserve1);
            if amount0_out >= reserve0.as_amount() || amount1_out >= reserve1.as_amount() {
                return Err(PairError::InsufficientLiquidity);
            }
            if assets.contains(to) {
                return Err(PairError::InvalidRecipient);
            }

            if !amount0_out.is_zero() {
                self.assets
                    .safe_transfer(&assets.asset0(), &self.address, to, amount0_out)?;
            }
            if !amount1_out.is_zero() {
                self.assets
                    .safe_transfer(&assets.asset1(), &self.address, to, amount1_out)?;
            }
            if let Some(flash) = flash.filter(|f| !f.data.is_empty()) {
                trace!(pair = %self.address, %to, data_len = flash.data.len(), "swap callback");
                flash
                    .callee
                    .on_swap(self, caller, amount0_out, amount1_out, flash.data)?;
            }

            let (balance0, balance1) = self.balances(&assets)?;
            let amount0_in = paid_in(balance0, reserve0, amount0_out);
            let amount1_in = paid_in(balance1, reserve1, amount1_out);
            if amount0_in.is_zero() && amount1_in.is_zero() {
                return Err(PairError::InsufficientInputAmount);
            }

            let new0 = Reserve::try_from_amount(balance0)?;
            let new1 = Reserve::try_from_amount(balance1)?;
            let fee = self.config.swap_fee();
            let adjusted0 = fee_adjusted(new0, amount0_in, fee)?;
            let adjusted1 = fee_adjusted(new1, amount1_in, fee)?;
            let scale = U256::from(FeeTier::SCALE);
            let k_before = wide(reserve0.get()) * wide(reserve1.get()) * scale * scale;
            let k_after = adjusted0
                .checked_mul(adjusted1)
                .ok_or(PairError::Overflow("adjusted product"))?;
            if k_after < k_before {
                return Err(PairError::InvariantViolation);
            }

            self.update(balance0, balance1, reserve0, reserve1)?;
            self.emit(PairEvent::Swap {
                sender: *caller,
                amount0_in,
                amount1_in,
                amount0_out,
                amount1_out,
                to: *to,
            });
            debug!(
                pair = %self.address,
                %to,
                %amount0_in,
                %amount1_in,
                %amount0_out,
                %amount1_out,
                "swap settled"
            );
            Ok(())
        })
    }

    /// Sends any balance held above the reserves to `to`.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::NotBound`] before [`bind`](Self::bind).
    /// - [`PairError::Underflow`] if a balance is below its reserve.
    pub fn skim(&self, to: &Address) -> Result<(), PairError> {
        self.guarded("skim", || {
            let assets = self.bound()?;
            let state = self.state.get();
            let (balance0, balance1) = self.balances(&assets)?;
            let excess0 = balance0
                .checked_sub(&state.reserve0.as_amount())
                .ok_or(PairError::Underflow("balance0 below reserve0"))?;
            let excess1 = balance1
                .checked_sub(&state.reserve1.as_amount())
                .ok_or(PairError::Underflow("balance1 below reserve1"))?;
            if !excess0.is_zero() {
                self.assets
                    .safe_transfer(&assets.asset0(), &self.address, to, excess0)?;
            }
            if !excess1.is_zero() {
                self.assets
                    .safe_transfer(&assets.asset1(), &self.address, to, excess1)?;
            }
            debug!(pair = %self.address, %to, %excess0, %excess1, "skimmed");
            Ok(())
        })
    }

    /// Overwrites the reserves with the current balances.
    ///
    /// # Errors
    ///
    /// - [`PairError::Reentrant`] if the pair is locked.
    /// - [`PairError::NotBound`] before [`bind`](Self::bind).
    /// - [`PairError::ReserveOverflow`] if a balance exceeds 112 bits.
    pub fn sync(&self) -> Result<(), PairError> {
        self.guarded("sync", || {
            let assets = self.bound()?;
            let state = self.state.get();
            let (balance0, balance1) = self.balances(&assets)?;
            self.update(balance0, balance1, state.reserve0, state.reserve1)?;
            debug!(pair = %self.address, %balance0, %balance1, "synced");
            Ok(())
        })
    }

    // -- internals ----------------------------------------------------------

    /// Runs `body` behind the gate.  On failure the pair's own state and
    /// event log are restored.
    fn guarded<T>(
        &self,
        op: &'static str,
        body: impl FnOnce() -> Result<T, PairError>,
    ) -> Result<T, PairError> {
        let _guard = self.gate.enter().map_err(|err| {
            debug!(pair = %self.address, op, "rejected: pair is locked");
            err
        })?;
        let saved = self.state.get();
        let mark = self.events.borrow().len();
        let result = body();
        if let Err(err) = &result {
            self.state.set(saved);
            self.events.borrow_mut().truncate(mark);
            debug!(pair = %self.address, op, error = %err, "operation failed");
        }
        result
    }

    fn bound(&self) -> Result<AssetPair, PairError> {
        self.state.get().assets.ok_or(PairError::NotBound)
    }

    fn balances(&self, assets: &AssetPair) -> Result<(Amount, Amount), PairError> {
        let balance0 = self.assets.balance_of(&assets.asset0(), &self.address)?;
        let balance1 = self.assets.balance_of(&assets.asset1(), &self.address)?;
        Ok((balance0, balance1))
    }

    fn emit(&self, event: PairEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Writes new reserves, first folding the outgoing ones into the price
    /// accumulators.
    ///
    /// `reserve0`/`reserve1` are the reserves as they stood before the
    /// calling operation.
    fn update(
        &self,
        balance0: Amount,
        balance1: Amount,
        reserve0: Reserve,
        reserve1: Reserve,
    ) -> Result<(), PairError> {
        let new0 = Reserve::try_from_amount(balance0)?;
        let new1 = Reserve::try_from_amount(balance1)?;
        let now = BlockTimestamp::from_secs(self.clock.now());

        let mut state = self.state.get();
        let elapsed = now.elapsed_since(state.block_timestamp_last);
        if elapsed > 0 && !reserve0.is_zero() && !reserve1.is_zero() {
            state.price0_cumulative_last = state
                .price0_cumulative_last
                .wrapping_add(Uq112x112::time_weighted(reserve1, reserve0, elapsed)?);
            state.price1_cumulative_last = state
                .price1_cumulative_last
                .wrapping_add(Uq112x112::time_weighted(reserve0, reserve1, elapsed)?);
        }
        state.reserve0 = new0;
        state.reserve1 = new1;
        state.block_timestamp_last = now;
        self.state.set(state);

        trace!(
            pair = %self.address,
            reserve0 = %new0,
            reserve1 = %new1,
            timestamp = %now,
            elapsed,
            "reserves updated"
        );
        self.emit(PairEvent::Sync {
            reserve0: new0,
            reserve1: new1,
        });
        Ok(())
    }

    /// Mints the protocol's cut of fee growth since `k_last`.  Returns
    /// whether the protocol fee is on.
    fn mint_fee(&self, reserve0: Reserve, reserve1: Reserve) -> Result<bool, PairError> {
        let mut state = self.state.get();
        let k_last = state.k_last;
        let Some(fee_to) = self.fee_source.protocol_fee_recipient() else {
            if !k_last.is_zero() {
                state.k_last = U256::ZERO;
                self.state.set(state);
            }
            return Ok(false);
        };
        if k_last.is_zero() {
            return Ok(true);
        }

        let root_k = isqrt_u256(wide(reserve0.get()) * wide(reserve1.get()));
        let root_k_last = isqrt_u256(k_last);
        if root_k > root_k_last {
            let supply = wide(self.shares.total_supply().get());
            let numerator = supply
                .checked_mul(root_k - root_k_last)
                .ok_or(PairError::Overflow("protocol fee numerator"))?;
            let share = U256::from(self.config.protocol_fee_share() - 1);
            let denominator = root_k
                .checked_mul(share)
                .and_then(|d| d.checked_add(root_k_last))
                .ok_or(PairError::Overflow("protocol fee denominator"))?;
            let liquidity = narrow(
                numerator
                    .checked_div(denominator)
                    .ok_or(PairError::DivisionByZero)?,
                "protocol fee liquidity",
            )?;
            if liquidity > 0 {
                let liquidity = Liquidity::new(liquidity);
                self.shares.mint(&fee_to, liquidity)?;
                debug!(pair = %self.address, %fee_to, %liquidity, "protocol fee minted");
            }
        }
        Ok(true)
    }

    fn refresh_k_last(&self) {
        let mut state = self.state.get();
        state.k_last = wide(state.reserve0.get()) * wide(state.reserve1.get());
        self.state.set(state);
    }
}

/// What the pair received of one asset during a swap.
fn paid_in(balance: Amount, reserve: Reserve, amount_out: Amount) -> Amount {
    let floor = reserve.as_amount().saturating_sub(&amount_out);
    balance.saturating_sub(&floor)
}

/// `balance × 10 000 − amount_in × fee_bps` in 256 bits.
fn fee_adjusted(balance: Reserve, amount_in: Amount, fee: FeeTier) -> Result<U256, PairError> {
    let scaled = wide(balance.get()) * U256::from(FeeTier::SCALE);
    let charged = wide(amount_in.get()) * U256::from(fee.scaled());
    scaled
        .checked_sub(charged)
        .ok_or(PairError::Underflow("fee-adjusted balance"))
}

impl<A, S, F, C> Checkpoint for Pair<A, S, F, C> {
    fn begin(&self) {
        let mark = (self.state.get(), self.events.borrow().len());
        self.saved.borrow_mut().push(mark);
    }

    fn commit(&self) {
        self.saved.borrow_mut().pop();
    }

    fn rollback(&self) {
        if let Some((state, events)) = self.saved.borrow_mut().pop() {
            self.state.set(state);
            self.events.borrow_mut().truncate(events);
        }
    }
}

impl<A, S, F, C> fmt::Debug for Pair<A, S, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("address", &self.address)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("state", &self.state.get())
            .field("lock", &self.gate.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::config::PairConfig;
    use crate::math::get_amount_out;
    use crate::memory::{atomically, Checkpoint, MemoryAssets};
    use crate::pair::harness::{
        reserve, Harness, TestPair, ALICE, BOB, E18, FEE_TO, PAIR, REGISTRY, SETTER, START,
        TOKEN0, TOKEN1,
    };

    const SWAP_OUT: u128 = 1_662_497_915_624_478_906;

    fn amount(v: u128) -> Amount {
        Amount::new(v)
    }

    /// Seeds the 5e18 / 10e18 pool used by the swap examples.
    fn seeded() -> Harness {
        let h = Harness::new();
        h.provide(5 * E18, 10 * E18, ALICE);
        let _ = h.pair.take_events();
        h
    }

    // -- bind ---------------------------------------------------------------

    #[test]
    fn bind_only_by_registry() {
        let h = Harness::unbound(PairConfig::default());
        assert_eq!(
            h.pair.bind(&ALICE, TOKEN0, TOKEN1),
            Err(PairError::Unauthorized)
        );
        assert!(h.pair.assets().is_none());
        assert!(h.pair.bind(&REGISTRY, TOKEN0, TOKEN1).is_ok());
        let Some(assets) = h.pair.assets() else {
            panic!("bound");
        };
        assert_eq!(assets.asset0(), TOKEN0);
        assert_eq!(assets.asset1(), TOKEN1);
    }

    #[test]
    fn bind_only_once() {
        let h = Harness::new();
        assert_eq!(
            h.pair.bind(&REGISTRY, TOKEN1, TOKEN0),
            Err(PairError::Unauthorized)
        );
        assert_eq!(h.pair.assets().map(|a| a.asset0()), Some(TOKEN0));
    }

    #[test]
    fn bind_rejects_invalid_assets() {
        let h = Harness::unbound(PairConfig::default());
        assert_eq!(
            h.pair.bind(&REGISTRY, TOKEN0, TOKEN0),
            Err(PairError::IdenticalAssets)
        );
        assert_eq!(
            h.pair.bind(&REGISTRY, Address::ZERO, TOKEN1),
            Err(PairError::NullAsset)
        );
        assert!(h.pair.assets().is_none());
    }

    #[test]
    fn unbound_pair_refuses_operations() {
        let h = Harness::unbound(PairConfig::default());
        assert_eq!(h.pair.mint(&ALICE, &ALICE), Err(PairError::NotBound));
        assert_eq!(h.pair.burn(&ALICE, &ALICE), Err(PairError::NotBound));
        assert_eq!(
            h.pair.swap(&ALICE, amount(0), amount(1), &ALICE, None),
            Err(PairError::NotBound)
        );
        assert_eq!(h.pair.skim(&ALICE), Err(PairError::NotBound));
        assert_eq!(h.pair.sync(), Err(PairError::NotBound));
        assert!(!h.pair.is_locked());
    }

    // -- mint ---------------------------------------------------------------

    #[test]
    fn first_deposit_locks_minimum_liquidity() {
        let h = Harness::new();
        let minted = h.provide(E18, 4 * E18, ALICE);

        assert_eq!(minted, Liquidity::new(2 * E18 - 1_000));
        assert_eq!(h.shares.balance_of(&ALICE), minted);
        assert_eq!(h.shares.balance_of(&Address::ZERO), Liquidity::new(1_000));
        assert_eq!(h.shares.total_supply(), Liquidity::new(2 * E18));
        assert_eq!(h.reserves(), (E18, 4 * E18));
        assert_eq!(h.pair.get_reserves().block_timestamp_last.get(), START as u32);
        assert_eq!(
            h.pair.events(),
            vec![
                PairEvent::Sync {
                    reserve0: reserve(E18),
                    reserve1: reserve(4 * E18),
                },
                PairEvent::Mint {
                    sender: ALICE,
                    amount0: amount(E18),
                    amount1: amount(4 * E18),
                },
            ]
        );
    }

    #[test]
    fn first_deposit_at_minimum_is_rejected() {
        let h = Harness::new();
        h.send(TOKEN0, 1_000);
        h.send(TOKEN1, 1_000);
        assert_eq!(
            h.pair.mint(&ALICE, &ALICE),
            Err(PairError::InsufficientLiquidityMinted)
        );
        assert_eq!(h.reserves(), (0, 0));
        assert!(h.pair.events().is_empty());
        assert!(!h.pair.is_locked());
    }

    #[test]
    fn later_deposit_credits_limiting_asset() {
        let h = Harness::new();
        assert_eq!(h.provide(10_000, 40_000, ALICE), Liquidity::new(19_000));

        // 1 000 of asset0 is worth 2 000 shares; 8 000 of asset1 would be 4 000.
        let minted = h.provide(1_000, 8_000, BOB);
        assert_eq!(minted, Liquidity::new(2_000));
        assert_eq!(h.shares.total_supply(), Liquidity::new(22_000));
        assert_eq!(h.reserves(), (11_000, 48_000));
    }

    #[test]
    fn mint_without_deposit_is_rejected() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        assert_eq!(
            h.pair.mint(&BOB, &BOB),
            Err(PairError::InsufficientLiquidityMinted)
        );
    }

    #[test]
    fn mint_detects_balance_below_reserve() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        let Ok(()) = h.assets.transfer(&TOKEN0, &PAIR, &BOB, amount(1)) else {
            panic!("transfer");
        };
        assert!(matches!(
            h.pair.mint(&ALICE, &ALICE),
            Err(PairError::Underflow(_))
        ));
    }

    #[test]
    fn mint_respects_custom_minimum_liquidity() {
        let Ok(config) = PairConfig::new(FeeTier::default(), 6, Liquidity::new(10)) else {
            panic!("valid config");
        };
        let h = Harness::with_config(config);
        assert_eq!(h.provide(100, 100, ALICE), Liquidity::new(90));
        assert_eq!(h.shares.balance_of(&Address::ZERO), Liquidity::new(10));
    }

    // -- burn ---------------------------------------------------------------

    #[test]
    fn burn_pays_proportional_share() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        h.return_shares(ALICE, 9_500);

        let Ok((out0, out1)) = h.pair.burn(&ALICE, &BOB) else {
            panic!("burn");
        };
        assert_eq!((out0, out1), (amount(4_750), amount(19_000)));
        assert_eq!(h.balance(TOKEN0, BOB), 4_750);
        assert_eq!(h.balance(TOKEN1, BOB), 19_000);
        assert_eq!(h.shares.total_supply(), Liquidity::new(10_500));
        assert_eq!(h.shares.balance_of(&PAIR), Liquidity::ZERO);
        assert_eq!(h.reserves(), (5_250, 21_000));
        assert_eq!(
            h.pair.events().last(),
            Some(&PairEvent::Burn {
                sender: ALICE,
                amount0: amount(4_750),
                amount1: amount(19_000),
                to: BOB,
            })
        );
    }

    #[test]
    fn burn_includes_donated_balance() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        h.send(TOKEN0, 2_000);
        h.return_shares(ALICE, 9_500);

        let Ok((out0, out1)) = h.pair.burn(&ALICE, &ALICE) else {
            panic!("burn");
        };
        assert_eq!(out0, amount(5_700));
        assert_eq!(out1, amount(19_000));
        assert_eq!(h.reserves(), (6_300, 21_000));
    }

    #[test]
    fn burn_without_shares_is_rejected() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        assert_eq!(
            h.pair.burn(&ALICE, &ALICE),
            Err(PairError::InsufficientLiquidityBurned)
        );
        let empty = Harness::new();
        assert_eq!(
            empty.pair.burn(&ALICE, &ALICE),
            Err(PairError::InsufficientLiquidityBurned)
        );
    }

    #[test]
    fn burn_too_small_for_one_unit() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        // 1 share of 20 000 pays 0.5 of asset0.
        h.return_shares(ALICE, 1);
        assert_eq!(
            h.pair.burn(&ALICE, &ALICE),
            Err(PairError::InsufficientLiquidityBurned)
        );
    }

    // -- swap ---------------------------------------------------------------

    #[test]
    fn swap_reference_output_succeeds() {
        let h = seeded();
        h.send(TOKEN0, E18);
        assert!(h
            .pair
            .swap(&ALICE, Amount::ZERO, amount(SWAP_OUT), &BOB, None)
            .is_ok());
        assert_eq!(h.balance(TOKEN1, BOB), SWAP_OUT);
        assert_eq!(h.reserves(), (6 * E18, 10 * E18 - SWAP_OUT));
        assert_eq!(
            h.pair.events(),
            vec![
                PairEvent::Sync {
                    reserve0: reserve(6 * E18),
                    reserve1: reserve(10 * E18 - SWAP_OUT),
                },
                PairEvent::Swap {
                    sender: ALICE,
                    amount0_in: amount(E18),
                    amount1_in: Amount::ZERO,
                    amount0_out: Amount::ZERO,
                    amount1_out: amount(SWAP_OUT),
                    to: BOB,
                },
            ]
        );
    }

    #[test]
    fn swap_one_unit_past_reference_violates_invariant() {
        let h = seeded();
        h.send(TOKEN0, E18);
        assert_eq!(
            h.pair
                .swap(&ALICE, Amount::ZERO, amount(SWAP_OUT + 1), &BOB, None),
            Err(PairError::InvariantViolation)
        );
        assert_eq!(h.reserves(), (5 * E18, 10 * E18));
        assert!(h.pair.events().is_empty());
        assert!(!h.pair.is_locked());
    }

    #[test]
    fn swap_asset1_for_asset0_at_quoted_boundary() {
        let Ok(out) = get_amount_out(
            amount(E18),
            amount(10 * E18),
            amount(5 * E18),
            FeeTier::default(),
        ) else {
            panic!("quote");
        };
        let ok = seeded();
        ok.send(TOKEN1, E18);
        assert!(ok.pair.swap(&ALICE, out, Amount::ZERO, &BOB, None).is_ok());
        assert_eq!(ok.balance(TOKEN0, BOB), out.get());

        let over = seeded();
        over.send(TOKEN1, E18);
        assert_eq!(
            over.pair
                .swap(&ALICE, amount(out.get() + 1), Amount::ZERO, &BOB, None),
            Err(PairError::InvariantViolation)
        );
    }

    #[test]
    fn swap_without_output_rejected() {
        let h = seeded();
        h.send(TOKEN0, E18);
        assert_eq!(
            h.pair.swap(&ALICE, Amount::ZERO, Amount::ZERO, &BOB, None),
            Err(PairError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn swap_cannot_drain_a_reserve() {
        let h = seeded();
        h.send(TOKEN0, 100 * E18);
        assert_eq!(
            h.pair
                .swap(&ALICE, Amount::ZERO, amount(10 * E18), &BOB, None),
            Err(PairError::InsufficientLiquidity)
        );
        assert_eq!(
            h.pair
                .swap(&ALICE, amount(5 * E18 + 1), Amount::ZERO, &BOB, None),
            Err(PairError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_to_asset_identity_rejected() {
        let h = seeded();
        h.send(TOKEN0, E18);
        for to in [TOKEN0, TOKEN1] {
            assert_eq!(
                h.pair.swap(&ALICE, Amount::ZERO, amount(1), &to, None),
                Err(PairError::InvalidRecipient)
            );
        }
    }

    #[test]
    fn swap_without_input_rejected_and_rolled_back() {
        let h = seeded();
        let checkpoints: [&dyn Checkpoint; 2] = [&*h.assets, &*h.shares];
        let result = atomically(&checkpoints, || {
            h.pair.swap(&ALICE, Amount::ZERO, amount(1_000), &BOB, None)
        });
        assert_eq!(result, Err(PairError::InsufficientInputAmount));
        assert_eq!(h.balance(TOKEN1, BOB), 0);
        assert_eq!(h.balance(TOKEN1, PAIR), 10 * E18);
        assert_eq!(h.reserves(), (5 * E18, 10 * E18));
    }

    #[test]
    fn swap_rejects_balance_beyond_reserve_range() {
        let h = seeded();
        h.send(TOKEN0, 1u128 << 112);
        assert_eq!(
            h.pair.swap(&ALICE, Amount::ZERO, amount(1), &BOB, None),
            Err(PairError::ReserveOverflow)
        );
    }

    #[test]
    fn swap_fee_tier_changes_the_boundary() {
        let Ok(config) =
            PairConfig::new(FeeTier::TIER_0_05_PERCENT, 6, PairConfig::DEFAULT_MINIMUM_LIQUIDITY)
        else {
            panic!("valid config");
        };
        let Ok(out) = get_amount_out(
            amount(E18),
            amount(5 * E18),
            amount(10 * E18),
            FeeTier::TIER_0_05_PERCENT,
        ) else {
            panic!("quote");
        };
        assert!(out.get() > SWAP_OUT);

        let h = Harness::with_config(config);
        h.provide(5 * E18, 10 * E18, ALICE);
        h.send(TOKEN0, E18);
        let checkpoints: [&dyn Checkpoint; 1] = [&*h.assets];
        let over = atomically(&checkpoints, || {
            h.pair
                .swap(&ALICE, Amount::ZERO, amount(out.get() + 1), &BOB, None)
        });
        assert_eq!(over, Err(PairError::InvariantViolation));
        assert!(h.pair.swap(&ALICE, Amount::ZERO, out, &BOB, None).is_ok());
    }

    // -- flash swaps and reentrancy -------------------------------------------

    /// Pays `repay` of `asset` back from `payer` after poking the pair.
    struct Repayer {
        assets: Rc<MemoryAssets>,
        payer: Address,
        asset: Address,
        repay: u128,
        calls: Cell<u32>,
        reentry: RefCell<Vec<Result<(), PairError>>>,
    }

    impl Repayer {
        fn new(h: &Harness, asset: Address, repay: u128) -> Self {
            Self {
                assets: Rc::clone(&h.assets),
                payer: BOB,
                asset,
                repay,
                calls: Cell::new(0),
                reentry: RefCell::new(Vec::new()),
            }
        }
    }

    impl SwapCallee<TestPair> for Repayer {
        fn on_swap(
            &self,
            pair: &TestPair,
            initiator: &Address,
            _amount0_out: Amount,
            _amount1_out: Amount,
            data: &[u8],
        ) -> Result<(), PairError> {
            self.calls.set(self.calls.get() + 1);
            assert!(pair.is_locked());
            assert_eq!(*initiator, ALICE);
            assert_eq!(data, b"flash");

            let mut attempts = self.reentry.borrow_mut();
            attempts.push(pair.sync());
            attempts.push(pair.skim(&self.payer));
            attempts.push(pair.mint(&self.payer, &self.payer).map(|_| ()));
            attempts.push(pair.burn(&self.payer, &self.payer).map(|_| ()));
            attempts.push(pair.swap(initiator, Amount::ZERO, amount(1), &self.payer, None));
            attempts.push(pair.bind(&REGISTRY, TOKEN0, TOKEN1));

            self.assets
                .transfer(&self.asset, &self.payer, &pair.address(), amount(self.repay))
        }
    }

    #[test]
    fn reentrant_calls_fail_and_outer_swap_completes() {
        let h = seeded();
        h.fund(TOKEN0, BOB, E18);
        let callee = Repayer::new(&h, TOKEN0, E18);

        let result = h.pair.swap(
            &ALICE,
            Amount::ZERO,
            amount(SWAP_OUT),
            &BOB,
            Some(FlashSwap::new(&callee, b"flash")),
        );
        assert_eq!(result, Ok(()));
        assert_eq!(callee.calls.get(), 1);
        assert_eq!(
            *callee.reentry.borrow(),
            vec![Err(PairError::Reentrant); 6]
        );
        assert!(!h.pair.is_locked());
        assert_eq!(h.reserves(), (6 * E18, 10 * E18 - SWAP_OUT));
        assert_eq!(h.balance(TOKEN1, BOB), SWAP_OUT);
        assert!(h.pair.sync().is_ok());
    }

    #[test]
    fn flash_loan_repaid_in_borrowed_asset() {
        // Borrow 1e18 of asset1 and repay in asset1: needs ceil(1e22 / 9 970).
        const REPAY: u128 = 1_003_009_027_081_243_732;

        let h = seeded();
        h.fund(TOKEN1, BOB, REPAY);
        let callee = Repayer::new(&h, TOKEN1, REPAY);
        assert!(h
            .pair
            .swap(&ALICE, Amount::ZERO, amount(E18), &BOB, Some(FlashSwap::new(&callee, b"flash")))
            .is_ok());
        assert_eq!(h.reserves(), (5 * E18, 9 * E18 + REPAY));

        let short = seeded();
        short.fund(TOKEN1, BOB, REPAY);
        let callee = Repayer::new(&short, TOKEN1, REPAY - 1);
        assert_eq!(
            short.pair.swap(
                &ALICE,
                Amount::ZERO,
                amount(E18),
                &BOB,
                Some(FlashSwap::new(&callee, b"flash"))
            ),
            Err(PairError::InvariantViolation)
        );
        assert_eq!(short.reserves(), (5 * E18, 10 * E18));
    }

    #[test]
    fn empty_payload_skips_callback() {
        let h = seeded();
        h.send(TOKEN0, E18);
        let callee = Repayer::new(&h, TOKEN0, 0);
        assert!(h
            .pair
            .swap(&ALICE, Amount::ZERO, amount(SWAP_OUT), &BOB, Some(FlashSwap::new(&callee, b"")))
            .is_ok());
        assert_eq!(callee.calls.get(), 0);
    }

    #[test]
    fn callback_error_aborts_swap() {
        let h = seeded();
        // BOB holds nothing, so the repayment transfer fails.
        let callee = Repayer::new(&h, TOKEN0, E18);
        assert_eq!(
            h.pair.swap(
                &ALICE,
                Amount::ZERO,
                amount(SWAP_OUT),
                &BOB,
                Some(FlashSwap::new(&callee, b"flash"))
            ),
            Err(PairError::InsufficientBalance)
        );
        assert!(!h.pair.is_locked());
        assert_eq!(h.reserves(), (5 * E18, 10 * E18));
    }

    // -- skim / sync --------------------------------------------------------

    #[test]
    fn skim_sends_excess_only() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        h.send(TOKEN0, 500);
        h.send(TOKEN1, 7);
        let _ = h.pair.take_events();

        assert!(h.pair.skim(&BOB).is_ok());
        assert_eq!(h.balance(TOKEN0, BOB), 500);
        assert_eq!(h.balance(TOKEN1, BOB), 7);
        assert_eq!(h.reserves(), (10_000, 40_000));
        assert_eq!(h.balance(TOKEN0, PAIR), 10_000);
        assert!(h.pair.events().is_empty());

        assert!(h.pair.skim(&BOB).is_ok());
        assert_eq!(h.balance(TOKEN0, BOB), 500);
    }

    #[test]
    fn skim_detects_balance_below_reserve() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        let Ok(()) = h.assets.transfer(&TOKEN1, &PAIR, &BOB, amount(1)) else {
            panic!("transfer");
        };
        assert!(matches!(h.pair.skim(&BOB), Err(PairError::Underflow(_))));
    }

    #[test]
    fn sync_adopts_balances_and_is_idempotent() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        h.send(TOKEN0, 1_234);
        assert!(h.pair.sync().is_ok());
        assert_eq!(h.reserves(), (11_234, 40_000));
        let first = h.pair.get_reserves();

        assert!(h.pair.sync().is_ok());
        assert_eq!(h.pair.get_reserves(), first);
        assert_eq!(
            h.pair.events().last(),
            Some(&PairEvent::Sync {
                reserve0: reserve(11_234),
                reserve1: reserve(40_000),
            })
        );
    }

    #[test]
    fn sync_rejects_balance_beyond_reserve_range() {
        let h = Harness::new();
        h.send(TOKEN0, Reserve::MAX.get());
        h.send(TOKEN1, 1);
        assert!(h.pair.sync().is_ok());
        h.send(TOKEN0, 1);
        assert_eq!(h.pair.sync(), Err(PairError::ReserveOverflow));
        assert_eq!(h.reserves(), (Reserve::MAX.get(), 1));
    }

    // -- price accumulators -------------------------------------------------

    #[test]
    fn accumulators_integrate_prior_price() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        assert_eq!(h.pair.price0_cumulative_last(), U256::ZERO);

        h.clock.advance(10);
        assert!(h.pair.sync().is_ok());
        let q112 = Uq112x112::Q112;
        assert_eq!(
            h.pair.price0_cumulative_last(),
            q112 * U256::from(4u8) * U256::from(10u8)
        );
        assert_eq!(
            h.pair.price1_cumulative_last(),
            (q112 >> 2usize) * U256::from(10u8)
        );

        // No time has passed: nothing accrues.
        let before = h.pair.price0_cumulative_last();
        assert!(h.pair.sync().is_ok());
        assert_eq!(h.pair.price0_cumulative_last(), before);
    }

    #[test]
    fn accumulators_survive_timestamp_wraparound() {
        let h = Harness::new();
        h.clock.set((1u64 << 32) - 5);
        h.provide(10_000, 40_000, ALICE);
        h.clock.set((1u64 << 32) + 5);
        assert!(h.pair.sync().is_ok());
        assert_eq!(h.pair.get_reserves().block_timestamp_last.get(), 5);
        assert_eq!(
            h.pair.price0_cumulative_last(),
            Uq112x112::Q112 * U256::from(40u8)
        );
    }

    // -- protocol fee -------------------------------------------------------

    #[test]
    fn protocol_fee_off_mints_nothing() {
        let h = Harness::new();
        h.provide(1_000 * E18, 1_000 * E18, ALICE);
        h.send(TOKEN1, E18);
        assert!(h
            .pair
            .swap(&ALICE, amount(996_006_981_039_903_216), Amount::ZERO, &ALICE, None)
            .is_ok());
        h.return_shares(ALICE, 1_000 * E18 - 1_000);
        assert!(h.pair.burn(&ALICE, &ALICE).is_ok());
        assert_eq!(h.shares.total_supply(), Liquidity::new(1_000));
        assert_eq!(h.pair.k_last(), U256::ZERO);
    }

    #[test]
    fn protocol_fee_on_mints_sixth_of_growth() {
        let h = Harness::new();
        h.fee_on();
        h.provide(1_000 * E18, 1_000 * E18, ALICE);
        assert_eq!(
            h.pair.k_last(),
            U256::from(1_000 * E18) * U256::from(1_000 * E18)
        );

        h.send(TOKEN1, E18);
        assert!(h
            .pair
            .swap(&ALICE, amount(996_006_981_039_903_216), Amount::ZERO, &ALICE, None)
            .is_ok());
        h.return_shares(ALICE, 1_000 * E18 - 1_000);
        assert!(h.pair.burn(&ALICE, &ALICE).is_ok());

        assert_eq!(h.shares.balance_of(&FEE_TO), Liquidity::new(249_750_499_251_388));
        assert_eq!(
            h.shares.total_supply(),
            Liquidity::new(1_000 + 249_750_499_251_388)
        );
        assert_eq!(h.balance(TOKEN0, PAIR), 1_000 + 249_501_683_697_445);
        assert_eq!(h.balance(TOKEN1, PAIR), 1_000 + 250_000_187_312_969);
        let (reserve0, reserve1) = h.reserves();
        assert_eq!(reserve0, 1_000 + 249_501_683_697_445);
        assert_eq!(h.pair.k_last(), U256::from(reserve0) * U256::from(reserve1));
    }

    #[test]
    fn protocol_fee_skipped_without_growth() {
        let h = Harness::new();
        h.fee_on();
        h.provide(10_000, 40_000, ALICE);
        assert_eq!(h.pair.k_last(), U256::from(10_000u64 * 40_000u64));

        h.provide(1_000, 4_000, BOB);
        assert_eq!(h.shares.balance_of(&FEE_TO), Liquidity::ZERO);
        assert_eq!(h.pair.k_last(), U256::from(11_000u64 * 44_000u64));
    }

    #[test]
    fn protocol_fee_rounding_to_zero_mints_nothing() {
        let h = Harness::new();
        h.fee_on();
        h.provide(10_000, 40_000, ALICE);
        // √k moves from 20 000 to 20 001: 20 000 × 1 / 120 005 floors to zero.
        h.send(TOKEN0, 2);
        assert_eq!(h.pair.sync(), Ok(()));

        h.provide(1_000, 4_000, BOB);
        assert_eq!(h.shares.balance_of(&FEE_TO), Liquidity::ZERO);
        assert_eq!(h.pair.k_last(), U256::from(11_002u64 * 44_000u64));
    }

    #[test]
    fn switching_fee_off_clears_k_last() {
        let h = Harness::new();
        h.fee_on();
        h.provide(10_000, 40_000, ALICE);
        assert!(!h.pair.k_last().is_zero());

        let Ok(()) = h.fees.set_fee_to(&SETTER, None) else {
            panic!("setter toggles fee");
        };
        h.provide(1_000, 4_000, BOB);
        assert!(h.pair.k_last().is_zero());
    }

    #[test]
    fn protocol_share_is_configurable() {
        let Ok(config) = PairConfig::new(FeeTier::default(), 2, PairConfig::DEFAULT_MINIMUM_LIQUIDITY)
        else {
            panic!("valid config");
        };
        let sixth = Harness::new();
        let half = Harness::with_config(config);
        for h in [&sixth, &half] {
            h.fee_on();
            h.provide(1_000 * E18, 1_000 * E18, ALICE);
            h.send(TOKEN1, E18);
            assert!(h
                .pair
                .swap(&ALICE, amount(996_006_981_039_903_216), Amount::ZERO, &ALICE, None)
                .is_ok());
            h.return_shares(ALICE, E18);
            assert!(h.pair.burn(&ALICE, &ALICE).is_ok());
        }
        let sixth_cut = sixth.shares.balance_of(&FEE_TO).get();
        let half_cut = half.shares.balance_of(&FEE_TO).get();
        assert!(half_cut > 2 * sixth_cut, "{half_cut} vs {sixth_cut}");
    }

    // -- failure atomicity --------------------------------------------------

    #[test]
    fn failed_mint_rolls_back_collaborators_atomically() {
        let h = Harness::new();
        h.send(TOKEN0, 1u128 << 112);
        h.send(TOKEN1, 1u128 << 20);
        let checkpoints: [&dyn Checkpoint; 2] = [&*h.assets, &*h.shares];
        let result = atomically(&checkpoints, || h.pair.mint(&ALICE, &ALICE));
        assert_eq!(result, Err(PairError::ReserveOverflow));
        assert_eq!(h.shares.total_supply(), Liquidity::ZERO);
        assert_eq!(h.reserves(), (0, 0));
        assert!(h.pair.events().is_empty());
    }

    #[test]
    fn pair_checkpoint_discards_committed_operations() {
        let h = seeded();
        let before = h.pair.get_reserves();
        let events = h.pair.events().len();
        let checkpoints: [&dyn Checkpoint; 3] = [&*h.assets, &*h.shares, &h.pair];
        let result = atomically(&checkpoints, || {
            h.assets.deposit(&TOKEN0, &PAIR, amount(E18))?;
            h.pair.sync()?;
            Err::<(), _>(PairError::Unauthorized)
        });
        assert_eq!(result, Err(PairError::Unauthorized));
        assert_eq!(h.pair.get_reserves(), before);
        assert_eq!(h.pair.events().len(), events);
        assert_eq!(h.balance(TOKEN0, PAIR), 5 * E18);
    }

    #[test]
    fn pair_checkpoint_commit_keeps_state() {
        let h = seeded();
        h.send(TOKEN0, E18);
        let checkpoints: [&dyn Checkpoint; 1] = [&h.pair];
        assert_eq!(atomically(&checkpoints, || h.pair.sync()), Ok(()));
        assert_eq!(h.reserves(), (6 * E18, 10 * E18));
    }

    #[test]
    fn take_events_drains_log() {
        let h = Harness::new();
        h.provide(10_000, 40_000, ALICE);
        assert_eq!(h.pair.take_events().len(), 2);
        assert!(h.pair.events().is_empty());
    }
}
