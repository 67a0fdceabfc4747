//! Perpetual Engine Pallet
//!
//! Autonomous cycle that turns collected transfer tax and endowment releases into burns,
//! protocol-owned liquidity and reward pool refills. Anyone can trigger a cycle once the
//! cooldown has passed and is paid a small fee out of the newly collected tax.
//!
//! ## Cycle
//! 1. Pull pending tax, any due endowment release and the LP position reward (failures are
//!    reported, not fatal).
//! 2. Skip when the engine holds less than the processing threshold.
//! 3. Stamp the cooldown before burning or calling the router.
//! 4. Split the balance into caller fee, burn, liquidity and reward shares.
//! 5. Burn, run the swap and liquidity ladder, refill each pool independently.
//! 6. Pay the caller and emit one summary event.
//!
//! Only hard preconditions (cooldown, re-entrancy, origin) fail the call. Everything that
//! depends on an external component degrades to an event and leaves funds on the engine
//! account, where the next cycle picks them up.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod split;
pub mod strategy;
pub mod types;
pub mod weights;

pub use types::*;
pub use weights::WeightInfo;

const LOG_TARGET: &str = "runtime::perpetual-engine";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn ensure_funded(who: &AccountId, amount: Balance) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::*;
  use crate::split::{SplitShares, cycle_split};
  use frame::deps::{
    frame_support::{
      storage::with_storage_layer,
      traits::{
        UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        fungibles::Inspect as FungiblesInspect,
        tokens::{Fortitude, Precision, Preservation},
      },
    },
    sp_runtime::{
      DispatchError, Permill,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{
    EndowmentSource, OnEndowmentRelease, PermanentStake, ReentrancyGuard, RewardNotifier,
    TaxSource,
  };

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Native token: the engine's inventory and the reward asset
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Local assets, used to read the stable side held by the engine
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = Balance>;

    /// AMM used for conversion and liquidity provision
    type Router: LiquidityRouter<Self::AccountId, Balance>;

    /// Where transfer tax accumulates between cycles
    type TaxSource: TaxSource<Self::AccountId, Balance>;

    /// Decaying reserve pulled once per due period
    type Endowment: EndowmentSource<Balance>;

    /// Pool staking LP shares; also holds the engine's permanent LP position
    type LpPool: RewardNotifier<Self::AccountId, Balance> + PermanentStake<Self::AccountId, Balance>;

    /// Pool staking the native token
    type TokenPool: RewardNotifier<Self::AccountId, Balance>;

    /// Pool staking membership NFTs
    type NftPool: RewardNotifier<Self::AccountId, Balance>;

    /// Wall clock, sampled once per call
    type TimeProvider: UnixTime;

    /// Pallet ID; its account is the engine's inventory
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Asset the native token is paired against
    #[pallet::constant]
    type StableAsset: Get<AssetKind>;

    /// Caller fee as a share of newly collected tax
    #[pallet::constant]
    type CallerReward: Get<Permill>;

    #[pallet::constant]
    type BurnShare: Get<Permill>;

    #[pallet::constant]
    type LiquidityShare: Get<Permill>;

    #[pallet::constant]
    type RewardShare: Get<Permill>;

    /// Split of the reward share between LP, token and NFT pools
    #[pallet::constant]
    type LpPoolShare: Get<Permill>;

    #[pallet::constant]
    type TokenPoolShare: Get<Permill>;

    #[pallet::constant]
    type NftPoolShare: Get<Permill>;

    /// Default seconds between processed cycles
    #[pallet::constant]
    type DefaultCooldown: Get<u64>;

    /// Default balance below which a cycle is skipped
    #[pallet::constant]
    type DefaultMinToProcess: Get<Balance>;

    /// Default slippage tolerance for swap quotes
    #[pallet::constant]
    type DefaultSlippageTolerance: Get<Permill>;

    /// Bound on swap rounds per cycle
    #[pallet::constant]
    type MaxSwapAttempts: Get<u32>;

    /// Liquidity allocations below this are not swapped
    #[pallet::constant]
    type DustThreshold: Get<Balance>;

    /// Origin that can perform governance operations
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  /// AMM capabilities the engine relies on.
  ///
  /// Mirrors a router with spending approvals: the engine approves exactly what a call may
  /// pull and revokes the approval afterwards, whatever the outcome.
  pub trait LiquidityRouter<AccountId, Balance> {
    /// Expected output for `amount_in`, or `None` when there is no route
    fn quote(asset_in: AssetKind, asset_out: AssetKind, amount_in: Balance) -> Option<Balance>;

    fn swap_exact_tokens_for_tokens(
      who: &AccountId,
      asset_in: AssetKind,
      asset_out: AssetKind,
      amount_in: Balance,
      amount_out_min: Balance,
    ) -> Result<Balance, DispatchError>;

    /// Returns (used1, used2, lp_minted); LP shares are minted to `who`
    fn add_liquidity(
      who: &AccountId,
      asset1: AssetKind,
      asset2: AssetKind,
      amount1_desired: Balance,
      amount2_desired: Balance,
      amount1_min: Balance,
      amount2_min: Balance,
    ) -> Result<(Balance, Balance, Balance), DispatchError>;

    /// Allow the router to pull up to `amount` of `asset` from `owner`
    fn approve(owner: &AccountId, asset: AssetKind, amount: Balance) -> DispatchResult;

    fn allowance(owner: &AccountId, asset: AssetKind) -> Balance;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Time the last processed (not skipped) cycle started
  #[pallet::storage]
  #[pallet::getter(fn last_process_time)]
  pub type LastProcessTime<T: Config> = StorageValue<_, u64, ValueQuery>;

  /// Seconds between processed cycles (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn cooldown)]
  pub type CooldownPeriod<T: Config> = StorageValue<_, u64, ValueQuery, T::DefaultCooldown>;

  /// Minimum engine balance for a cycle to process (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn min_to_process)]
  pub type MinToProcess<T: Config> = StorageValue<_, Balance, ValueQuery, T::DefaultMinToProcess>;

  /// Slippage tolerance applied to swap quotes (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn slippage_tolerance)]
  pub type SlippageTolerance<T: Config> =
    StorageValue<_, Permill, ValueQuery, T::DefaultSlippageTolerance>;

  /// Set for the whole duration of a cycle
  #[pallet::storage]
  pub type ProcessingLock<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Set for the duration of a single swap round
  #[pallet::storage]
  pub type SwapLock<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Once set, every governance call fails
  #[pallet::storage]
  #[pallet::getter(fn admin_renounced)]
  pub type AdminRenounced<T: Config> = StorageValue<_, bool, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn stats)]
  pub type Stats<T: Config> = StorageValue<_, EngineStats, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Balance below threshold; nothing was processed and the cooldown was not stamped
    CycleSkipped { available: Balance, threshold: Balance },
    /// Summary of a processed cycle
    CycleProcessed {
      caller: T::AccountId,
      collected_tax: Balance,
      endowment_received: Balance,
      lp_rewards_claimed: Balance,
      available: Balance,
      caller_reward: Balance,
      burned: Balance,
      liquidity_allocated: Balance,
      swapped_in: Balance,
      stable_received: Balance,
      lp_minted: Balance,
      rewards_distributed: Balance,
      dust: Balance,
    },
    TaxCollectionFailed { error: DispatchError },
    EndowmentPullFailed { error: DispatchError },
    /// Reward of the engine's permanent LP position paid to the engine
    LpRewardsClaimed { amount: Balance },
    /// LP position reward left in the pool for a later cycle
    LpRewardClaimFailed { error: DispatchError },
    /// Endowment reported a completed transfer to the engine
    EndowmentReceived { amount: Balance },
    /// Burn share retained on the engine
    BurnFailed { amount: Balance, error: DispatchError },
    SwapExecuted {
      round: u32,
      amount_in: Balance,
      amount_out: Balance,
    },
    SwapFailed {
      round: u32,
      amount_in: Balance,
      error: DispatchError,
    },
    LiquidityAttemptFailed {
      strategy: StrategyKind,
      error: DispatchError,
    },
    LiquidityAdded {
      strategy: StrategyKind,
      native_used: Balance,
      stable_used: Balance,
      lp_minted: Balance,
    },
    /// Liquidity share (or part of it) carried to the next cycle
    LiquidityUnutilized {
      reason: UnutilizedReason,
      native_held: Balance,
      stable_held: Balance,
    },
    /// Minted LP shares stayed on the engine account
    LpStakeFailed { amount: Balance, error: DispatchError },
    PoolRefilled { pool: PoolTarget, amount: Balance },
    PoolRefillFailed {
      pool: PoolTarget,
      amount: Balance,
      error: DispatchError,
    },
    CallerRewardUnpaid { amount: Balance, error: DispatchError },
    CooldownUpdated { old_cooldown: u64, new_cooldown: u64 },
    MinToProcessUpdated { old_amount: Balance, new_amount: Balance },
    SlippageToleranceUpdated {
      old_tolerance: Permill,
      new_tolerance: Permill,
    },
    AdminRenounced,
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The previous cycle was processed less than a cooldown ago
    CooldownActive,
    /// A cycle or swap is already in flight
    Reentrancy,
    /// Governance has been renounced
    AdminRenounced,
    /// Slippage tolerance must be below 100%
    InvalidSlippage,
    /// Processing threshold must be non-zero
    ZeroThreshold,
    /// The router returned no usable quote
    QuoteUnavailable,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Run one cycle. Callable by anyone once the cooldown has passed.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::run_cycle())]
    pub fn run_cycle(origin: OriginFor<T>) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      let _guard =
        ReentrancyGuard::<ProcessingLock<T>>::acquire().ok_or(Error::<T>::Reentrancy)?;
      let now = Self::now();
      ensure!(now >= Self::next_cycle_at(), Error::<T>::CooldownActive);
      Self::do_cycle(&caller, now);
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_cooldown())]
    pub fn set_cooldown(origin: OriginFor<T>, new_cooldown: u64) -> DispatchResult {
      Self::ensure_admin(origin)?;
      let old_cooldown = CooldownPeriod::<T>::get();
      CooldownPeriod::<T>::put(new_cooldown);
      Self::deposit_event(Event::CooldownUpdated {
        old_cooldown,
        new_cooldown,
      });
      Ok(())
    }

    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_min_to_process())]
    pub fn set_min_to_process(origin: OriginFor<T>, new_amount: Balance) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(!new_amount.is_zero(), Error::<T>::ZeroThreshold);
      let old_amount = MinToProcess::<T>::get();
      MinToProcess::<T>::put(new_amount);
      Self::deposit_event(Event::MinToProcessUpdated {
        old_amount,
        new_amount,
      });
      Ok(())
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_slippage_tolerance())]
    pub fn set_slippage_tolerance(
      origin: OriginFor<T>,
      new_tolerance: Permill,
    ) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(new_tolerance < Permill::one(), Error::<T>::InvalidSlippage);
      let old_tolerance = SlippageTolerance::<T>::get();
      SlippageTolerance::<T>::put(new_tolerance);
      Self::deposit_event(Event::SlippageToleranceUpdated {
        old_tolerance,
        new_tolerance,
      });
      Ok(())
    }

    /// Give up governance for good.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::renounce_admin())]
    pub fn renounce_admin(origin: OriginFor<T>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      AdminRenounced::<T>::put(true);
      Self::deposit_event(Event::AdminRenounced);
      Ok(())
    }
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn integrity_test() {
      let cycle = T::BurnShare::get().deconstruct()
        + T::LiquidityShare::get().deconstruct()
        + T::RewardShare::get().deconstruct();
      assert!(cycle <= 1_000_000, "cycle shares exceed 100%");
      let pools = T::LpPoolShare::get().deconstruct()
        + T::TokenPoolShare::get().deconstruct()
        + T::NftPoolShare::get().deconstruct();
      assert!(pools <= 1_000_000, "pool shares exceed 100%");
      assert!(T::MaxSwapAttempts::get() > 0, "at least one swap round");
      assert!(
        T::StableAsset::get().is_stable(),
        "paired asset must be a local stablecoin"
      );
      assert!(
        !T::DefaultMinToProcess::get().is_zero(),
        "processing threshold must be non-zero"
      );
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    fn now() -> u64 {
      T::TimeProvider::now().as_secs()
    }

    fn ensure_admin(origin: OriginFor<T>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(!AdminRenounced::<T>::get(), Error::<T>::AdminRenounced);
      Ok(())
    }

    pub fn native_balance() -> Balance {
      T::Currency::balance(&Self::account_id())
    }

    pub fn asset_balance(asset: AssetKind) -> Balance {
      match asset.asset_id() {
        Some(id) => T::Assets::balance(id, &Self::account_id()),
        None => Self::native_balance(),
      }
    }

    /// Earliest time the next cycle may process.
    pub fn next_cycle_at() -> u64 {
      let last = LastProcessTime::<T>::get();
      if last.is_zero() {
        return 0;
      }
      last.saturating_add(CooldownPeriod::<T>::get())
    }

    pub fn engine_status() -> EngineStatus {
      let now = Self::now();
      let native_balance = Self::native_balance();
      let min_to_process = MinToProcess::<T>::get();
      let next_cycle_at = Self::next_cycle_at();
      EngineStatus {
        native_balance,
        stable_balance: Self::asset_balance(T::StableAsset::get()),
        last_process_time: LastProcessTime::<T>::get(),
        next_cycle_at,
        cooldown: CooldownPeriod::<T>::get(),
        min_to_process,
        slippage_tolerance: SlippageTolerance::<T>::get(),
        ready: now >= next_cycle_at && native_balance >= min_to_process,
        admin_renounced: AdminRenounced::<T>::get(),
        stats: Stats::<T>::get(),
      }
    }

    fn do_cycle(caller: &T::AccountId, now: u64) {
      let engine = Self::account_id();

      let collected_tax = match with_storage_layer(|| T::TaxSource::collect_tax(&engine)) {
        Ok(amount) => amount,
        Err(error) => {
          log::warn!(target: LOG_TARGET, "tax collection failed: {error:?}");
          Self::deposit_event(Event::TaxCollectionFailed { error });
          0
        }
      };
      let endowment_received = if T::Endowment::is_release_due() {
        match T::Endowment::release_funds() {
          Ok(amount) => amount,
          Err(error) => {
            log::warn!(target: LOG_TARGET, "endowment pull failed: {error:?}");
            Self::deposit_event(Event::EndowmentPullFailed { error });
            0
          }
        }
      } else {
        0
      };
      let lp_rewards_claimed = Self::claim_lp_rewards(&engine);

      let available = Self::native_balance();
      let threshold = MinToProcess::<T>::get();
      if available < threshold {
        Self::deposit_event(Event::CycleSkipped {
          available,
          threshold,
        });
        return;
      }
      LastProcessTime::<T>::put(now);

      let split = cycle_split(
        available,
        collected_tax,
        SplitShares {
          caller: T::CallerReward::get(),
          burn: T::BurnShare::get(),
          liquidity: T::LiquidityShare::get(),
          rewards: T::RewardShare::get(),
        },
      );
      let burned = Self::burn(split.burn);
      let outcome =
        Self::run_liquidity_strategy(split.liquidity, split.rewards + split.caller_reward);
      let rewards_distributed = Self::refill_pools(split.rewards);
      let caller_reward = Self::pay_caller(caller, split.caller_reward);

      Stats::<T>::mutate(|stats| {
        stats.cycles_processed = stats.cycles_processed.saturating_add(1);
        stats.total_burned = stats.total_burned.saturating_add(burned);
        stats.total_lp_minted = stats.total_lp_minted.saturating_add(outcome.lp_minted);
        stats.total_rewards_distributed = stats
          .total_rewards_distributed
          .saturating_add(rewards_distributed);
        stats.total_caller_rewards = stats.total_caller_rewards.saturating_add(caller_reward);
      });
      Self::deposit_event(Event::CycleProcessed {
        caller: caller.clone(),
        collected_tax,
        endowment_received,
        lp_rewards_claimed,
        available,
        caller_reward,
        burned,
        liquidity_allocated: split.liquidity,
        swapped_in: outcome.swapped_in,
        stable_received: outcome.stable_received,
        lp_minted: outcome.lp_minted,
        rewards_distributed,
        dust: split.dust,
      });
    }

    /// Pull what the permanent LP position has earned. Counted as inflow, not tax, so no
    /// caller fee is taken from it.
    fn claim_lp_rewards(engine: &T::AccountId) -> Balance {
      match T::LpPool::claim_permanent(engine) {
        Ok(amount) => {
          if !amount.is_zero() {
            Stats::<T>::mutate(|stats| {
              stats.total_lp_rewards_claimed = stats.total_lp_rewards_claimed.saturating_add(amount)
            });
            Self::deposit_event(Event::LpRewardsClaimed { amount });
          }
          amount
        }
        Err(error) => {
          log::warn!(target: LOG_TARGET, "claiming LP position reward failed: {error:?}");
          Self::deposit_event(Event::LpRewardClaimFailed { error });
          0
        }
      }
    }

    fn burn(amount: Balance) -> Balance {
      if amount.is_zero() {
        return 0;
      }
      let result = with_storage_layer(|| {
        T::Currency::burn_from(
          &Self::account_id(),
          amount,
          Preservation::Expendable,
          Precision::Exact,
          Fortitude::Polite,
        )
      });
      match result {
        Ok(burned) => burned,
        Err(error) => {
          log::warn!(target: LOG_TARGET, "burn of {amount} failed: {error:?}");
          Self::deposit_event(Event::BurnFailed { amount, error });
          0
        }
      }
    }

    /// Refill every pool with its share of `total`. A failing pool keeps its share on the
    /// engine and does not affect the others.
    fn refill_pools(total: Balance) -> Balance {
      let refills = [
        (PoolTarget::Lp, T::LpPoolShare::get()),
        (PoolTarget::Token, T::TokenPoolShare::get()),
        (PoolTarget::Nft, T::NftPoolShare::get()),
      ];
      let mut distributed: Balance = 0;
      for (pool, share) in refills {
        let amount = share.mul_floor(total);
        if amount.is_zero() {
          continue;
        }
        let result = match pool {
          PoolTarget::Lp => Self::refill::<T::LpPool>(amount),
          PoolTarget::Token => Self::refill::<T::TokenPool>(amount),
          PoolTarget::Nft => Self::refill::<T::NftPool>(amount),
        };
        match result {
          Ok(()) => {
            distributed = distributed.saturating_add(amount);
            Self::deposit_event(Event::PoolRefilled { pool, amount });
          }
          Err(error) => {
            log::warn!(
              target: LOG_TARGET,
              "refill of {pool:?} pool with {amount} failed: {error:?}"
            );
            Self::deposit_event(Event::PoolRefillFailed {
              pool,
              amount,
              error,
            });
          }
        }
      }
      distributed
    }

    fn refill<P: RewardNotifier<T::AccountId, Balance>>(amount: Balance) -> DispatchResult {
      with_storage_layer(|| {
        T::Currency::transfer(
          &Self::account_id(),
          &P::reward_account(),
          amount,
          Preservation::Expendable,
        )?;
        P::notify_reward(amount)
      })
    }

    fn pay_caller(caller: &T::AccountId, amount: Balance) -> Balance {
      if amount.is_zero() {
        return 0;
      }
      let result = with_storage_layer(|| {
        T::Currency::transfer(
          &Self::account_id(),
          caller,
          amount,
          Preservation::Expendable,
        )
      });
      match result {
        Ok(_) => amount,
        Err(error) => {
          log::warn!(target: LOG_TARGET, "caller reward of {amount} unpaid: {error:?}");
          Self::deposit_event(Event::CallerRewardUnpaid { amount, error });
          0
        }
      }
    }
  }

  impl<T: Config> OnEndowmentRelease<Balance> for Pallet<T> {
    fn on_endowment_release(amount: Balance) -> DispatchResult {
      Stats::<T>::mutate(|stats| {
        stats.total_endowment_received = stats.total_endowment_received.saturating_add(amount);
      });
      Self::deposit_event(Event::EndowmentReceived { amount });
      Ok(())
    }
  }

  /// Genesis configuration: keeps the pallet account alive without an existential deposit
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
