//! Reward Pool Pallet
//!
//! Continuous reward-per-share staking. Rewards are emitted at a constant rate over a
//! rolling period and tracked as a single growing per-weighted-unit accumulator, so no
//! operation ever iterates over stakers.
//!
//! The pallet is instanceable. A runtime deploys one instance per pool variant:
//! - a fungible pool staking LP shares (the engine holds a permanent position here),
//! - a fungible pool staking the native token,
//! - a non-fungible pool staking membership NFTs at a fixed weight per item.
//!
//! Rewards are always paid in the native token and are refilled by the engine through
//! [`primitives::RewardNotifier`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod ledger;
pub mod types;
pub mod weights;

pub use types::*;
pub use weights::WeightInfo;

const LOG_TARGET: &str = "runtime::reward-pool";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn ensure_funded(
    who: &AccountId,
    asset: primitives::AssetKind,
    amount: Balance,
  ) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::*;
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::{
      storage::with_storage_layer,
      traits::{
        UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
        tokens::Preservation,
      },
    },
    sp_runtime::{
      ArithmeticError, DispatchError,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{NftCustody, PermanentStake, ReentrancyGuard, RewardNotifier};

  #[pallet::config]
  pub trait Config<I: 'static = ()>:
    frame_system::Config<RuntimeEvent: From<Event<Self, I>>>
  {
    /// Native token: the reward asset, and the stake asset of the token pool
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Local assets, used when the stake asset is an LP share
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = Balance>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = Balance>;

    /// NFT custody for the non-fungible pool variant
    type Nfts: NftCustody<Self::AccountId>;

    /// Wall clock, sampled once per call
    type TimeProvider: UnixTime;

    /// Pallet ID of this instance; its account holds stake and rewards
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// What this instance takes as stake
    #[pallet::constant]
    type StakeKind: Get<PoolKind>;

    /// The only account allowed to refill rewards and to hold the eternal position
    type EngineAccount: Get<Self::AccountId>;

    /// Emission period applied by each refill until changed by governance
    #[pallet::constant]
    type DefaultRewardsDuration: Get<u64>;

    /// Weighted supply contributed by one staked NFT
    #[pallet::constant]
    type NftWeight: Get<Balance>;

    /// Maximum NFTs one account may have staked
    #[pallet::constant]
    type MaxNftsPerAccount: Get<u32>;

    /// Origin that can perform governance operations
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T, I = ()>(PhantomData<(T, I)>);

  /// Global accounting of the pool
  #[pallet::storage]
  #[pallet::getter(fn pool_state)]
  pub type Pool<T: Config<I>, I: 'static = ()> = StorageValue<_, PoolState, ValueQuery>;

  /// Current emission period length in seconds (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn rewards_duration)]
  pub type RewardsDuration<T: Config<I>, I: 'static = ()> =
    StorageValue<_, u64, ValueQuery, T::DefaultRewardsDuration>;

  /// Stake positions by account
  #[pallet::storage]
  #[pallet::getter(fn position)]
  pub type Positions<T: Config<I>, I: 'static = ()> =
    StorageMap<_, Blake2_128Concat, T::AccountId, StakePosition, OptionQuery>;

  /// Reward bookkeeping by account
  #[pallet::storage]
  #[pallet::getter(fn account_rewards)]
  pub type Rewards<T: Config<I>, I: 'static = ()> =
    StorageMap<_, Blake2_128Concat, T::AccountId, AccountRewards, ValueQuery>;

  /// NFT items staked by account (non-fungible pool only)
  #[pallet::storage]
  #[pallet::getter(fn staked_nfts)]
  pub type StakedNfts<T: Config<I>, I: 'static = ()> = StorageMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    BoundedVec<u32, T::MaxNftsPerAccount>,
    ValueQuery,
  >;

  /// Set while a call that moves tokens is in flight
  #[pallet::storage]
  pub type PoolLock<T: Config<I>, I: 'static = ()> = StorageValue<_, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config<I>, I: 'static = ()> {
    /// Fungible stake added
    Staked {
      who: T::AccountId,
      amount: Balance,
      tier: StakeTier,
      weighted: Balance,
    },
    /// Fungible stake withdrawn
    Withdrawn { who: T::AccountId, amount: Balance },
    /// NFTs moved into the pool
    NftsStaked { who: T::AccountId, count: u32 },
    /// NFTs returned to their owner
    NftsWithdrawn { who: T::AccountId, count: u32 },
    /// Accrued reward paid out
    RewardPaid { who: T::AccountId, amount: Balance },
    /// A refill started a new emission period
    RewardAdded {
      amount: Balance,
      reward_rate: Balance,
      period_finish: u64,
    },
    /// Emission period length updated
    RewardsDurationUpdated { old_duration: u64, new_duration: u64 },
  }

  #[pallet::error]
  pub enum Error<T, I = ()> {
    /// Amount (or item list) is empty
    ZeroAmount,
    /// Withdrawal exceeds the staked principal, or there is no position
    InsufficientStake,
    /// The position's lock has not expired yet
    PositionLocked,
    /// A position's tier can only stay the same or move up
    TierDowngrade,
    /// The eternal tier is reserved for the engine
    EternalTierReserved,
    /// The engine may only stake with the eternal tier
    EngineTierRequired,
    /// The engine's position can never be withdrawn
    EnginePositionPermanent,
    /// A non-zero refill would emit nothing per second
    RewardRateZero,
    /// The pool does not hold enough reward to sustain the new rate
    RewardTooHigh,
    /// Caller is not the engine account
    NotEngine,
    /// Duration can only be changed once the current period has finished
    RewardPeriodActive,
    /// Duration must be non-zero
    ZeroDuration,
    /// Call does not apply to this pool's stake kind
    WrongPoolKind,
    /// Caller does not own the NFT
    NftNotOwned,
    /// NFT is not staked by the caller
    NftNotStaked,
    /// Account would exceed the staked NFT limit
    TooManyNfts,
    /// A token-moving call is already in flight
    Reentrancy,
  }

  #[pallet::call]
  impl<T: Config<I>, I: 'static> Pallet<T, I> {
    /// Stake `amount` of the pool's asset under `tier`.
    ///
    /// Settles the caller first. Re-staking recomputes the weighted amount over the whole
    /// principal with the new tier.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::stake())]
    pub fn stake(origin: OriginFor<T>, amount: Balance, tier: StakeTier) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      Self::do_stake(&who, amount, tier)
    }

    /// Withdraw `amount` of principal once the position is unlocked.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::withdraw())]
    pub fn withdraw(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      Self::do_withdraw(&who, amount)
    }

    /// Pay out everything accrued so far. Claiming nothing succeeds and moves nothing.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::claim_reward())]
    pub fn claim_reward(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      Self::do_claim(&who).map(|_| ())
    }

    /// Withdraw the whole position and claim.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::exit())]
    pub fn exit(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      match T::StakeKind::get() {
        PoolKind::Fungible(_) => {
          let principal = Positions::<T, I>::get(&who)
            .map(|p| p.principal)
            .unwrap_or_default();
          if !principal.is_zero() {
            Self::do_withdraw(&who, principal)?;
          }
        }
        PoolKind::NonFungible => {
          let items = StakedNfts::<T, I>::get(&who);
          if !items.is_empty() {
            Self::do_withdraw_nfts(&who, items.into_inner())?;
          }
        }
      }
      Self::do_claim(&who).map(|_| ())
    }

    /// Move NFTs into the pool. Each item adds `NftWeight` to the caller's weight.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::stake_nfts(items.len() as u32))]
    pub fn stake_nfts(
      origin: OriginFor<T>,
      items: BoundedVec<u32, T::MaxNftsPerAccount>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      Self::do_stake_nfts(&who, items.into_inner())
    }

    /// Return staked NFTs to the caller.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::withdraw_nfts(items.len() as u32))]
    pub fn withdraw_nfts(
      origin: OriginFor<T>,
      items: BoundedVec<u32, T::MaxNftsPerAccount>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let _guard = Self::lock()?;
      Self::do_withdraw_nfts(&who, items.into_inner())
    }

    /// Start a new emission period funded by `amount` already held by the pool account.
    /// Engine only.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::notify_reward())]
    pub fn notify_reward(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(who == T::EngineAccount::get(), Error::<T, I>::NotEngine);
      let _guard = Self::lock()?;
      Self::do_notify(amount)
    }

    /// Add to the engine's eternal position. Engine only.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::stake())]
    pub fn stake_for_engine(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      <Self as PermanentStake<T::AccountId, Balance>>::stake_permanent(&who, amount)
    }

    /// Change the emission period length (governance only, between periods)
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::set_rewards_duration())]
    pub fn set_rewards_duration(origin: OriginFor<T>, new_duration: u64) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(new_duration > 0, Error::<T, I>::ZeroDuration);
      ensure!(
        Self::now() >= Pool::<T, I>::get().period_finish,
        Error::<T, I>::RewardPeriodActive
      );
      let old_duration = RewardsDuration::<T, I>::get();
      RewardsDuration::<T, I>::put(new_duration);
      Self::deposit_event(Event::RewardsDurationUpdated {
        old_duration,
        new_duration,
      });
      Ok(())
    }
  }

  #[pallet::hooks]
  impl<T: Config<I>, I: 'static> Hooks<BlockNumberFor<T>> for Pallet<T, I> {
    fn integrity_test() {
      assert!(
        T::DefaultRewardsDuration::get() > 0,
        "rewards duration must be non-zero"
      );
      assert!(!T::NftWeight::get().is_zero(), "NFT weight must be non-zero");
    }
  }

  impl<T: Config<I>, I: 'static> Pallet<T, I> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    fn now() -> u64 {
      T::TimeProvider::now().as_secs()
    }

    fn lock() -> Result<ReentrancyGuard<PoolLock<T, I>>, DispatchError> {
      ReentrancyGuard::acquire().ok_or_else(|| Error::<T, I>::Reentrancy.into())
    }

    /// Reward accrued by `who` up to now, including settled but unclaimed reward.
    pub fn earned(who: &T::AccountId) -> Balance {
      let pool = Pool::<T, I>::get();
      let weighted = Positions::<T, I>::get(who)
        .map(|p| p.weighted)
        .unwrap_or_default();
      ledger::earned(
        weighted,
        &Rewards::<T, I>::get(who),
        ledger::reward_per_share(&pool, Self::now()),
      )
    }

    pub fn reward_per_share() -> Balance {
      ledger::reward_per_share(&Pool::<T, I>::get(), Self::now())
    }

    pub fn last_time_reward_applicable() -> u64 {
      ledger::last_time_reward_applicable(&Pool::<T, I>::get(), Self::now())
    }

    /// Total emission of a full period at the current rate.
    pub fn reward_for_duration() -> Balance {
      ledger::reward_for_duration(
        Pool::<T, I>::get().reward_rate,
        RewardsDuration::<T, I>::get(),
      )
    }

    /// Native balance of the pool account that is not somebody's stake.
    pub fn reward_balance() -> Balance {
      let held = T::Currency::balance(&Self::account_id());
      match T::StakeKind::get() {
        PoolKind::Fungible(AssetKind::Native) => {
          held.saturating_sub(Pool::<T, I>::get().total_staked)
        }
        _ => held,
      }
    }

    /// Fold emissions into the accumulator and, for an account, into its pending reward.
    fn settle(who: Option<&T::AccountId>) -> PoolState {
      let mut pool = Pool::<T, I>::get();
      ledger::settle_pool(&mut pool, Self::now());
      Pool::<T, I>::put(pool);
      if let Some(who) = who {
        let weighted = Positions::<T, I>::get(who)
          .map(|p| p.weighted)
          .unwrap_or_default();
        Rewards::<T, I>::mutate(who, |rewards| {
          ledger::settle_account(weighted, rewards, pool.reward_per_share_stored)
        });
      }
      pool
    }

    fn transfer_stake(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
      match T::StakeKind::get() {
        PoolKind::Fungible(AssetKind::Native) => {
          T::Currency::transfer(from, to, amount, Preservation::Expendable)?;
        }
        PoolKind::Fungible(AssetKind::Local(id) | AssetKind::Foreign(id)) => {
          T::Assets::transfer(id, from, to, amount, Preservation::Expendable)?;
        }
        PoolKind::NonFungible => return Err(Error::<T, I>::WrongPoolKind.into()),
      }
      Ok(())
    }

    pub(crate) fn do_stake(who: &T::AccountId, amount: Balance, tier: StakeTier) -> DispatchResult {
      ensure!(!amount.is_zero(), Error::<T, I>::ZeroAmount);
      ensure!(
        matches!(T::StakeKind::get(), PoolKind::Fungible(_)),
        Error::<T, I>::WrongPoolKind
      );
      if *who == T::EngineAccount::get() {
        ensure!(tier == StakeTier::Eternal, Error::<T, I>::EngineTierRequired);
      } else {
        ensure!(tier != StakeTier::Eternal, Error::<T, I>::EternalTierReserved);
      }
      let now = Self::now();
      let existing = Positions::<T, I>::get(who);
      if let Some(position) = existing {
        ensure!(tier >= position.tier, Error::<T, I>::TierDowngrade);
        ensure!(
          !(position.tier.is_time_locked() && position.unlock_at > now),
          Error::<T, I>::PositionLocked
        );
      }

      let mut pool = Self::settle(Some(who));
      Self::transfer_stake(who, &Self::account_id(), amount)?;

      let old = existing.unwrap_or_default();
      let principal = old
        .principal
        .checked_add(amount)
        .ok_or(ArithmeticError::Overflow)?;
      let weighted = ledger::weighted_amount(principal, tier);
      pool.total_staked = pool.total_staked.saturating_add(amount);
      pool.total_weighted = pool
        .total_weighted
        .saturating_sub(old.weighted)
        .saturating_add(weighted);
      Pool::<T, I>::put(pool);
      Positions::<T, I>::insert(
        who,
        StakePosition {
          principal,
          weighted,
          tier,
          unlock_at: tier.unlock_at(now),
        },
      );

      Self::deposit_event(Event::Staked {
        who: who.clone(),
        amount,
        tier,
        weighted,
      });
      Ok(())
    }

    fn do_withdraw(who: &T::AccountId, amount: Balance) -> DispatchResult {
      ensure!(!amount.is_zero(), Error::<T, I>::ZeroAmount);
      ensure!(
        *who != T::EngineAccount::get(),
        Error::<T, I>::EnginePositionPermanent
      );
      let position = Positions::<T, I>::get(who).ok_or(Error::<T, I>::InsufficientStake)?;
      ensure!(
        position.tier != StakeTier::Eternal,
        Error::<T, I>::EnginePositionPermanent
      );
      ensure!(position.unlock_at <= Self::now(), Error::<T, I>::PositionLocked);
      ensure!(amount <= position.principal, Error::<T, I>::InsufficientStake);

      let mut pool = Self::settle(Some(who));
      let principal = position.principal.saturating_sub(amount);
      let weighted = ledger::weighted_amount(principal, position.tier);
      pool.total_staked = pool.total_staked.saturating_sub(amount);
      pool.total_weighted = pool
        .total_weighted
        .saturating_sub(position.weighted)
        .saturating_add(weighted);
      Pool::<T, I>::put(pool);
      if principal.is_zero() {
        Positions::<T, I>::remove(who);
      } else {
        Positions::<T, I>::insert(
          who,
          StakePosition {
            principal,
            weighted,
            ..position
          },
        );
      }

      Self::transfer_stake(&Self::account_id(), who, amount)?;
      Self::deposit_event(Event::Withdrawn {
        who: who.clone(),
        amount,
      });
      Ok(())
    }

    fn do_claim(who: &T::AccountId) -> Result<Balance, DispatchError> {
      Self::settle(Some(who));
      let reward = Rewards::<T, I>::get(who).pending;
      let has_position = Positions::<T, I>::contains_key(who);
      if reward.is_zero() {
        if !has_position {
          Rewards::<T, I>::remove(who);
        }
        return Ok(0);
      }

      if has_position {
        Rewards::<T, I>::mutate(who, |rewards| rewards.pending = 0);
      } else {
        Rewards::<T, I>::remove(who);
      }
      T::Currency::transfer(&Self::account_id(), who, reward, Preservation::Expendable)?;

      Self::deposit_event(Event::RewardPaid {
        who: who.clone(),
        amount: reward,
      });
      Ok(reward)
    }

    fn do_stake_nfts(who: &T::AccountId, items: Vec<u32>) -> DispatchResult {
      ensure!(!items.is_empty(), Error::<T, I>::ZeroAmount);
      ensure!(
        T::StakeKind::get() == PoolKind::NonFungible,
        Error::<T, I>::WrongPoolKind
      );
      let mut staked = StakedNfts::<T, I>::get(who);
      for item in &items {
        ensure!(
          T::Nfts::owner(*item).as_ref() == Some(who),
          Error::<T, I>::NftNotOwned
        );
      }

      let mut pool = Self::settle(Some(who));
      let pool_account = Self::account_id();
      for item in &items {
        // A duplicate in `items` fails here, the first copy already belongs to the pool.
        T::Nfts::transfer(*item, who, &pool_account)?;
        staked
          .try_push(*item)
          .map_err(|_| Error::<T, I>::TooManyNfts)?;
      }
      Self::apply_nft_count(who, &mut pool, staked.len() as Balance);
      StakedNfts::<T, I>::insert(who, staked);

      Self::deposit_event(Event::NftsStaked {
        who: who.clone(),
        count: items.len() as u32,
      });
      Ok(())
    }

    fn do_withdraw_nfts(who: &T::AccountId, items: Vec<u32>) -> DispatchResult {
      ensure!(!items.is_empty(), Error::<T, I>::ZeroAmount);
      ensure!(
        T::StakeKind::get() == PoolKind::NonFungible,
        Error::<T, I>::WrongPoolKind
      );
      let mut staked = StakedNfts::<T, I>::get(who);
      for item in &items {
        let index = staked
          .iter()
          .position(|staked_item| staked_item == item)
          .ok_or(Error::<T, I>::NftNotStaked)?;
        staked.remove(index);
      }

      let mut pool = Self::settle(Some(who));
      Self::apply_nft_count(who, &mut pool, staked.len() as Balance);
      if staked.is_empty() {
        StakedNfts::<T, I>::remove(who);
      } else {
        StakedNfts::<T, I>::insert(who, staked);
      }

      let pool_account = Self::account_id();
      for item in &items {
        T::Nfts::transfer(*item, &pool_account, who)?;
      }
      Self::deposit_event(Event::NftsWithdrawn {
        who: who.clone(),
        count: items.len() as u32,
      });
      Ok(())
    }

    /// Rewrite an NFT position to hold `count` items and fix the pool totals.
    fn apply_nft_count(who: &T::AccountId, pool: &mut PoolState, count: Balance) {
      let old = Positions::<T, I>::get(who).unwrap_or_default();
      let weighted = count.saturating_mul(T::NftWeight::get());
      pool.total_staked = pool
        .total_staked
        .saturating_sub(old.principal)
        .saturating_add(count);
      pool.total_weighted = pool
        .total_weighted
        .saturating_sub(old.weighted)
        .saturating_add(weighted);
      Pool::<T, I>::put(*pool);
      if count.is_zero() {
        Positions::<T, I>::remove(who);
      } else {
        Positions::<T, I>::insert(
          who,
          StakePosition {
            principal: count,
            weighted,
            tier: StakeTier::Flexible,
            unlock_at: 0,
          },
        );
      }
    }

    fn do_notify(amount: Balance) -> DispatchResult {
      let now = Self::now();
      let duration = RewardsDuration::<T, I>::get();
      let mut pool = Self::settle(None);

      let reward_rate = ledger::next_reward_rate(&pool, amount, now, duration);
      ensure!(
        amount.is_zero() || !reward_rate.is_zero(),
        Error::<T, I>::RewardRateZero
      );
      ensure!(
        ledger::reward_for_duration(reward_rate, duration) <= Self::reward_balance(),
        Error::<T, I>::RewardTooHigh
      );

      let period_finish = now.saturating_add(duration);
      pool.reward_rate = reward_rate;
      pool.last_update_time = now;
      pool.period_finish = period_finish;
      Pool::<T, I>::put(pool);

      log::debug!(
        target: LOG_TARGET,
        "refill of {amount} sets rate {reward_rate}/s until {period_finish}"
      );
      Self::deposit_event(Event::RewardAdded {
        amount,
        reward_rate,
        period_finish,
      });
      Ok(())
    }
  }

  impl<T: Config<I>, I: 'static> RewardNotifier<T::AccountId, Balance> for Pallet<T, I> {
    fn reward_account() -> T::AccountId {
      Self::account_id()
    }

    fn notify_reward(amount: Balance) -> DispatchResult {
      with_storage_layer(|| {
        let _guard = Self::lock()?;
        Self::do_notify(amount)
      })
    }
  }

  impl<T: Config<I>, I: 'static> PermanentStake<T::AccountId, Balance> for Pallet<T, I> {
    fn stake_permanent(who: &T::AccountId, amount: Balance) -> DispatchResult {
      ensure!(*who == T::EngineAccount::get(), Error::<T, I>::NotEngine);
      with_storage_layer(|| {
        let _guard = Self::lock()?;
        Self::do_stake(who, amount, StakeTier::Eternal)
      })
    }

    fn claim_permanent(who: &T::AccountId) -> Result<Balance, DispatchError> {
      ensure!(*who == T::EngineAccount::get(), Error::<T, I>::NotEngine);
      with_storage_layer(|| {
        let _guard = Self::lock()?;
        Self::do_claim(who)
      })
    }
  }

  /// Genesis configuration: keeps the pallet account alive without an existential deposit
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config<I>, I: 'static = ()> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<(T, I)>,
  }

  #[pallet::genesis_build]
  impl<T: Config<I>, I: 'static> BuildGenesisConfig for GenesisConfig<T, I> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T, I>::account_id());
    }
  }
}
