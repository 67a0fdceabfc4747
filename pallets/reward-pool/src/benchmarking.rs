#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{AssetKind, RewardNotifier, params::PRECISION};

const STAKE: Balance = 1_000 * PRECISION;

fn stake_asset<T: Config<I>, I: 'static>() -> AssetKind {
  match T::StakeKind::get() {
    PoolKind::Fungible(asset) => asset,
    PoolKind::NonFungible => AssetKind::Native,
  }
}

fn fund_stake<T: Config<I>, I: 'static>(who: &T::AccountId) {
  assert!(T::BenchmarkHelper::ensure_funded(who, stake_asset::<T, I>(), STAKE * 10).is_ok());
  assert!(T::BenchmarkHelper::ensure_funded(who, AssetKind::Native, STAKE).is_ok());
}

fn fund_rewards<T: Config<I>, I: 'static>(amount: Balance) {
  let pool = Pallet::<T, I>::account_id();
  assert!(T::BenchmarkHelper::ensure_funded(&pool, AssetKind::Native, amount).is_ok());
}

#[instance_benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn stake() {
    let caller: T::AccountId = whitelisted_caller();
    fund_stake::<T, I>(&caller);
    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), STAKE, StakeTier::Locked180);
    assert_eq!(
      Positions::<T, I>::get(&caller).map(|p| p.principal),
      Some(STAKE)
    );
  }

  #[benchmark]
  fn withdraw() {
    let caller: T::AccountId = whitelisted_caller();
    fund_stake::<T, I>(&caller);
    assert!(Pallet::<T, I>::do_stake(&caller, STAKE, StakeTier::Flexible).is_ok());
    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), STAKE / 2);
    assert_eq!(
      Positions::<T, I>::get(&caller).map(|p| p.principal),
      Some(STAKE / 2)
    );
  }

  #[benchmark]
  fn claim_reward() {
    let caller: T::AccountId = whitelisted_caller();
    fund_stake::<T, I>(&caller);
    assert!(Pallet::<T, I>::do_stake(&caller, STAKE, StakeTier::Flexible).is_ok());
    let pending = 10 * PRECISION;
    fund_rewards::<T, I>(pending);
    Rewards::<T, I>::mutate(&caller, |rewards| rewards.pending = pending);
    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()));
    assert_eq!(Rewards::<T, I>::get(&caller).pending, 0);
  }

  #[benchmark]
  fn exit() {
    let caller: T::AccountId = whitelisted_caller();
    fund_stake::<T, I>(&caller);
    assert!(Pallet::<T, I>::do_stake(&caller, STAKE, StakeTier::Flexible).is_ok());
    let pending = 10 * PRECISION;
    fund_rewards::<T, I>(pending);
    Rewards::<T, I>::mutate(&caller, |rewards| rewards.pending = pending);
    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()));
    assert!(Positions::<T, I>::get(&caller).is_none());
  }

  #[benchmark]
  fn notify_reward() {
    let engine = T::EngineAccount::get();
    let amount = 7_000 * PRECISION;
    fund_rewards::<T, I>(amount * 2);
    assert!(<Pallet<T, I> as RewardNotifier<T::AccountId, Balance>>::notify_reward(amount).is_ok());
    #[extrinsic_call]
    _(RawOrigin::Signed(engine), amount);
    assert!(Pool::<T, I>::get().reward_rate > 0);
  }

  #[benchmark]
  fn set_rewards_duration() {
    #[extrinsic_call]
    _(RawOrigin::Root, 14 * primitives::params::SECONDS_PER_DAY);
    assert_eq!(
      RewardsDuration::<T, I>::get(),
      14 * primitives::params::SECONDS_PER_DAY
    );
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
