#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

fn fund_reserve<T: Config>() {
  let reserve = T::InitialReserve::get();
  assert!(T::BenchmarkHelper::ensure_funded(&Pallet::<T>::account_id(), reserve).is_ok());
}

fn initialized<T: Config>() -> EndowmentState {
  fund_reserve::<T>();
  assert!(Pallet::<T>::initialize(RawOrigin::Root.into()).is_ok());
  State::<T>::get()
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn initialize() {
    fund_reserve::<T>();
    #[extrinsic_call]
    _(RawOrigin::Root);
    assert!(State::<T>::get().initialized);
  }

  #[benchmark]
  fn release_funds() {
    // Worst case: a full capped catch-up, compounded period by period
    let mut state = initialized::<T>();
    let overdue = u64::from(T::MaxPeriodsPerRelease::get()) * T::ReleaseInterval::get();
    state.last_release_time = state.last_release_time.saturating_sub(overdue);
    State::<T>::put(state);
    let engine = T::EngineAccount::get();
    #[extrinsic_call]
    _(RawOrigin::Signed(engine));
    assert_eq!(State::<T>::get().release_count, 1);
  }

  #[benchmark]
  fn emergency_release() {
    let mut state = initialized::<T>();
    state.last_activity = state
      .last_activity
      .saturating_sub(T::EmergencyDelay::get());
    State::<T>::put(state);
    #[extrinsic_call]
    _(RawOrigin::Root);
    assert!(State::<T>::get().drained);
  }

  #[benchmark]
  fn set_compounding() {
    #[extrinsic_call]
    _(RawOrigin::Root, false);
    assert!(!CompoundingEnabled::<T>::get());
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
