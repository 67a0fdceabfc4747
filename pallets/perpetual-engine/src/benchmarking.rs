#![cfg(feature = "runtime-benchmarks")]

use crate::*;
use frame::deps::sp_runtime::Permill;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn run_cycle() {
    let caller: T::AccountId = whitelisted_caller();
    let amount = MinToProcess::<T>::get().saturating_mul(2);
    assert!(T::BenchmarkHelper::ensure_funded(&Pallet::<T>::account_id(), amount).is_ok());
    #[extrinsic_call]
    _(RawOrigin::Signed(caller));
    assert_eq!(Stats::<T>::get().cycles_processed, 1);
  }

  #[benchmark]
  fn set_cooldown() {
    #[extrinsic_call]
    _(RawOrigin::Root, 7_200);
    assert_eq!(CooldownPeriod::<T>::get(), 7_200);
  }

  #[benchmark]
  fn set_min_to_process() {
    #[extrinsic_call]
    _(RawOrigin::Root, 42);
    assert_eq!(MinToProcess::<T>::get(), 42);
  }

  #[benchmark]
  fn set_slippage_tolerance() {
    #[extrinsic_call]
    _(RawOrigin::Root, Permill::from_percent(3));
    assert_eq!(SlippageTolerance::<T>::get(), Permill::from_percent(3));
  }

  #[benchmark]
  fn renounce_admin() {
    #[extrinsic_call]
    _(RawOrigin::Root);
    assert!(AdminRenounced::<T>::get());
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
