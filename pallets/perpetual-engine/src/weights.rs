#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn run_cycle() -> Weight;
  fn set_cooldown() -> Weight;
  fn set_min_to_process() -> Weight;
  fn set_slippage_tolerance() -> Weight;
  fn renounce_admin() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn run_cycle() -> Weight {
    // Every swap round and all four ladder rungs attempted, three pool refills
    let rounds = u64::from(T::MaxSwapAttempts::get());
    Weight::from_parts(180_000_000, 12_000)
      .saturating_add(Weight::from_parts(35_000_000, 2_000).saturating_mul(rounds))
      .saturating_add(Weight::from_parts(45_000_000, 3_000).saturating_mul(4))
      .saturating_add(T::DbWeight::get().reads(40))
      .saturating_add(T::DbWeight::get().writes(30))
  }

  fn set_cooldown() -> Weight {
    Weight::from_parts(9_000_000, 800)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_min_to_process() -> Weight {
    Weight::from_parts(9_000_000, 800)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_slippage_tolerance() -> Weight {
    Weight::from_parts(9_000_000, 800)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn renounce_admin() -> Weight {
    Weight::from_parts(8_000_000, 800)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn run_cycle() -> Weight { Weight::from_parts(535_000_000, 34_000) }
  fn set_cooldown() -> Weight { Weight::from_parts(9_000_000, 800) }
  fn set_min_to_process() -> Weight { Weight::from_parts(9_000_000, 800) }
  fn set_slippage_tolerance() -> Weight { Weight::from_parts(9_000_000, 800) }
  fn renounce_admin() -> Weight { Weight::from_parts(8_000_000, 800) }
}
