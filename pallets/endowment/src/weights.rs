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
  fn initialize() -> Weight;
  fn release_funds() -> Weight;
  fn emergency_release() -> Weight;
  fn set_compounding() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn initialize() -> Weight {
    Weight::from_parts(18_000_000, 1_500)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn release_funds() -> Weight {
    // One compounding step per capped period
    let periods = u64::from(T::MaxPeriodsPerRelease::get());
    Weight::from_parts(40_000_000, 3_500)
      .saturating_add(Weight::from_parts(1_500_000, 0).saturating_mul(periods))
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn emergency_release() -> Weight {
    Weight::from_parts(30_000_000, 3_000)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(3))
  }

  fn set_compounding() -> Weight {
    Weight::from_parts(10_000_000, 800)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn initialize() -> Weight { Weight::from_parts(18_000_000, 1_500) }
  fn release_funds() -> Weight { Weight::from_parts(49_000_000, 3_500) }
  fn emergency_release() -> Weight { Weight::from_parts(30_000_000, 3_000) }
  fn set_compounding() -> Weight { Weight::from_parts(10_000_000, 800) }
}
