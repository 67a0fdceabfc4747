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
  fn stake() -> Weight;
  fn withdraw() -> Weight;
  fn claim_reward() -> Weight;
  fn exit() -> Weight;
  fn stake_nfts(n: u32) -> Weight;
  fn withdraw_nfts(n: u32) -> Weight;
  fn notify_reward() -> Weight;
  fn set_rewards_duration() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
  fn stake() -> Weight {
    Weight::from_parts(45_000_000, 4_000)
      .saturating_add(T::DbWeight::get().reads(6))
      .saturating_add(T::DbWeight::get().writes(6))
  }

  fn withdraw() -> Weight {
    Weight::from_parts(45_000_000, 4_000)
      .saturating_add(T::DbWeight::get().reads(6))
      .saturating_add(T::DbWeight::get().writes(6))
  }

  fn claim_reward() -> Weight {
    Weight::from_parts(35_000_000, 3_500)
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(5))
  }

  fn exit() -> Weight {
    Weight::from_parts(70_000_000, 6_000)
      .saturating_add(T::DbWeight::get().reads(9))
      .saturating_add(T::DbWeight::get().writes(9))
  }

  fn stake_nfts(n: u32) -> Weight {
    Weight::from_parts(30_000_000, 4_000)
      .saturating_add(Weight::from_parts(12_000_000, 600).saturating_mul(n.into()))
      .saturating_add(T::DbWeight::get().reads(5_u64.saturating_add(n.into())))
      .saturating_add(T::DbWeight::get().writes(5_u64.saturating_add(n.into())))
  }

  fn withdraw_nfts(n: u32) -> Weight {
    Weight::from_parts(30_000_000, 4_000)
      .saturating_add(Weight::from_parts(12_000_000, 600).saturating_mul(n.into()))
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(5_u64.saturating_add(n.into())))
  }

  fn notify_reward() -> Weight {
    Weight::from_parts(25_000_000, 2_500)
      .saturating_add(T::DbWeight::get().reads(4))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn set_rewards_duration() -> Weight {
    Weight::from_parts(12_000_000, 1_000)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn stake() -> Weight { Weight::from_parts(45_000_000, 4_000) }
  fn withdraw() -> Weight { Weight::from_parts(45_000_000, 4_000) }
  fn claim_reward() -> Weight { Weight::from_parts(35_000_000, 3_500) }
  fn exit() -> Weight { Weight::from_parts(70_000_000, 6_000) }
  fn stake_nfts(n: u32) -> Weight {
    Weight::from_parts(30_000_000, 4_000)
      .saturating_add(Weight::from_parts(12_000_000, 600).saturating_mul(n.into()))
  }
  fn withdraw_nfts(n: u32) -> Weight {
    Weight::from_parts(30_000_000, 4_000)
      .saturating_add(Weight::from_parts(12_000_000, 600).saturating_mul(n.into()))
  }
  fn notify_reward() -> Weight { Weight::from_parts(25_000_000, 2_500) }
  fn set_rewards_duration() -> Weight { Weight::from_parts(12_000_000, 1_000) }
}
