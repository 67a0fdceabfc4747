extern crate alloc;

use crate as pallet_endowment;
use core::time::Duration;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU64, ConstU128, Get, UnixTime, fungible::Mutate},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult, Permill,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  OnEndowmentRelease,
  ecosystem::{
    pallet_ids::ENDOWMENT_PALLET_ID,
    params::{
      ENDOWMENT_DUST_THRESHOLD, ENDOWMENT_EMERGENCY_DELAY, ENDOWMENT_INITIAL_RESERVE,
      ENDOWMENT_MAX_PERIODS_PER_RELEASE, ENDOWMENT_RELEASE_INTERVAL, ENDOWMENT_RELEASE_RATE,
    },
  },
};
use std::cell::RefCell;

pub const ENGINE: u64 = 99;
pub const RECOVERY: u64 = 77;
pub const ALICE: u64 = 1;

pub const GENESIS_TIME: u64 = 1_700_000_000;

thread_local! {
    pub static NOW: RefCell<u64> = const { RefCell::new(GENESIS_TIME) };

    // Amounts the engine was notified about
    pub static NOTIFIED: RefCell<Vec<u128>> = const { RefCell::new(Vec::new()) };

    // When set, the engine rejects release notifications
    pub static NOTIFY_FAILS: RefCell<bool> = const { RefCell::new(false) };
}

pub fn now() -> u64 {
  NOW.with(|n| *n.borrow())
}

pub fn advance_time(seconds: u64) {
  NOW.with(|n| *n.borrow_mut() += seconds);
}

pub fn set_notify_fails(fails: bool) {
  NOTIFY_FAILS.with(|f| *f.borrow_mut() = fails);
}

pub fn notified() -> Vec<u128> {
  NOTIFIED.with(|n| n.borrow().clone())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Endowment: pallet_endowment,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

pub struct MockTime;
impl UnixTime for MockTime {
  fn now() -> Duration {
    Duration::from_secs(now())
  }
}

pub struct MockEngine;
impl OnEndowmentRelease<u128> for MockEngine {
  fn on_endowment_release(amount: u128) -> DispatchResult {
    if NOTIFY_FAILS.with(|f| *f.borrow()) {
      return Err(DispatchError::Other("EngineUnavailable"));
    }
    NOTIFIED.with(|n| n.borrow_mut().push(amount));
    Ok(())
  }
}

pub struct EndowmentPalletId;
impl Get<PalletId> for EndowmentPalletId {
  fn get() -> PalletId {
    PalletId(*ENDOWMENT_PALLET_ID)
  }
}

pub struct EngineAccount;
impl Get<u64> for EngineAccount {
  fn get() -> u64 {
    ENGINE
  }
}

pub struct RecoveryAccount;
impl Get<u64> for RecoveryAccount {
  fn get() -> u64 {
    RECOVERY
  }
}

pub struct ReleaseRate;
impl Get<Permill> for ReleaseRate {
  fn get() -> Permill {
    ENDOWMENT_RELEASE_RATE
  }
}

impl pallet_endowment::Config for Test {
  type Currency = Balances;
  type TimeProvider = MockTime;
  type PalletId = EndowmentPalletId;
  type EngineAccount = EngineAccount;
  type RecoveryAccount = RecoveryAccount;
  type InitialReserve = ConstU128<ENDOWMENT_INITIAL_RESERVE>;
  type ReleaseInterval = ConstU64<ENDOWMENT_RELEASE_INTERVAL>;
  type ReleaseRate = ReleaseRate;
  type MaxPeriodsPerRelease = ConstU32<ENDOWMENT_MAX_PERIODS_PER_RELEASE>;
  type DustThreshold = ConstU128<ENDOWMENT_DUST_THRESHOLD>;
  type EmergencyDelay = ConstU64<ENDOWMENT_EMERGENCY_DELAY>;
  type OnRelease = MockEngine;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = EndowmentBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct EndowmentBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for EndowmentBenchmarkHelper {
  fn ensure_funded(who: &u64, amount: u128) -> DispatchResult {
    Balances::mint_into(who, amount)?;
    Ok(())
  }
}

/// Fresh state with nothing in the reserve.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: alloc::vec![(ALICE, 1_000), (ENGINE, 1_000)],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_endowment::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();

  NOW.with(|n| *n.borrow_mut() = GENESIS_TIME);
  NOTIFIED.with(|n| n.borrow_mut().clear());
  set_notify_fails(false);

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}

/// Reserve funded with exactly the initial amount and initialized at `GENESIS_TIME`.
pub fn funded_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut ext = new_test_ext();
  ext.execute_with(|| {
    Balances::mint_into(&Endowment::account_id(), ENDOWMENT_INITIAL_RESERVE).unwrap();
    Endowment::initialize(RuntimeOrigin::root()).unwrap();
  });
  ext
}
