extern crate alloc;

use crate as pallet_reward_pool;
use crate::PoolKind;
use core::time::Duration;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  instances::{Instance1, Instance2},
  traits::{ConstU32, ConstU64, ConstU128, Get, UnixTime},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  AssetKind, NftCustody,
  ecosystem::{
    pallet_ids::{LP_POOL_PALLET_ID, NFT_POOL_PALLET_ID, TOKEN_POOL_PALLET_ID},
    params::{NFT_STAKE_WEIGHT, PRECISION, REWARDS_DURATION},
  },
  well_known::NATIVE_USDC_LP,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;
pub const ENGINE: u64 = 99;

pub const GENESIS_TIME: u64 = 1_700_000_000;
pub const INITIAL_BALANCE: u128 = 1_000_000 * PRECISION;

thread_local! {
    // Seconds since the unix epoch reported by MockTime
    pub static NOW: RefCell<u64> = const { RefCell::new(GENESIS_TIME) };

    // NFT item -> owner
    pub static NFT_OWNERS: RefCell<BTreeMap<u32, u64>> = const { RefCell::new(BTreeMap::new()) };
}

pub fn now() -> u64 {
  NOW.with(|n| *n.borrow())
}

pub fn advance_time(seconds: u64) {
  NOW.with(|n| *n.borrow_mut() += seconds);
}

pub fn mint_nft(item: u32, owner: u64) {
  NFT_OWNERS.with(|o| o.borrow_mut().insert(item, owner));
}

pub fn nft_owner(item: u32) -> Option<u64> {
  NFT_OWNERS.with(|o| o.borrow().get(&item).copied())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    TokenPool: pallet_reward_pool,
    LpPool: pallet_reward_pool::<Instance1>,
    NftPool: pallet_reward_pool::<Instance2>,
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

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

pub struct MockTime;
impl UnixTime for MockTime {
  fn now() -> Duration {
    Duration::from_secs(now())
  }
}

pub struct MockNfts;
impl NftCustody<u64> for MockNfts {
  fn owner(item: u32) -> Option<u64> {
    nft_owner(item)
  }

  fn transfer(item: u32, from: &u64, to: &u64) -> DispatchResult {
    NFT_OWNERS.with(|o| {
      let mut owners = o.borrow_mut();
      match owners.get(&item) {
        Some(owner) if owner == from => {
          owners.insert(item, *to);
          Ok(())
        }
        _ => Err(DispatchError::Other("NotOwner")),
      }
    })
  }
}

pub struct EngineAccount;
impl Get<u64> for EngineAccount {
  fn get() -> u64 {
    ENGINE
  }
}

pub struct TokenPoolId;
impl Get<PalletId> for TokenPoolId {
  fn get() -> PalletId {
    PalletId(*TOKEN_POOL_PALLET_ID)
  }
}

pub struct LpPoolId;
impl Get<PalletId> for LpPoolId {
  fn get() -> PalletId {
    PalletId(*LP_POOL_PALLET_ID)
  }
}

pub struct NftPoolId;
impl Get<PalletId> for NftPoolId {
  fn get() -> PalletId {
    PalletId(*NFT_POOL_PALLET_ID)
  }
}

pub struct NativeStake;
impl Get<PoolKind> for NativeStake {
  fn get() -> PoolKind {
    PoolKind::Fungible(AssetKind::Native)
  }
}

pub struct LpStake;
impl Get<PoolKind> for LpStake {
  fn get() -> PoolKind {
    PoolKind::Fungible(AssetKind::Local(NATIVE_USDC_LP))
  }
}

pub struct NftStake;
impl Get<PoolKind> for NftStake {
  fn get() -> PoolKind {
    PoolKind::NonFungible
  }
}

impl pallet_reward_pool::Config for Test {
  type Currency = Balances;
  type Assets = Assets;
  type Nfts = MockNfts;
  type TimeProvider = MockTime;
  type PalletId = TokenPoolId;
  type StakeKind = NativeStake;
  type EngineAccount = EngineAccount;
  type DefaultRewardsDuration = ConstU64<REWARDS_DURATION>;
  type NftWeight = ConstU128<NFT_STAKE_WEIGHT>;
  type MaxNftsPerAccount = ConstU32<8>;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RewardPoolBenchmarkHelper;
}

impl pallet_reward_pool::Config<Instance1> for Test {
  type Currency = Balances;
  type Assets = Assets;
  type Nfts = MockNfts;
  type TimeProvider = MockTime;
  type PalletId = LpPoolId;
  type StakeKind = LpStake;
  type EngineAccount = EngineAccount;
  type DefaultRewardsDuration = ConstU64<REWARDS_DURATION>;
  type NftWeight = ConstU128<NFT_STAKE_WEIGHT>;
  type MaxNftsPerAccount = ConstU32<8>;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RewardPoolBenchmarkHelper;
}

impl pallet_reward_pool::Config<Instance2> for Test {
  type Currency = Balances;
  type Assets = Assets;
  type Nfts = MockNfts;
  type TimeProvider = MockTime;
  type PalletId = NftPoolId;
  type StakeKind = NftStake;
  type EngineAccount = EngineAccount;
  type DefaultRewardsDuration = ConstU64<REWARDS_DURATION>;
  type NftWeight = ConstU128<NFT_STAKE_WEIGHT>;
  type MaxNftsPerAccount = ConstU32<8>;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RewardPoolBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct RewardPoolBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for RewardPoolBenchmarkHelper {
  fn ensure_funded(who: &u64, asset: AssetKind, amount: u128) -> DispatchResult {
    use polkadot_sdk::frame_support::traits::{fungible, fungibles};
    match asset {
      AssetKind::Native => {
        <Balances as fungible::Mutate<u64>>::mint_into(who, amount)?;
      }
      AssetKind::Local(id) | AssetKind::Foreign(id) => {
        <Assets as fungibles::Mutate<u64>>::mint_into(id, who, amount)?;
      }
    }
    Ok(())
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: alloc::vec![
      (ALICE, INITIAL_BALANCE),
      (BOB, INITIAL_BALANCE),
      (CHARLIE, INITIAL_BALANCE),
      (ENGINE, INITIAL_BALANCE),
    ],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: alloc::vec![(NATIVE_USDC_LP, ALICE, true, 1)],
    metadata: alloc::vec![],
    accounts: alloc::vec![
      (NATIVE_USDC_LP, ALICE, INITIAL_BALANCE),
      (NATIVE_USDC_LP, BOB, INITIAL_BALANCE),
      (NATIVE_USDC_LP, ENGINE, INITIAL_BALANCE),
    ],
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  // Pool accounts get a provider reference so they survive a zero balance
  pallet_reward_pool::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_reward_pool::GenesisConfig::<Test, Instance1>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_reward_pool::GenesisConfig::<Test, Instance2>::default()
    .assimilate_storage(&mut t)
    .unwrap();

  NOW.with(|n| *n.borrow_mut() = GENESIS_TIME);
  NFT_OWNERS.with(|o| o.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
