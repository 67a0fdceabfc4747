use frame::prelude::*;
use primitives::params::{LOCK_180_DAYS, LOCK_30_DAYS, LOCK_90_DAYS};

pub use primitives::AssetKind;

pub type Balance = u128;

/// What a pool instance takes as stake.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum PoolKind {
  /// Fungible stake in the given asset (native token or LP shares)
  Fungible(AssetKind),
  /// Membership NFTs, each worth a fixed weight
  NonFungible,
}

/// Lock tier of a position. Declaration order is the upgrade order.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  PartialEq,
  Ord,
  PartialOrd,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum StakeTier {
  #[default]
  Flexible,
  Locked30,
  Locked90,
  Locked180,
  /// Reserved for the engine's permanent position; never unlocks
  Eternal,
}

impl StakeTier {
  /// Reward multiplier in basis points of `MULTIPLIER_DIVISOR`.
  pub const fn multiplier(&self) -> u32 {
    match self {
      StakeTier::Flexible => 10_000,
      StakeTier::Locked30 => 12_000,
      StakeTier::Locked90 => 14_000,
      StakeTier::Locked180 | StakeTier::Eternal => 16_000,
    }
  }

  /// Lock length in seconds, `None` for a position that never unlocks.
  pub const fn lock_duration(&self) -> Option<u64> {
    match self {
      StakeTier::Flexible => Some(0),
      StakeTier::Locked30 => Some(LOCK_30_DAYS),
      StakeTier::Locked90 => Some(LOCK_90_DAYS),
      StakeTier::Locked180 => Some(LOCK_180_DAYS),
      StakeTier::Eternal => None,
    }
  }

  pub fn unlock_at(&self, now: u64) -> u64 {
    match self.lock_duration() {
      Some(0) => 0,
      Some(lock) => now.saturating_add(lock),
      None => u64::MAX,
    }
  }

  pub fn is_time_locked(&self) -> bool {
    matches!(
      self,
      StakeTier::Locked30 | StakeTier::Locked90 | StakeTier::Locked180
    )
  }
}

/// One account's stake in one pool.
#[derive(
  Clone, Copy, Debug, Decode, Default, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct StakePosition {
  /// Staked amount (number of NFTs in an NFT pool)
  pub principal: Balance,
  /// `principal * multiplier / MULTIPLIER_DIVISOR` (or `count * NftWeight`)
  pub weighted: Balance,
  pub tier: StakeTier,
  /// Unix seconds; 0 when unlocked
  pub unlock_at: u64,
}

/// Reward bookkeeping of one account, kept apart from the position so that accrued reward
/// survives a full withdrawal.
#[derive(
  Clone, Copy, Debug, Decode, Default, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct AccountRewards {
  /// Accumulator value at the account's last settlement
  pub reward_per_share_paid: Balance,
  /// Settled but unclaimed reward
  pub pending: Balance,
}

/// Global accounting of one pool.
#[derive(
  Clone, Copy, Debug, Decode, Default, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct PoolState {
  pub total_staked: Balance,
  pub total_weighted: Balance,
  /// Tokens emitted per second
  pub reward_rate: Balance,
  pub period_finish: u64,
  /// Cumulative reward per weighted unit, scaled by `REWARD_PRECISION`
  pub reward_per_share_stored: Balance,
  pub last_update_time: u64,
}
