use frame::prelude::*;
use frame::deps::sp_runtime::Permill;

pub use primitives::AssetKind;

pub type Balance = u128;

/// Reward pool refilled by a cycle.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum PoolTarget {
  Lp,
  Token,
  Nft,
}

/// Rung of the liquidity provision ladder, in the order they are tried.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum StrategyKind {
  /// Both sides as held, 80% minimum acceptance
  Conservative,
  /// 120% of the native side, 50% minimum acceptance
  TokenHeavy,
  /// 120% of the stable side, 50% minimum acceptance
  StableHeavy,
  /// A quarter of both sides, 2.5% minimum acceptance
  Minimal,
}

/// Why a liquidity allocation stayed on the engine account.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub enum UnutilizedReason {
  /// Allocation below the dust threshold, passed through untouched
  DustAmount,
  /// Every swap round failed, nothing to pair with
  NoSwapProceeds,
  /// Every ladder rung was rejected by the router
  AllStrategiesFailed,
}

/// Division of one cycle's available balance.
///
/// `burn + liquidity + rewards + dust == base` and `base + caller_reward == available`.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Default, Encode, Eq, PartialEq, TypeInfo,
)]
pub struct CycleSplit {
  pub caller_reward: Balance,
  pub base: Balance,
  pub burn: Balance,
  pub liquidity: Balance,
  pub rewards: Balance,
  /// Truncation remainder, left on the engine for the next cycle
  pub dust: Balance,
}

/// Result of running the swap phase and the liquidity ladder.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Default, Encode, Eq, PartialEq, TypeInfo,
)]
pub struct LiquidityOutcome {
  /// Native amount converted into the stable asset
  pub swapped_in: Balance,
  /// Stable asset received from all successful swap rounds
  pub stable_received: Balance,
  pub native_used: Balance,
  pub stable_used: Balance,
  pub lp_minted: Balance,
  /// Rung that succeeded, if any
  pub strategy: Option<StrategyKind>,
}

/// Running totals across all processed cycles.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Default, Encode, Eq, PartialEq, TypeInfo,
  MaxEncodedLen,
)]
pub struct EngineStats {
  pub cycles_processed: u32,
  pub total_burned: Balance,
  pub total_lp_minted: Balance,
  pub total_rewards_distributed: Balance,
  pub total_caller_rewards: Balance,
  pub total_endowment_received: Balance,
  pub total_lp_rewards_claimed: Balance,
}

/// Snapshot returned by `engine_status`.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct EngineStatus {
  pub native_balance: Balance,
  pub stable_balance: Balance,
  pub last_process_time: u64,
  pub next_cycle_at: u64,
  pub cooldown: u64,
  pub min_to_process: Balance,
  pub slippage_tolerance: Permill,
  /// Whether a cycle called now would process rather than skip or fail
  pub ready: bool,
  pub admin_renounced: bool,
  pub stats: EngineStats,
}
