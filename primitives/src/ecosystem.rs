//! Ecosystem Constants for the Perpetual Tokenomics Engine
//!
//! Centralizes pallet IDs and the fundamental economic parameters shared by the engine,
//! the endowment and the reward pools. Runtime configurations and test mocks re-use these
//! values so that every crate agrees on the same split ratios and schedules.

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// Used by `PalletId::into_account_truncating()` to deterministically generate the accounts
/// holding engine inventory, the endowment reserve and each pool's stake and reward funds.
pub mod pallet_ids {
  /// Perpetual engine pallet ID (cycle orchestrator inventory)
  pub const PERPETUAL_ENGINE_PALLET_ID: &[u8; 8] = b"perpeng0";

  /// Endowment pallet ID (decaying reserve)
  pub const ENDOWMENT_PALLET_ID: &[u8; 8] = b"endowmt0";

  /// LP staking pool pallet ID
  pub const LP_POOL_PALLET_ID: &[u8; 8] = b"rwdpool1";

  /// Token staking pool pallet ID
  pub const TOKEN_POOL_PALLET_ID: &[u8; 8] = b"rwdpool2";

  /// NFT staking pool pallet ID
  pub const NFT_POOL_PALLET_ID: &[u8; 8] = b"rwdpool3";
}

/// Economic parameters.
pub mod params {
  use super::Balance;
  use sp_arithmetic::Permill;

  /// One whole token in base units (10^12).
  pub const PRECISION: Balance = 1_000_000_000_000;

  /// Fixed-point scale of the reward-per-share accumulator (10^18).
  pub const REWARD_PRECISION: Balance = 1_000_000_000_000_000_000;

  /// Divisor for tier multipliers expressed in basis points.
  pub const MULTIPLIER_DIVISOR: u32 = 10_000;

  pub const SECONDS_PER_DAY: u64 = 86_400;

  /// Share of each cycle's base amount that is burned (20%).
  pub const ENGINE_BURN_SHARE: Permill = Permill::from_percent(20);

  /// Share of each cycle's base amount turned into paired liquidity (40%).
  pub const ENGINE_LIQUIDITY_SHARE: Permill = Permill::from_percent(40);

  /// Share of each cycle's base amount refilled into the reward pools (40%).
  pub const ENGINE_REWARD_SHARE: Permill = Permill::from_percent(40);

  /// Caller incentive, taken from newly collected tax only (10 bps).
  pub const ENGINE_CALLER_REWARD: Permill = Permill::from_parts(1_000);

  /// LP pool share of the reward refill (50%).
  pub const LP_POOL_REFILL_SHARE: Permill = Permill::from_percent(50);

  /// Token pool share of the reward refill (37.5%).
  pub const TOKEN_POOL_REFILL_SHARE: Permill = Permill::from_parts(375_000);

  /// NFT pool share of the reward refill (12.5%).
  pub const NFT_POOL_REFILL_SHARE: Permill = Permill::from_parts(125_000);

  /// Minimum delay between two processed cycles (1 hour).
  pub const ENGINE_COOLDOWN: u64 = 3_600;

  /// Minimum engine balance for a cycle to process instead of skipping (1000 tokens).
  pub const ENGINE_MIN_TO_PROCESS: Balance = 1_000 * PRECISION;

  /// Default slippage tolerance applied to swap quotes (5%).
  pub const ENGINE_SLIPPAGE_TOLERANCE: Permill = Permill::from_percent(5);

  /// Upper bound on adaptive swap rounds per cycle.
  pub const ENGINE_MAX_SWAP_ATTEMPTS: u32 = 5;

  /// Liquidity allocations below this are passed through untouched (1 token).
  pub const ENGINE_DUST_THRESHOLD: Balance = PRECISION;

  /// Reward emission period applied by every `notify_reward` (7 days).
  pub const REWARDS_DURATION: u64 = 7 * SECONDS_PER_DAY;

  /// Lock lengths of the staking tiers.
  pub const LOCK_30_DAYS: u64 = 30 * SECONDS_PER_DAY;
  pub const LOCK_90_DAYS: u64 = 90 * SECONDS_PER_DAY;
  pub const LOCK_180_DAYS: u64 = 180 * SECONDS_PER_DAY;

  /// Weighted-supply contribution of one staked NFT (one whole token).
  pub const NFT_STAKE_WEIGHT: Balance = PRECISION;

  /// Fixed endowment reserve (311,111,111 tokens).
  pub const ENDOWMENT_INITIAL_RESERVE: Balance = 311_111_111 * PRECISION;

  /// Length of one endowment release period (30 days).
  pub const ENDOWMENT_RELEASE_INTERVAL: u64 = 30 * SECONDS_PER_DAY;

  /// Fraction of the remaining endowment released per period (0.5%).
  pub const ENDOWMENT_RELEASE_RATE: Permill = Permill::from_parts(5_000);

  /// Maximum number of overdue periods settled by one release call.
  pub const ENDOWMENT_MAX_PERIODS_PER_RELEASE: u32 = 6;

  /// Remaining endowment below this is swept in full (1 token).
  pub const ENDOWMENT_DUST_THRESHOLD: Balance = PRECISION;

  /// Silence window after which the endowment can be drained to recovery (180 days).
  pub const ENDOWMENT_EMERGENCY_DELAY: u64 = 180 * SECONDS_PER_DAY;
}
