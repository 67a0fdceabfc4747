//! Reward-per-share arithmetic.
//!
//! Pure functions over [`PoolState`] and [`AccountRewards`]. Every product is formed in
//! `U256` before the division so that no precision is lost to early truncation, and every
//! division by the weighted supply short-circuits when the supply is zero.

use crate::types::{AccountRewards, Balance, PoolState, StakeTier};
use frame::deps::sp_core::U256;
use primitives::params::{MULTIPLIER_DIVISOR, REWARD_PRECISION};

fn saturate(value: U256) -> Balance {
  if value > U256::from(u128::MAX) {
    u128::MAX
  } else {
    value.as_u128()
  }
}

/// `min(now, period_finish)`.
pub fn last_time_reward_applicable(pool: &PoolState, now: u64) -> u64 {
  now.min(pool.period_finish)
}

/// Accumulator value at `now`, without writing it back.
pub fn reward_per_share(pool: &PoolState, now: u64) -> Balance {
  if pool.total_weighted == 0 {
    return pool.reward_per_share_stored;
  }
  let elapsed = last_time_reward_applicable(pool, now).saturating_sub(pool.last_update_time);
  let accrued = U256::from(elapsed)
    .saturating_mul(U256::from(pool.reward_rate))
    .saturating_mul(U256::from(REWARD_PRECISION))
    / U256::from(pool.total_weighted);
  pool.reward_per_share_stored.saturating_add(saturate(accrued))
}

/// Fold emissions up to `now` into the stored accumulator.
pub fn settle_pool(pool: &mut PoolState, now: u64) {
  pool.reward_per_share_stored = reward_per_share(pool, now);
  // Only moves forward; a clock sampled before `last_update_time` leaves it in place.
  pool.last_update_time = pool
    .last_update_time
    .max(last_time_reward_applicable(pool, now));
}

/// Reward owed to an account holding `weighted` units at accumulator value `current`.
pub fn earned(weighted: Balance, rewards: &AccountRewards, current: Balance) -> Balance {
  let delta = current.saturating_sub(rewards.reward_per_share_paid);
  let accrued = U256::from(weighted).saturating_mul(U256::from(delta)) / U256::from(REWARD_PRECISION);
  rewards.pending.saturating_add(saturate(accrued))
}

/// Settle one account against an already settled pool accumulator.
pub fn settle_account(weighted: Balance, rewards: &mut AccountRewards, current: Balance) {
  rewards.pending = earned(weighted, rewards, current);
  rewards.reward_per_share_paid = current;
}

/// `principal * multiplier(tier) / MULTIPLIER_DIVISOR`.
pub fn weighted_amount(principal: Balance, tier: StakeTier) -> Balance {
  let weighted = U256::from(principal).saturating_mul(U256::from(tier.multiplier()))
    / U256::from(MULTIPLIER_DIVISOR);
  saturate(weighted)
}

/// Emission rate after a refill of `amount` at `now`, rolling in whatever the unexpired
/// period still had to emit.
pub fn next_reward_rate(pool: &PoolState, amount: Balance, now: u64, duration: u64) -> Balance {
  if duration == 0 {
    return 0;
  }
  let total = if now >= pool.period_finish {
    U256::from(amount)
  } else {
    let remaining = pool.period_finish.saturating_sub(now);
    let leftover = U256::from(remaining).saturating_mul(U256::from(pool.reward_rate));
    U256::from(amount).saturating_add(leftover)
  };
  saturate(total / U256::from(duration))
}

/// Amount emitted over `duration` at `rate`.
pub fn reward_for_duration(rate: Balance, duration: u64) -> Balance {
  rate.saturating_mul(Balance::from(duration))
}
