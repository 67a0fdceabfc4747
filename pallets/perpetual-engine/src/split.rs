//! Fixed-share division of a cycle's balance.
//!
//! Every share is taken from the same base with a floor, so the shares never exceed the
//! base. Whatever the floors leave behind is reported as dust and stays on the engine.

use crate::types::{Balance, CycleSplit};
use frame::deps::sp_runtime::Permill;

/// Shares applied to each cycle.
#[derive(Clone, Copy, Debug)]
pub struct SplitShares {
  /// Taken from newly collected tax only
  pub caller: Permill,
  pub burn: Permill,
  pub liquidity: Permill,
  pub rewards: Permill,
}

pub fn cycle_split(available: Balance, collected_tax: Balance, shares: SplitShares) -> CycleSplit {
  let caller_reward = shares.caller.mul_floor(collected_tax).min(available);
  let base = available.saturating_sub(caller_reward);
  let burn = shares.burn.mul_floor(base);
  let liquidity = shares.liquidity.mul_floor(base);
  let rewards = shares.rewards.mul_floor(base);
  let dust = base
    .saturating_sub(burn)
    .saturating_sub(liquidity)
    .saturating_sub(rewards);
  CycleSplit {
    caller_reward,
    base,
    burn,
    liquidity,
    rewards,
    dust,
  }
}
