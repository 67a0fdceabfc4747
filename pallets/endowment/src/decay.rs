//! Decay release arithmetic.
//!
//! Each period releases `rate` of whatever is left, so after `n` periods the reserve holds
//! `reserve * (1 - rate)^n`. With a rate below 100% the residual is positive for every
//! finite `n`.

use crate::types::Balance;
use frame::deps::sp_runtime::Permill;

/// Hard bound on the number of periods a projection walks.
pub const MAX_PROJECTION_PERIODS: u32 = 1_200;

/// Whole periods elapsed, capped at `max_periods`.
pub fn due_periods(elapsed: u64, interval: u64, max_periods: u32) -> u32 {
  if interval == 0 {
    return 0;
  }
  let whole = elapsed / interval;
  whole.min(u64::from(max_periods)) as u32
}

/// Amount to release for `periods` periods starting from `balance`.
///
/// Compounding applies the rate period by period against the already reduced balance.
/// Without compounding the first period's amount is repeated `periods` times.
pub fn release_amount(balance: Balance, rate: Permill, periods: u32, compounding: bool) -> Balance {
  if compounding {
    balance.saturating_sub(project(balance, rate, periods))
  } else {
    rate
      .mul_floor(balance)
      .saturating_mul(Balance::from(periods))
      .min(balance)
  }
}

/// Balance left after `periods` compounded releases.
pub fn project(balance: Balance, rate: Permill, periods: u32) -> Balance {
  let mut remaining = balance;
  for _ in 0..periods.min(MAX_PROJECTION_PERIODS) {
    let step = rate.mul_floor(remaining);
    if step == 0 {
      break;
    }
    remaining = remaining.saturating_sub(step);
  }
  remaining
}
