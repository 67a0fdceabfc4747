//! Swap and liquidity provision for the liquidity share of a cycle.
//!
//! Half of the allocation is converted into the stable asset over a bounded number of
//! rounds. Each round tries half of what is still to convert; a failed round halves that
//! amount instead, so the loop always ends within the attempt budget. The proceeds are
//! then paired with the unconverted native side by walking [`LADDER`] until the router
//! accepts one rung.
//!
//! No step here can fail the cycle. Router errors are caught per round and per rung, and
//! whatever is not paired stays on the engine account for the next cycle.

use crate::{
  Config, Event, LOG_TARGET, LiquidityRouter, Pallet, SlippageTolerance, SwapLock,
  pallet::Error,
  types::{AssetKind, Balance, LiquidityOutcome, StrategyKind, UnutilizedReason},
};
use frame::deps::{
  frame_support::storage::with_storage_layer,
  sp_core::U256,
  sp_runtime::{DispatchError, Permill, traits::Zero},
};
use frame::prelude::*;
use primitives::{PermanentStake, ReentrancyGuard, params::MULTIPLIER_DIVISOR};

/// One attempt of the liquidity ladder, all values in basis points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderRung {
  pub kind: StrategyKind,
  /// Scale applied to the native side
  pub native_bps: u32,
  /// Scale applied to the stable side
  pub stable_bps: u32,
  /// Minimum the router must accept on each side, relative to the desired amount
  pub min_bps: u32,
}

pub const LADDER: [LadderRung; 4] = [
  LadderRung {
    kind: StrategyKind::Conservative,
    native_bps: 10_000,
    stable_bps: 10_000,
    min_bps: 8_000,
  },
  LadderRung {
    kind: StrategyKind::TokenHeavy,
    native_bps: 12_000,
    stable_bps: 10_000,
    min_bps: 5_000,
  },
  LadderRung {
    kind: StrategyKind::StableHeavy,
    native_bps: 10_000,
    stable_bps: 12_000,
    min_bps: 5_000,
  },
  LadderRung {
    kind: StrategyKind::Minimal,
    native_bps: 2_500,
    stable_bps: 2_500,
    min_bps: 250,
  },
];

impl LadderRung {
  /// Desired amounts for this rung, never above what the engine can spend.
  pub fn desired(
    &self,
    native: Balance,
    stable: Balance,
    native_cap: Balance,
    stable_cap: Balance,
  ) -> (Balance, Balance) {
    (
      scale_bps(native, self.native_bps).min(native_cap),
      scale_bps(stable, self.stable_bps).min(stable_cap),
    )
  }

  pub fn minimums(&self, native: Balance, stable: Balance) -> (Balance, Balance) {
    (scale_bps(native, self.min_bps), scale_bps(stable, self.min_bps))
  }
}

/// `amount * bps / 10_000`, rounded down.
pub fn scale_bps(amount: Balance, bps: u32) -> Balance {
  let scaled = U256::from(amount) * U256::from(bps) / U256::from(MULTIPLIER_DIVISOR);
  if scaled > U256::from(Balance::MAX) {
    Balance::MAX
  } else {
    scaled.as_u128()
  }
}

/// Smallest acceptable output for a quote under `tolerance`.
pub fn min_out(quote: Balance, tolerance: Permill) -> Balance {
  quote.saturating_sub(tolerance.mul_floor(quote))
}

impl<T: Config> Pallet<T> {
  /// Turn `allocation` of native into liquidity, keeping `reserved` native untouched.
  pub(crate) fn run_liquidity_strategy(
    allocation: Balance,
    reserved: Balance,
  ) -> LiquidityOutcome {
    let mut outcome = LiquidityOutcome::default();
    if allocation < T::DustThreshold::get() {
      Self::liquidity_unutilized(UnutilizedReason::DustAmount, allocation, 0);
      return outcome;
    }

    let (swapped_in, stable_received) = Self::swap_rounds(allocation / 2);
    outcome.swapped_in = swapped_in;
    outcome.stable_received = stable_received;
    let native_side = allocation.saturating_sub(swapped_in);
    if stable_received.is_zero() {
      Self::liquidity_unutilized(UnutilizedReason::NoSwapProceeds, native_side, 0);
      return outcome;
    }

    let native_cap = Self::native_balance().saturating_sub(reserved);
    match Self::provide_liquidity(native_side, stable_received, native_cap) {
      Some((kind, (native_used, stable_used, lp_minted))) => {
        outcome.native_used = native_used;
        outcome.stable_used = stable_used;
        outcome.lp_minted = lp_minted;
        outcome.strategy = Some(kind);
        Self::deposit_event(Event::LiquidityAdded {
          strategy: kind,
          native_used,
          stable_used,
          lp_minted,
        });
        Self::stake_lp(lp_minted);
      }
      None => Self::liquidity_unutilized(
        UnutilizedReason::AllStrategiesFailed,
        native_side,
        stable_received,
      ),
    }
    outcome
  }

  /// Convert up to `to_convert` native in halving rounds. Returns (native in, stable out).
  fn swap_rounds(to_convert: Balance) -> (Balance, Balance) {
    let mut remaining = to_convert;
    let mut swapped_in: Balance = 0;
    let mut received: Balance = 0;
    for round in 1..=T::MaxSwapAttempts::get() {
      let chunk = remaining / 2;
      if chunk.is_zero() {
        break;
      }
      match Self::try_swap(chunk) {
        Ok(amount_out) => {
          remaining = remaining.saturating_sub(chunk);
          swapped_in = swapped_in.saturating_add(chunk);
          received = received.saturating_add(amount_out);
          Self::deposit_event(Event::SwapExecuted {
            round,
            amount_in: chunk,
            amount_out,
          });
        }
        Err(error) => {
          log::debug!(
            target: LOG_TARGET,
            "swap round {round} of {chunk} failed: {error:?}, halving"
          );
          remaining = chunk;
          Self::deposit_event(Event::SwapFailed {
            round,
            amount_in: chunk,
            error,
          });
        }
      }
    }
    (swapped_in, received)
  }

  fn try_swap(amount_in: Balance) -> Result<Balance, DispatchError> {
    let _swap = ReentrancyGuard::<SwapLock<T>>::acquire().ok_or(Error::<T>::Reentrancy)?;
    let engine = Self::account_id();
    let stable = T::StableAsset::get();
    let quote =
      T::Router::quote(AssetKind::Native, stable, amount_in).ok_or(Error::<T>::QuoteUnavailable)?;
    let amount_out_min = min_out(quote, SlippageTolerance::<T>::get());
    ensure!(!amount_out_min.is_zero(), Error::<T>::QuoteUnavailable);

    let result = with_storage_layer(|| {
      T::Router::approve(&engine, AssetKind::Native, amount_in)?;
      T::Router::swap_exact_tokens_for_tokens(
        &engine,
        AssetKind::Native,
        stable,
        amount_in,
        amount_out_min,
      )
    });
    Self::revoke_approval(&engine, AssetKind::Native);
    result
  }

  /// Walk the ladder until one rung is accepted.
  fn provide_liquidity(
    native: Balance,
    stable: Balance,
    native_cap: Balance,
  ) -> Option<(StrategyKind, (Balance, Balance, Balance))> {
    let engine = Self::account_id();
    let stable_asset = T::StableAsset::get();
    let stable_cap = Self::asset_balance(stable_asset);

    for rung in LADDER.iter() {
      let (native_desired, stable_desired) = rung.desired(native, stable, native_cap, stable_cap);
      if native_desired.is_zero() || stable_desired.is_zero() {
        continue;
      }
      let (native_min, stable_min) = rung.minimums(native_desired, stable_desired);
      let result = with_storage_layer(|| {
        T::Router::approve(&engine, AssetKind::Native, native_desired)?;
        T::Router::approve(&engine, stable_asset, stable_desired)?;
        T::Router::add_liquidity(
          &engine,
          AssetKind::Native,
          stable_asset,
          native_desired,
          stable_desired,
          native_min,
          stable_min,
        )
      });
      Self::revoke_approval(&engine, AssetKind::Native);
      Self::revoke_approval(&engine, stable_asset);

      match result {
        Ok(added) => return Some((rung.kind, added)),
        Err(error) => {
          log::debug!(
            target: LOG_TARGET,
            "{:?} liquidity attempt rejected: {error:?}",
            rung.kind
          );
          Self::deposit_event(Event::LiquidityAttemptFailed {
            strategy: rung.kind,
            error,
          });
        }
      }
    }
    None
  }

  fn revoke_approval(engine: &T::AccountId, asset: AssetKind) {
    if let Err(error) = T::Router::approve(engine, asset, 0) {
      log::warn!(
        target: LOG_TARGET,
        "failed to revoke router approval for {asset:?}: {error:?}"
      );
    }
  }

  /// Lock freshly minted LP shares in the engine's permanent position.
  fn stake_lp(lp_minted: Balance) {
    if lp_minted.is_zero() {
      return;
    }
    if let Err(error) = T::LpPool::stake_permanent(&Self::account_id(), lp_minted) {
      log::warn!(
        target: LOG_TARGET,
        "staking {lp_minted} LP shares failed: {error:?}"
      );
      Self::deposit_event(Event::LpStakeFailed {
        amount: lp_minted,
        error,
      });
    }
  }

  fn liquidity_unutilized(reason: UnutilizedReason, native: Balance, stable: Balance) {
    log::debug!(
      target: LOG_TARGET,
      "liquidity left on engine ({reason:?}): {native} native, {stable} stable"
    );
    Self::deposit_event(Event::LiquidityUnutilized {
      reason,
      native_held: native,
      stable_held: stable,
    });
  }
}
