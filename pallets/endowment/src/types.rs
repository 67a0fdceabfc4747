use frame::prelude::*;

pub type Balance = u128;

/// Lifecycle and accounting of the reserve.
#[derive(
  Clone, Copy, Debug, Decode, Default, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct EndowmentState {
  /// Set once by `initialize`
  pub initialized: bool,
  /// Set once by `emergency_release`; no release is possible afterwards
  pub drained: bool,
  /// Start of the first period not yet released (unix seconds)
  pub last_release_time: u64,
  /// Wall-clock time of the last successful release or of initialization
  pub last_activity: u64,
  pub release_count: u32,
  pub total_released: Balance,
  /// Reserve not yet released. Starts at the initial reserve and only decays; anything
  /// else the pallet account holds is surplus
  pub current_balance: Balance,
}

/// What a release call made right now would do.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct ReleaseSuggestion {
  pub due_periods: u32,
  pub amount: Balance,
  /// Earliest time the next period becomes due
  pub next_release_at: u64,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct EndowmentHealth {
  pub initialized: bool,
  pub drained: bool,
  pub balance: Balance,
  /// Held by the pallet account on top of the reserve
  pub surplus: Balance,
  pub total_released: Balance,
  pub release_count: u32,
  pub due_periods: u32,
  pub seconds_until_next_release: u64,
  /// Remaining reserve in parts per million of the initial reserve
  pub remaining_ppm: u32,
  pub emergency_available: bool,
}

/// Reserve left after a number of releases.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct BalanceProjection {
  /// Periods actually applied, at most [`crate::decay::MAX_PROJECTION_PERIODS`]
  pub periods: u32,
  pub balance: Balance,
}
