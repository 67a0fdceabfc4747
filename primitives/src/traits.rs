//! Cross-pallet interfaces.
//!
//! The engine drives the endowment and the reward pools every cycle, and the endowment calls
//! back into the engine after each release. Keeping the contracts here lets each pallet be
//! wired to the others by the runtime without crate-level cycles.

use polkadot_sdk::sp_runtime::{DispatchError, DispatchResult};

/// A reward pool that accepts refills.
pub trait RewardNotifier<AccountId, Balance> {
  /// Account that must already hold the refill when `notify_reward` is called.
  fn reward_account() -> AccountId;

  /// Start (or extend) an emission period funded with `amount`.
  fn notify_reward(amount: Balance) -> DispatchResult;
}

/// A pool position that can be opened for the engine and never withdrawn.
pub trait PermanentStake<AccountId, Balance> {
  fn stake_permanent(who: &AccountId, amount: Balance) -> DispatchResult;

  /// Pay out the reward accrued by the permanent position, returning the amount paid.
  fn claim_permanent(who: &AccountId) -> Result<Balance, DispatchError>;
}

impl<AccountId, Balance: Default> PermanentStake<AccountId, Balance> for () {
  fn stake_permanent(_who: &AccountId, _amount: Balance) -> DispatchResult {
    Err(DispatchError::Other("PermanentStakeUnavailable"))
  }

  fn claim_permanent(_who: &AccountId) -> Result<Balance, DispatchError> {
    Ok(Balance::default())
  }
}

/// Reserve that releases funds to the engine on a schedule.
pub trait EndowmentSource<Balance> {
  /// Whether at least one full release period has elapsed.
  fn is_release_due() -> bool;

  /// Transfer every due release to the engine and return the amount moved.
  fn release_funds() -> Result<Balance, DispatchError>;
}

impl<Balance: Default> EndowmentSource<Balance> for () {
  fn is_release_due() -> bool {
    false
  }

  fn release_funds() -> Result<Balance, DispatchError> {
    Ok(Balance::default())
  }
}

/// Notification sent by the endowment after its transfer has completed.
pub trait OnEndowmentRelease<Balance> {
  fn on_endowment_release(amount: Balance) -> DispatchResult;
}

impl<Balance> OnEndowmentRelease<Balance> for () {
  fn on_endowment_release(_amount: Balance) -> DispatchResult {
    Ok(())
  }
}

/// Source of transfer tax accumulated since the previous collection.
pub trait TaxSource<AccountId, Balance> {
  /// Move all collectable tax to `to`, returning the amount moved.
  fn collect_tax(to: &AccountId) -> Result<Balance, DispatchError>;
}

impl<AccountId, Balance: Default> TaxSource<AccountId, Balance> for () {
  fn collect_tax(_to: &AccountId) -> Result<Balance, DispatchError> {
    Ok(Balance::default())
  }
}

/// Custody of membership NFTs staked into a pool.
pub trait NftCustody<AccountId> {
  fn owner(item: u32) -> Option<AccountId>;

  fn transfer(item: u32, from: &AccountId, to: &AccountId) -> DispatchResult;
}

impl<AccountId> NftCustody<AccountId> for () {
  fn owner(_item: u32) -> Option<AccountId> {
    None
  }

  fn transfer(_item: u32, _from: &AccountId, _to: &AccountId) -> DispatchResult {
    Err(DispatchError::Other("NftCustodyUnavailable"))
  }
}
