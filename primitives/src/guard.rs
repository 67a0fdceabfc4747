//! Scoped re-entrancy guard backed by a boolean storage flag.

use core::marker::PhantomData;
use polkadot_sdk::frame_support::storage::StorageValue;

/// Holds `S` at `true` for as long as the guard lives.
///
/// The flag is cleared on drop, so every exit path of the guarded call (early return, `?`
/// propagation or normal completion) releases it.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ReentrancyGuard<S: StorageValue<bool, Query = bool>>(PhantomData<S>);

impl<S: StorageValue<bool, Query = bool>> ReentrancyGuard<S> {
  /// Take the lock, or `None` if it is already held.
  pub fn acquire() -> Option<Self> {
    if S::get() {
      return None;
    }
    S::put(true);
    Some(Self(PhantomData))
  }

  pub fn is_held() -> bool {
    S::get()
  }
}

impl<S: StorageValue<bool, Query = bool>> Drop for ReentrancyGuard<S> {
  fn drop(&mut self) {
    S::kill();
  }
}
