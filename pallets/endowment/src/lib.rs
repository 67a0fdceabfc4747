//! Endowment Pallet
//!
//! Bounded reserve that drips into the perpetual engine forever. Every release period frees
//! a fixed fraction of the *remaining* balance, so the reserve decays geometrically and is
//! never exhausted by regular releases.
//!
//! Lifecycle: `Uninitialized -> Active`. The only way out of `Active` is the emergency
//! release, which drains the reserve to the recovery account after a long silence.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod decay;
pub mod types;
pub mod weights;

pub use types::*;
pub use weights::WeightInfo;

const LOG_TARGET: &str = "runtime::endowment";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn ensure_funded(who: &AccountId, amount: Balance) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::*;
  use frame::deps::{
    frame_support::{
      storage::with_storage_layer,
      traits::{
        ConstBool, UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        tokens::Preservation,
      },
    },
    sp_runtime::{
      DispatchError, Permill,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{EndowmentSource, OnEndowmentRelease};

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Native token held in reserve
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Wall clock, sampled once per call
    type TimeProvider: UnixTime;

    /// Pallet ID; its account holds the reserve
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Receiver of every regular release
    type EngineAccount: Get<Self::AccountId>;

    /// Receiver of the emergency release
    type RecoveryAccount: Get<Self::AccountId>;

    /// Reserve that must be held before initialization
    #[pallet::constant]
    type InitialReserve: Get<Balance>;

    /// Length of one release period in seconds
    #[pallet::constant]
    type ReleaseInterval: Get<u64>;

    /// Fraction of the remaining balance released per period
    #[pallet::constant]
    type ReleaseRate: Get<Permill>;

    /// Overdue periods settled by a single call at most
    #[pallet::constant]
    type MaxPeriodsPerRelease: Get<u32>;

    /// A balance below this is released in full
    #[pallet::constant]
    type DustThreshold: Get<Balance>;

    /// Silence after which the reserve may be drained to the recovery account
    #[pallet::constant]
    type EmergencyDelay: Get<u64>;

    /// Told about each completed release; failures are logged and ignored
    type OnRelease: OnEndowmentRelease<Balance>;

    /// Origin that can perform governance operations
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::storage]
  #[pallet::getter(fn state)]
  pub type State<T: Config> = StorageValue<_, EndowmentState, ValueQuery>;

  /// Whether catch-up releases compound period by period (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn compounding_enabled)]
  pub type CompoundingEnabled<T: Config> = StorageValue<_, bool, ValueQuery, ConstBool<true>>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Reserve sealed and the release clock started
    Initialized { reserve: Balance, start: u64 },
    /// Funds moved to the engine
    FundsReleased {
      amount: Balance,
      periods: u32,
      remaining: Balance,
    },
    /// The remaining dust was swept out in full
    DustSwept { amount: Balance },
    /// The engine did not accept the release notification; the transfer stands
    ReleaseNotificationFailed { amount: Balance, error: DispatchError },
    /// Reserve drained to the recovery account
    EmergencyReleased { amount: Balance, to: T::AccountId },
    /// Compounding toggle updated
    CompoundingUpdated { old_enabled: bool, new_enabled: bool },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Initialization already happened
    AlreadyInitialized,
    /// The endowment has not been initialized
    NotInitialized,
    /// The pallet account holds less than the initial reserve
    ReserveMismatch,
    /// No full period has elapsed since the last release
    ReleaseNotDue,
    /// The emergency delay has not elapsed since the last activity
    EmergencyDelayNotElapsed,
    /// The reserve was drained by an emergency release
    Drained,
    /// Caller is not the engine account
    NotEngine,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Seal the reserve and start the release clock.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::initialize())]
    pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let mut state = State::<T>::get();
      ensure!(!state.initialized, Error::<T>::AlreadyInitialized);
      let reserve = T::InitialReserve::get();
      ensure!(Self::held() >= reserve, Error::<T>::ReserveMismatch);

      let start = Self::now();
      state.initialized = true;
      state.current_balance = reserve;
      state.last_release_time = start;
      state.last_activity = start;
      State::<T>::put(state);

      Self::deposit_event(Event::Initialized { reserve, start });
      Ok(())
    }

    /// Release every due period to the engine. Engine only.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::release_funds())]
    pub fn release_funds(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(who == T::EngineAccount::get(), Error::<T>::NotEngine);
      Self::do_release().map(|_| ())
    }

    /// Drain the pallet account, reserve and surplus, to the recovery account after
    /// `EmergencyDelay` without a release.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::emergency_release())]
    pub fn emergency_release(origin: OriginFor<T>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let mut state = State::<T>::get();
      ensure!(state.initialized, Error::<T>::NotInitialized);
      ensure!(!state.drained, Error::<T>::Drained);
      ensure!(Self::emergency_available(&state), Error::<T>::EmergencyDelayNotElapsed);

      state.drained = true;
      state.current_balance = 0;
      State::<T>::put(state);
      let to = T::RecoveryAccount::get();
      let amount = Self::held();
      if !amount.is_zero() {
        T::Currency::transfer(&Self::account_id(), &to, amount, Preservation::Expendable)?;
      }

      log::warn!(target: LOG_TARGET, "emergency release of {amount} to recovery");
      Self::deposit_event(Event::EmergencyReleased { amount, to });
      Ok(())
    }

    /// Switch between per-period compounding and linear catch-up (governance only)
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_compounding())]
    pub fn set_compounding(origin: OriginFor<T>, enabled: bool) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let old_enabled = CompoundingEnabled::<T>::get();
      CompoundingEnabled::<T>::put(enabled);
      Self::deposit_event(Event::CompoundingUpdated {
        old_enabled,
        new_enabled: enabled,
      });
      Ok(())
    }
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn integrity_test() {
      assert!(T::ReleaseInterval::get() > 0, "release interval must be non-zero");
      assert!(
        T::ReleaseRate::get()
          .deconstruct()
          .saturating_mul(T::MaxPeriodsPerRelease::get())
          < 1_000_000,
        "a capped catch-up must not be able to release the whole reserve"
      );
      assert!(
        T::EmergencyDelay::get() > T::ReleaseInterval::get(),
        "emergency delay must exceed the release interval"
      );
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Reserve not yet released.
    pub fn balance() -> Balance {
      State::<T>::get().current_balance
    }

    /// Everything the pallet account holds, surplus included.
    pub fn held() -> Balance {
      T::Currency::balance(&Self::account_id())
    }

    fn now() -> u64 {
      T::TimeProvider::now().as_secs()
    }

    fn due_periods(state: &EndowmentState, now: u64) -> u32 {
      decay::due_periods(
        now.saturating_sub(state.last_release_time),
        T::ReleaseInterval::get(),
        T::MaxPeriodsPerRelease::get(),
      )
    }

    fn emergency_available(state: &EndowmentState) -> bool {
      Self::now() >= state.last_activity.saturating_add(T::EmergencyDelay::get())
    }

    /// Amount a release of `periods` periods would move out of `balance`.
    fn release_for(balance: Balance, periods: u32) -> Balance {
      if balance < T::DustThreshold::get() {
        return balance;
      }
      decay::release_amount(
        balance,
        T::ReleaseRate::get(),
        periods,
        CompoundingEnabled::<T>::get(),
      )
    }

    fn do_release() -> Result<Balance, DispatchError> {
      let mut state = State::<T>::get();
      ensure!(state.initialized, Error::<T>::NotInitialized);
      ensure!(!state.drained, Error::<T>::Drained);
      let now = Self::now();
      let periods = Self::due_periods(&state, now);
      ensure!(periods > 0, Error::<T>::ReleaseNotDue);

      let balance = state.current_balance;
      let amount = Self::release_for(balance, periods).min(balance);
      state.current_balance = balance.saturating_sub(amount);
      state.last_release_time = state
        .last_release_time
        .saturating_add(u64::from(periods).saturating_mul(T::ReleaseInterval::get()));
      state.last_activity = now;
      state.release_count = state.release_count.saturating_add(1);
      state.total_released = state
        .total_released
        .saturating_add(amount)
        .min(T::InitialReserve::get());
      State::<T>::put(state);

      if !amount.is_zero() {
        T::Currency::transfer(
          &Self::account_id(),
          &T::EngineAccount::get(),
          amount,
          Preservation::Expendable,
        )?;
      }
      let remaining = state.current_balance;
      if balance < T::DustThreshold::get() {
        Self::deposit_event(Event::DustSwept { amount });
      }
      Self::deposit_event(Event::FundsReleased {
        amount,
        periods,
        remaining,
      });

      // The transfer above is final; the notification is best effort.
      if let Err(error) = with_storage_layer(|| T::OnRelease::on_endowment_release(amount)) {
        log::warn!(
          target: LOG_TARGET,
          "release notification for {amount} failed: {error:?}"
        );
        Self::deposit_event(Event::ReleaseNotificationFailed { amount, error });
      }
      Ok(amount)
    }

    /// What a release made now would move.
    pub fn suggest_optimal_release() -> ReleaseSuggestion {
      let state = State::<T>::get();
      let now = Self::now();
      let due_periods = if state.initialized && !state.drained {
        Self::due_periods(&state, now)
      } else {
        0
      };
      let amount = if due_periods > 0 {
        let balance = Self::balance();
        Self::release_for(balance, due_periods).min(balance)
      } else {
        0
      };
      ReleaseSuggestion {
        due_periods,
        amount,
        next_release_at: state
          .last_release_time
          .saturating_add(T::ReleaseInterval::get()),
      }
    }

    /// Reserve left after `periods` more releases at the current rate. Requests longer than
    /// [`decay::MAX_PROJECTION_PERIODS`] are clamped, and the result reports the periods applied.
    pub fn project_future_balance(periods: u32) -> BalanceProjection {
      let periods = periods.min(decay::MAX_PROJECTION_PERIODS);
      BalanceProjection {
        periods,
        balance: decay::project(Self::balance(), T::ReleaseRate::get(), periods),
      }
    }

    pub fn health_check() -> EndowmentHealth {
      let state = State::<T>::get();
      let now = Self::now();
      let balance = state.current_balance;
      let next_release_at = state
        .last_release_time
        .saturating_add(T::ReleaseInterval::get());
      let active = state.initialized && !state.drained;
      EndowmentHealth {
        initialized: state.initialized,
        drained: state.drained,
        balance,
        surplus: Self::held().saturating_sub(balance),
        total_released: state.total_released,
        release_count: state.release_count,
        due_periods: if active { Self::due_periods(&state, now) } else { 0 },
        seconds_until_next_release: next_release_at.saturating_sub(now),
        remaining_ppm: Permill::from_rational(balance, T::InitialReserve::get().max(1))
          .deconstruct(),
        emergency_available: active && Self::emergency_available(&state),
      }
    }
  }

  impl<T: Config> EndowmentSource<Balance> for Pallet<T> {
    fn is_release_due() -> bool {
      let state = State::<T>::get();
      state.initialized && !state.drained && Self::due_periods(&state, Self::now()) > 0
    }

    fn release_funds() -> Result<Balance, DispatchError> {
      with_storage_layer(Self::do_release)
    }
  }

  /// Genesis configuration: keeps the pallet account alive without an existential deposit
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
