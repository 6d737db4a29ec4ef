//! Global halt of every value-mutating operation.

use frame_support::ensure;
use sp_runtime::DispatchResult;
use sp_std::marker::PhantomData;

use crate::{hooks::TokenHooks, types::Balance, Config, Error, Event, Pallet, Paused};

impl<T: Config> Pallet<T> {
    pub(crate) fn do_pause(sender: T::AccountId) -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::AlreadyPaused);
        Paused::<T>::put(true);
        Self::deposit_event(Event::Paused { sender });
        Ok(())
    }

    pub(crate) fn do_unpause(sender: T::AccountId) -> DispatchResult {
        ensure!(Paused::<T>::get(), Error::<T>::NotPaused);
        Paused::<T>::put(false);
        Self::deposit_event(Event::Unpaused { sender });
        Ok(())
    }
}

/// Rejects mint, transfer, burn and redeem with `TokenPaused` while paused.
pub struct Pausable<T>(PhantomData<T>);

impl<T: Config> Pausable<T> {
    fn ensure_not_paused() -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::TokenPaused);
        Ok(())
    }
}

impl<T: Config> TokenHooks<T> for Pausable<T> {
    fn before_mint(_to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Self::ensure_not_paused()
    }

    fn before_transfer(_from: &T::AccountId, _to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Self::ensure_not_paused()
    }

    fn before_burn(_from: &T::AccountId, _amount: Balance) -> DispatchResult {
        Self::ensure_not_paused()
    }

    fn before_redeem(_owner: &T::AccountId, _amount: Balance) -> DispatchResult {
        Self::ensure_not_paused()
    }
}
