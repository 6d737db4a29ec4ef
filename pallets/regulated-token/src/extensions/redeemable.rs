//! Self-service redemption: holders burn their own tokens.

use frame_support::{ensure, traits::Get};
use sp_runtime::DispatchResult;

use crate::{hooks::TokenHooks, ledger::Ledger, types::Balance, Config, Error, Event, Pallet};

impl<T: Config> Pallet<T> {
    /// Burn `amount` of the owner's tokens through the redeem hooks.
    ///
    /// A zero amount burns nothing; whether that is accepted is decided by
    /// `Config::AllowZeroRedemption`.
    pub(crate) fn do_redeem(owner: T::AccountId, amount: Balance) -> DispatchResult {
        T::Extensions::before_redeem(&owner, amount)?;
        ensure!(amount > 0 || T::AllowZeroRedemption::get(), Error::<T>::NothingToRedeem);
        Ledger::<T>::burn(&owner, amount)?;
        T::Extensions::after_redeem(&owner, amount)?;
        Self::deposit_event(Event::Redeemed { owner, amount });
        Ok(())
    }

    /// Redeem the owner's whole balance, read once before the hooks run.
    pub(crate) fn do_redeem_all(owner: T::AccountId) -> DispatchResult {
        let balance = Ledger::<T>::balance_of(&owner);
        Self::do_redeem(owner, balance)
    }
}
