//! Custodial controls: full and partial freezes, and forced recovery of a
//! lost account.
//!
//! Every account's `frozen_amount` stays at or below its ledger balance.
//! Freezing more than the balance fails, and so does any transfer, burn or
//! redemption that would dip into frozen tokens. Frozen tokens leave an account
//! only through `unfreeze_partial_tokens` or forced recovery.

use frame_support::ensure;
use sp_runtime::DispatchResult;
use sp_std::marker::PhantomData;

use crate::{
    hooks::TokenHooks,
    ledger::Ledger,
    types::{Balance, FreezeRecord},
    Config, Error, Event, Freezes, Pallet, LOG_TARGET,
};

impl<T: Config> Pallet<T> {
    /// Freeze record of `who`, default when none is stored.
    pub fn freeze_record_of(who: &T::AccountId) -> FreezeRecord {
        Freezes::<T>::get(who).unwrap_or_default()
    }

    /// Balance `who` may still move.
    pub fn available_balance(who: &T::AccountId) -> Balance {
        Self::freeze_record_of(who).available(Ledger::<T>::balance_of(who))
    }

    fn store_freeze_record(who: &T::AccountId, record: FreezeRecord) {
        if record.is_empty() {
            Freezes::<T>::remove(who);
        } else {
            Freezes::<T>::insert(who, record);
        }
    }

    pub(crate) fn do_freeze_address(account: T::AccountId, frozen: bool) -> DispatchResult {
        let mut record = Self::freeze_record_of(&account);
        record.is_fully_frozen = frozen;
        if !frozen {
            // The balance may have moved underneath the record while frozen.
            let balance = Ledger::<T>::balance_of(&account);
            if record.frozen_amount > balance {
                log::warn!(
                    target: LOG_TARGET,
                    "resyncing frozen amount of {account:?} from {} to {balance}",
                    record.frozen_amount
                );
                record.frozen_amount = balance;
            }
        }
        Self::store_freeze_record(&account, record);
        Self::deposit_event(Event::AddressFrozen { account, is_frozen: frozen });
        Ok(())
    }

    pub(crate) fn do_freeze_partial_tokens(account: T::AccountId, amount: Balance) -> DispatchResult {
        let mut record = Self::freeze_record_of(&account);
        let frozen = record
            .frozen_amount
            .checked_add(amount)
            .ok_or(Error::<T>::InsufficientFreeBalance)?;
        ensure!(frozen <= Ledger::<T>::balance_of(&account), Error::<T>::InsufficientFreeBalance);
        record.frozen_amount = frozen;
        Self::store_freeze_record(&account, record);
        Self::deposit_event(Event::TokensFrozen { account, amount });
        Ok(())
    }

    pub(crate) fn do_unfreeze_partial_tokens(
        account: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        let mut record = Self::freeze_record_of(&account);
        ensure!(amount <= record.frozen_amount, Error::<T>::InsufficientFrozenBalance);
        record.frozen_amount -= amount;
        Self::store_freeze_record(&account, record);
        Self::deposit_event(Event::TokensUnfrozen { account, amount });
        Ok(())
    }

    /// Move the whole balance and freeze state of `lost` to `new`.
    ///
    /// Administrative migration: the lifecycle hooks are not consulted, so it
    /// works while paused and is not subject to compliance modules.
    pub(crate) fn do_forced_recovery(lost: T::AccountId, new: T::AccountId) -> DispatchResult {
        ensure!(lost != new, Error::<T>::InvalidRecoveryTarget);
        let balance = Ledger::<T>::balance_of(&lost);
        ensure!(balance > 0, Error::<T>::NothingToRecover);

        let lost_record = Freezes::<T>::take(&lost).unwrap_or_default();
        let mut new_record = Self::freeze_record_of(&new);
        new_record.is_fully_frozen |= lost_record.is_fully_frozen;
        new_record.frozen_amount = new_record
            .frozen_amount
            .checked_add(lost_record.frozen_amount)
            .ok_or(Error::<T>::Overflow)?;

        Ledger::<T>::transfer(&lost, &new, balance)?;
        Self::store_freeze_record(&new, new_record);

        Self::deposit_event(Event::RecoverySuccess { lost_account: lost, new_account: new });
        Ok(())
    }
}

/// Enforces available balance on transfers, burns and redemptions.
pub struct Custodian<T>(PhantomData<T>);

impl<T: Config> Custodian<T> {
    fn ensure_available(who: &T::AccountId, amount: Balance) -> DispatchResult {
        let balance = Ledger::<T>::balance_of(who);
        ensure!(amount <= balance, Error::<T>::InsufficientBalance);
        ensure!(
            amount <= Pallet::<T>::freeze_record_of(who).available(balance),
            Error::<T>::InsufficientAvailableBalance
        );
        Ok(())
    }
}

impl<T: Config> TokenHooks<T> for Custodian<T> {
    fn before_transfer(from: &T::AccountId, _to: &T::AccountId, amount: Balance) -> DispatchResult {
        Self::ensure_available(from, amount)
    }

    // Burning frozen tokens would leave the record above the balance.
    fn before_burn(from: &T::AccountId, amount: Balance) -> DispatchResult {
        Self::ensure_available(from, amount)
    }

    fn before_redeem(owner: &T::AccountId, amount: Balance) -> DispatchResult {
        Self::ensure_available(owner, amount)
    }
}
