//! Base value ledger: balances, total supply and holder count.
//!
//! Only reached from the lifecycle sequences in [`crate::hooks`] and from
//! forced recovery, after every gate has passed. Zero balances are removed
//! from storage so an untouched account and an emptied one look the same.

use frame_support::ensure;
use sp_runtime::DispatchResult;
use sp_std::marker::PhantomData;

use crate::{types::Balance, Balances, Config, Error, HolderCount, TotalSupply};

pub struct Ledger<T>(PhantomData<T>);

impl<T: Config> Ledger<T> {
    pub fn balance_of(who: &T::AccountId) -> Balance {
        Balances::<T>::get(who)
    }

    pub fn mint(to: &T::AccountId, amount: Balance) -> DispatchResult {
        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let balance = Self::balance_of(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;
        TotalSupply::<T>::put(supply);
        Self::set_balance(to, balance);
        Ok(())
    }

    pub fn burn(from: &T::AccountId, amount: Balance) -> DispatchResult {
        let balance = Self::balance_of(from);
        ensure!(balance >= amount, Error::<T>::InsufficientBalance);
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_sub(amount));
        Self::set_balance(from, balance - amount);
        Ok(())
    }

    pub fn transfer(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
        let from_balance = Self::balance_of(from);
        ensure!(from_balance >= amount, Error::<T>::InsufficientBalance);
        if from == to {
            return Ok(());
        }
        let to_balance = Self::balance_of(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;
        Self::set_balance(from, from_balance - amount);
        Self::set_balance(to, to_balance);
        Ok(())
    }

    fn set_balance(who: &T::AccountId, new: Balance) {
        let old = Balances::<T>::get(who);
        match (old == 0, new == 0) {
            (true, false) => HolderCount::<T>::mutate(|count| *count = count.saturating_add(1)),
            (false, true) => HolderCount::<T>::mutate(|count| *count = count.saturating_sub(1)),
            _ => {},
        }
        if new == 0 {
            Balances::<T>::remove(who);
        } else {
            Balances::<T>::insert(who, new);
        }
    }
}
