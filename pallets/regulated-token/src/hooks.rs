//! Lifecycle hooks around value-mutating token operations.
//!
//! Extensions implement [`TokenHooks`] and are composed by the runtime as a
//! tuple in `Config::Extensions`. Tuple members run in declaration order; the first
//! failing `before_*` aborts the operation before the ledger is touched and
//! before any later hook runs.
//!
//! ```ignore
//! type Extensions = (
//!     pallet_regulated_token::Pausable<Runtime>,
//!     pallet_regulated_token::Custodian<Runtime>,
//!     pallet_regulated_token::ComplianceGate<Runtime>,
//! );
//! ```
//!
//! `after_*` hooks are for bookkeeping. A failing `after_*` reverts the whole
//! call, ledger mutation included, so it must only fail on broken invariants.

use sp_runtime::DispatchResult;

use crate::{ledger::Ledger, types::Balance, Config, Event, Pallet};

pub trait TokenHooks<T: Config> {
    fn before_mint(_to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn after_mint(_to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn before_transfer(_from: &T::AccountId, _to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn after_transfer(_from: &T::AccountId, _to: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn before_burn(_from: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn after_burn(_from: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn before_redeem(_owner: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }

    fn after_redeem(_owner: &T::AccountId, _amount: Balance) -> DispatchResult {
        Ok(())
    }
}

impl<T: Config> TokenHooks<T> for () {}

macro_rules! impl_token_hooks_for_tuple {
    ( $( $hook:ident ),+ ) => {
        impl<T: Config, $( $hook: TokenHooks<T> ),+> TokenHooks<T> for ( $( $hook, )+ ) {
            fn before_mint(to: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::before_mint(to, amount)?; )+
                Ok(())
            }

            fn after_mint(to: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::after_mint(to, amount)?; )+
                Ok(())
            }

            fn before_transfer(
                from: &T::AccountId,
                to: &T::AccountId,
                amount: Balance,
            ) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::before_transfer(from, to, amount)?; )+
                Ok(())
            }

            fn after_transfer(
                from: &T::AccountId,
                to: &T::AccountId,
                amount: Balance,
            ) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::after_transfer(from, to, amount)?; )+
                Ok(())
            }

            fn before_burn(from: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::before_burn(from, amount)?; )+
                Ok(())
            }

            fn after_burn(from: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::after_burn(from, amount)?; )+
                Ok(())
            }

            fn before_redeem(owner: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::before_redeem(owner, amount)?; )+
                Ok(())
            }

            fn after_redeem(owner: &T::AccountId, amount: Balance) -> DispatchResult {
                $( <$hook as TokenHooks<T>>::after_redeem(owner, amount)?; )+
                Ok(())
            }
        }
    };
}

impl_token_hooks_for_tuple!(A);
impl_token_hooks_for_tuple!(A, B);
impl_token_hooks_for_tuple!(A, B, C);
impl_token_hooks_for_tuple!(A, B, C, D);
impl_token_hooks_for_tuple!(A, B, C, D, E);
impl_token_hooks_for_tuple!(A, B, C, D, E, F);
impl_token_hooks_for_tuple!(A, B, C, D, E, F, G);
impl_token_hooks_for_tuple!(A, B, C, D, E, F, G, H);

// Gates come first so a paused token reports `TokenPaused` whatever the amount.
// Each sequence performs exactly one ledger mutation, which still refuses to
// move more than the balance.
impl<T: Config> Pallet<T> {
    pub(crate) fn do_mint(to: T::AccountId, amount: Balance) -> DispatchResult {
        T::Extensions::before_mint(&to, amount)?;
        Ledger::<T>::mint(&to, amount)?;
        T::Extensions::after_mint(&to, amount)?;
        Self::deposit_event(Event::Minted { to, amount });
        Ok(())
    }

    pub(crate) fn do_transfer(
        from: T::AccountId,
        to: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        T::Extensions::before_transfer(&from, &to, amount)?;
        Ledger::<T>::transfer(&from, &to, amount)?;
        T::Extensions::after_transfer(&from, &to, amount)?;
        Self::deposit_event(Event::Transferred { from, to, amount });
        Ok(())
    }

    pub(crate) fn do_burn(from: T::AccountId, amount: Balance) -> DispatchResult {
        T::Extensions::before_burn(&from, amount)?;
        Ledger::<T>::burn(&from, amount)?;
        T::Extensions::after_burn(&from, amount)?;
        Self::deposit_event(Event::Burned { from, amount });
        Ok(())
    }
}
