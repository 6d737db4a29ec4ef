//! Authorization hooks for privileged token actions.
//!
//! Every privileged call maps to one [`Permission`] and asks the runtime's
//! [`AccessControl`] strategy whether the signed caller holds it. The hooks
//! fail closed: a refused caller gets [`Error::Unauthorized`], there is no
//! boolean to forget to check.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::traits::Get;
use frame_system::{ensure_signed, pallet_prelude::OriginFor};
use scale_info::TypeInfo;
use sp_runtime::{DispatchError, RuntimeDebug};
use sp_std::marker::PhantomData;

use crate::{Config, Error, Pallet, LOG_TARGET};

/// Privileged actions guarded by an authorization hook.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum Permission {
    UpdateTokenSettings,
    UpdateComplianceSettings,
    UpdateVerificationSettings,
    Mint,
    Burn,
    Pause,
    Freeze,
    Recovery,
}

/// Access-control strategy consulted by the authorization hooks.
///
/// Role assignments live outside this pallet; the strategy is asked again on
/// every call and its answer is never cached.
pub trait AccessControl<AccountId> {
    fn has_permission(who: &AccountId, permission: Permission) -> bool;

    /// An account holding `permission`, used to build benchmark origins.
    #[cfg(feature = "runtime-benchmarks")]
    fn privileged_account(permission: Permission) -> Option<AccountId>;
}

/// Grants every permission to a single configured account.
pub struct AdminOnly<Admin>(PhantomData<Admin>);

impl<AccountId: PartialEq, Admin: Get<AccountId>> AccessControl<AccountId> for AdminOnly<Admin> {
    fn has_permission(who: &AccountId, _permission: Permission) -> bool {
        *who == Admin::get()
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn privileged_account(_permission: Permission) -> Option<AccountId> {
        Some(Admin::get())
    }
}

impl<T: Config> Pallet<T> {
    /// Resolve the signed caller and require `permission` from the strategy.
    pub(crate) fn ensure_permission(
        origin: OriginFor<T>,
        permission: Permission,
    ) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        if !T::AccessControl::has_permission(&who, permission) {
            log::debug!(target: LOG_TARGET, "{who:?} lacks {permission:?}");
            return Err(Error::<T>::Unauthorized.into());
        }
        Ok(who)
    }

    pub fn authorize_update_token_settings(
        origin: OriginFor<T>,
    ) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::UpdateTokenSettings)
    }

    pub fn authorize_update_compliance_settings(
        origin: OriginFor<T>,
    ) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::UpdateComplianceSettings)
    }

    pub fn authorize_update_verification_settings(
        origin: OriginFor<T>,
    ) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::UpdateVerificationSettings)
    }

    pub fn authorize_mint(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::Mint)
    }

    pub fn authorize_burn(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::Burn)
    }

    pub fn authorize_pause(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::Pause)
    }

    pub fn authorize_freeze(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::Freeze)
    }

    pub fn authorize_recovery(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        Self::ensure_permission(origin, Permission::Recovery)
    }
}
