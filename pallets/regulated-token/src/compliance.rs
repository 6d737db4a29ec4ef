//! Modular compliance: an ordered registry of rule modules and the engine
//! that evaluates it against a proposed transfer.
//!
//! # Registry
//!
//! The registry is an ordered list of [`ModuleEntry`] values, each pairing a
//! [`ModuleKind`] with SCALE-encoded parameters. A module kind appears at most
//! once. Parameters are validated when the entry is registered and never
//! again at evaluation time.
//!
//! # Evaluation
//!
//! [`Pallet::can_transfer`] snapshots everything the modules may look at into
//! a [`TransferContext`] before the first module runs, then walks the registry
//! in insertion order and stops at the first rejection, reporting which module
//! refused. The result is the logical AND of all modules; module checks must
//! be free of side effects so evaluation order never changes the outcome.
//! Custom modules that keep state across calls break that contract and are
//! the runtime's responsibility.
//!
//! # Parameter encodings
//!
//! | Module             | Params (SCALE)        |
//! |--------------------|-----------------------|
//! | `CountryAllowList` | `Vec<CountryCode>`    |
//! | `CountryBlockList` | `Vec<CountryCode>`    |
//! | `MaxHolders`       | `u32`                 |
//! | `MaxBalance`       | `Balance`             |
//! | `SupplyLimit`      | `Balance`             |
//! | `Custom(id)`       | defined by the runtime|

use codec::{Decode, DecodeAll, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{ensure, traits::ConstU32, BoundedVec, PalletError};
use scale_info::TypeInfo;
use sp_runtime::{DispatchResult, RuntimeDebug};
use sp_std::{marker::PhantomData, prelude::*};

use crate::{
    hooks::TokenHooks,
    identity::IdentityRegistry,
    ledger::Ledger,
    types::{Balance, CountryCode},
    ComplianceModules, Config, Error, Event, HolderCount, Pallet, TotalSupply, Verification,
    LOG_TARGET,
};

/// Upper bound on the encoded parameters of a single module.
pub const MAX_MODULE_PARAMS_LEN: u32 = 256;

/// Encoded parameters of one registry entry.
pub type ModuleParams = BoundedVec<u8, ConstU32<MAX_MODULE_PARAMS_LEN>>;

/// Reference to a compliance module.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    Clone,
    Copy,
    PartialEq,
    Eq,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
    PalletError,
)]
pub enum ModuleKind {
    /// Recipient's country must be on the list.
    CountryAllowList,
    /// Recipient's country must not be on the list.
    CountryBlockList,
    /// Caps the number of accounts holding a non-zero balance.
    MaxHolders,
    /// Caps the balance any single recipient may reach.
    MaxBalance,
    /// Caps total supply reachable through minting.
    SupplyLimit,
    /// Runtime-provided module, resolved through [`CustomComplianceModules`].
    Custom(u8),
}

/// One entry of the compliance registry.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct ModuleEntry {
    pub module: ModuleKind,
    pub params: ModuleParams,
}

/// Outcome of evaluating the registry.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo)]
pub enum ComplianceDecision {
    Approved,
    Rejected { module: ModuleKind },
}

impl ComplianceDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, ComplianceDecision::Approved)
    }
}

/// State a module may base its decision on, read once per evaluation.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct TransferContext<AccountId> {
    /// `None` for mints.
    pub from: Option<AccountId>,
    pub to: AccountId,
    pub amount: Balance,
    pub from_balance: Balance,
    pub to_balance: Balance,
    pub total_supply: Balance,
    pub holder_count: u32,
    pub from_country: Option<CountryCode>,
    pub to_country: Option<CountryCode>,
}

impl<AccountId: PartialEq> TransferContext<AccountId> {
    pub fn is_mint(&self) -> bool {
        self.from.is_none()
    }

    fn is_self_transfer(&self) -> bool {
        self.from.as_ref() == Some(&self.to)
    }

    /// Holder count once the transfer has been applied.
    fn holder_count_after(&self) -> u32 {
        if self.amount == 0 || self.is_self_transfer() {
            return self.holder_count;
        }
        let mut count = self.holder_count;
        if self.to_balance == 0 {
            count = count.saturating_add(1);
        }
        if self.from.is_some() && self.from_balance == self.amount {
            count = count.saturating_sub(1);
        }
        count
    }
}

impl<T: Config> Pallet<T> {
    fn snapshot(
        from: Option<&T::AccountId>,
        to: &T::AccountId,
        amount: Balance,
    ) -> TransferContext<T::AccountId> {
        TransferContext {
            from: from.cloned(),
            to: to.clone(),
            amount,
            from_balance: from.map(Ledger::<T>::balance_of).unwrap_or_default(),
            to_balance: Ledger::<T>::balance_of(to),
            total_supply: TotalSupply::<T>::get(),
            holder_count: HolderCount::<T>::get(),
            from_country: from.and_then(T::Identity::country_of),
            to_country: T::Identity::country_of(to),
        }
    }
}

/// A rule evaluated against a proposed transfer.
pub trait ComplianceModule<AccountId> {
    /// Whether `params` is a well-formed configuration for this module.
    fn validate_config(params: &[u8]) -> bool;

    /// Whether the transfer described by `ctx` passes. Must not mutate state.
    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool;
}

/// Runtime-provided modules addressed by [`ModuleKind::Custom`].
pub trait CustomComplianceModules<AccountId> {
    fn validate_config(id: u8, params: &[u8]) -> bool;

    fn check(id: u8, ctx: &TransferContext<AccountId>, params: &[u8]) -> bool;
}

/// No custom modules: every `Custom` registration is refused.
impl<AccountId> CustomComplianceModules<AccountId> for () {
    fn validate_config(_id: u8, _params: &[u8]) -> bool {
        false
    }

    fn check(_id: u8, _ctx: &TransferContext<AccountId>, _params: &[u8]) -> bool {
        false
    }
}

fn decode_params<P: Decode>(params: &[u8]) -> Option<P> {
    P::decode_all(&mut &params[..]).ok()
}

fn decode_countries(params: &[u8]) -> Option<Vec<CountryCode>> {
    decode_params::<Vec<CountryCode>>(params).filter(|countries| !countries.is_empty())
}

fn decode_limit(params: &[u8]) -> Option<Balance> {
    decode_params::<Balance>(params).filter(|limit| *limit > 0)
}

pub struct CountryAllowList;

impl<AccountId> ComplianceModule<AccountId> for CountryAllowList {
    fn validate_config(params: &[u8]) -> bool {
        decode_countries(params).is_some()
    }

    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool {
        match (decode_countries(params), ctx.to_country) {
            (Some(allowed), Some(country)) => allowed.contains(&country),
            _ => false,
        }
    }
}

pub struct CountryBlockList;

impl<AccountId> ComplianceModule<AccountId> for CountryBlockList {
    fn validate_config(params: &[u8]) -> bool {
        decode_countries(params).is_some()
    }

    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool {
        let Some(blocked) = decode_countries(params) else { return false };
        ctx.to_country.map_or(true, |country| !blocked.contains(&country))
    }
}

pub struct MaxHolders;

impl<AccountId: PartialEq> ComplianceModule<AccountId> for MaxHolders {
    fn validate_config(params: &[u8]) -> bool {
        decode_params::<u32>(params).is_some_and(|limit| limit > 0)
    }

    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool {
        let Some(limit) = decode_params::<u32>(params) else { return false };
        // Only a transfer that adds a holder can breach the cap.
        let after = ctx.holder_count_after();
        after <= ctx.holder_count || after <= limit
    }
}

pub struct MaxBalance;

impl<AccountId: PartialEq> ComplianceModule<AccountId> for MaxBalance {
    fn validate_config(params: &[u8]) -> bool {
        decode_limit(params).is_some()
    }

    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool {
        let Some(limit) = decode_limit(params) else { return false };
        if ctx.is_self_transfer() {
            return true;
        }
        ctx.to_balance.checked_add(ctx.amount).is_some_and(|after| after <= limit)
    }
}

pub struct SupplyLimit;

impl<AccountId: PartialEq> ComplianceModule<AccountId> for SupplyLimit {
    fn validate_config(params: &[u8]) -> bool {
        decode_limit(params).is_some()
    }

    fn check(ctx: &TransferContext<AccountId>, params: &[u8]) -> bool {
        let Some(limit) = decode_limit(params) else { return false };
        if !ctx.is_mint() {
            return true;
        }
        ctx.total_supply.checked_add(ctx.amount).is_some_and(|after| after <= limit)
    }
}

impl ModuleKind {
    pub fn validate_config<T: Config>(&self, params: &[u8]) -> bool {
        match self {
            ModuleKind::CountryAllowList => {
                <CountryAllowList as ComplianceModule<T::AccountId>>::validate_config(params)
            },
            ModuleKind::CountryBlockList => {
                <CountryBlockList as ComplianceModule<T::AccountId>>::validate_config(params)
            },
            ModuleKind::MaxHolders => {
                <MaxHolders as ComplianceModule<T::AccountId>>::validate_config(params)
            },
            ModuleKind::MaxBalance => {
                <MaxBalance as ComplianceModule<T::AccountId>>::validate_config(params)
            },
            ModuleKind::SupplyLimit => {
                <SupplyLimit as ComplianceModule<T::AccountId>>::validate_config(params)
            },
            ModuleKind::Custom(id) => T::CustomModules::validate_config(*id, params),
        }
    }

    pub fn check<T: Config>(&self, ctx: &TransferContext<T::AccountId>, params: &[u8]) -> bool {
        match self {
            ModuleKind::CountryAllowList => CountryAllowList::check(ctx, params),
            ModuleKind::CountryBlockList => CountryBlockList::check(ctx, params),
            ModuleKind::MaxHolders => MaxHolders::check(ctx, params),
            ModuleKind::MaxBalance => MaxBalance::check(ctx, params),
            ModuleKind::SupplyLimit => SupplyLimit::check(ctx, params),
            ModuleKind::Custom(id) => T::CustomModules::check(*id, ctx, params),
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Evaluate the registry against a transfer (`from == None` for a mint).
    pub fn can_transfer(
        from: Option<&T::AccountId>,
        to: &T::AccountId,
        amount: Balance,
    ) -> ComplianceDecision {
        let modules = ComplianceModules::<T>::get();
        if modules.is_empty() {
            return ComplianceDecision::Approved;
        }
        let ctx = Self::snapshot(from, to, amount);
        for entry in modules.iter() {
            if !entry.module.check::<T>(&ctx, &entry.params) {
                log::debug!(
                    target: LOG_TARGET,
                    "{:?} rejected transfer of {} to {:?}",
                    entry.module,
                    amount,
                    to
                );
                return ComplianceDecision::Rejected { module: entry.module };
            }
        }
        ComplianceDecision::Approved
    }

    fn ensure_compliant(
        from: Option<&T::AccountId>,
        to: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        let settings = Verification::<T>::get();
        if settings.verify_sender {
            if let Some(from) = from {
                ensure!(T::Identity::is_verified(from), Error::<T>::SenderNotVerified);
            }
        }
        if settings.verify_recipient {
            ensure!(T::Identity::is_verified(to), Error::<T>::RecipientNotVerified);
        }
        match Self::can_transfer(from, to, amount) {
            ComplianceDecision::Approved => Ok(()),
            ComplianceDecision::Rejected { module } => {
                Err(Error::<T>::ComplianceRejected { module }.into())
            },
        }
    }

    pub(crate) fn do_add_compliance_module(
        module: ModuleKind,
        params: ModuleParams,
    ) -> DispatchResult {
        ComplianceModules::<T>::try_mutate(|modules| -> DispatchResult {
            ensure!(
                !modules.iter().any(|entry| entry.module == module),
                Error::<T>::DuplicateModule
            );
            ensure!(module.validate_config::<T>(&params), Error::<T>::InvalidModuleConfig);
            modules
                .try_push(ModuleEntry { module, params })
                .map_err(|_| Error::<T>::TooManyModules)?;
            Ok(())
        })?;
        Self::deposit_event(Event::ComplianceModuleAdded { module });
        Ok(())
    }

    pub(crate) fn do_remove_compliance_module(module: ModuleKind) -> DispatchResult {
        ComplianceModules::<T>::try_mutate(|modules| -> DispatchResult {
            let index = modules
                .iter()
                .position(|entry| entry.module == module)
                .ok_or(Error::<T>::ModuleNotFound)?;
            modules.remove(index);
            Ok(())
        })?;
        Self::deposit_event(Event::ComplianceModuleRemoved { module });
        Ok(())
    }

    pub(crate) fn do_replace_compliance_module(
        old: ModuleKind,
        new: ModuleKind,
        params: ModuleParams,
    ) -> DispatchResult {
        ComplianceModules::<T>::try_mutate(|modules| -> DispatchResult {
            let index = modules
                .iter()
                .position(|entry| entry.module == old)
                .ok_or(Error::<T>::ModuleNotFound)?;
            ensure!(
                new == old || !modules.iter().any(|entry| entry.module == new),
                Error::<T>::DuplicateModule
            );
            ensure!(new.validate_config::<T>(&params), Error::<T>::InvalidModuleConfig);
            modules[index] = ModuleEntry { module: new, params };
            Ok(())
        })?;
        Self::deposit_event(Event::ComplianceModuleReplaced { old, new });
        Ok(())
    }
}

/// Lifecycle hook running identity verification and the compliance engine
/// ahead of mints and transfers.
pub struct ComplianceGate<T>(PhantomData<T>);

impl<T: Config> TokenHooks<T> for ComplianceGate<T> {
    fn before_mint(to: &T::AccountId, amount: Balance) -> DispatchResult {
        Pallet::<T>::ensure_compliant(None, to, amount)
    }

    fn before_transfer(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
        Pallet::<T>::ensure_compliant(Some(from), to, amount)
    }
}
