//! # Regulated Token Pallet
//!
//! A token for regulated assets whose gating logic is composed rather than
//! hard-coded:
//!
//! - **Authorization hooks** ([`authorization`]): every privileged call maps
//!   to a [`Permission`] checked against the runtime's [`AccessControl`]
//!   strategy.
//! - **Compliance** ([`compliance`]): an ordered registry of rule modules
//!   evaluated against every mint and transfer, short-circuiting on the first
//!   rejection and naming the module that refused.
//! - **Lifecycle hooks** ([`hooks`]): `before_*`/`after_*` around mint,
//!   transfer, burn and redeem. Extensions are composed as an ordered tuple
//!   in `Config::Extensions`.
//! - **Extensions** ([`extensions`]): [`Pausable`], [`Custodian`] (freezes and
//!   forced recovery) and redemption.
//!
//! Every call runs inside a storage layer: a failure anywhere, including in
//! an `after_*` hook, leaves no trace in storage.

#![cfg_attr(not(feature = "std"), no_std)]
// `RuntimeEvent` on the pallet config and storage getters are kept until the
// runtime moves to the newer FRAME conventions.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::pallet_prelude::*;
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;

pub mod authorization;
pub mod compliance;
pub mod extensions;
pub mod hooks;
pub mod identity;
pub mod ledger;
pub mod migrations;
pub mod types;
pub mod weights;

pub use authorization::{AccessControl, AdminOnly, Permission};
pub use compliance::{
    ComplianceDecision, ComplianceGate, ComplianceModule, CustomComplianceModules, ModuleEntry,
    ModuleKind, ModuleParams, TransferContext,
};
pub use extensions::{Custodian, Pausable};
pub use hooks::TokenHooks;
pub use identity::IdentityRegistry;
pub use types::{
    Balance, BoundedName, BoundedSymbol, CountryCode, FreezeRecord, VerificationSettings,
};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(2);

pub(crate) const LOG_TARGET: &str = "runtime::regulated-token";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Decides who may perform privileged actions.
        type AccessControl: AccessControl<Self::AccountId>;

        /// Identity verification and jurisdiction lookup.
        type Identity: IdentityRegistry<Self::AccountId>;

        /// Modules addressed by `ModuleKind::Custom`.
        type CustomModules: CustomComplianceModules<Self::AccountId>;

        /// Ordered lifecycle hooks, e.g. `(Pausable<Self>, Custodian<Self>, ComplianceGate<Self>)`.
        type Extensions: TokenHooks<Self>;

        /// Maximum number of entries in the compliance registry.
        #[pallet::constant]
        type MaxComplianceModules: Get<u32>;

        /// Whether redeeming zero tokens succeeds (emitting `Redeemed` with 0)
        /// or fails with `NothingToRedeem`.
        #[pallet::constant]
        type AllowZeroRedemption: Get<bool>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Sovereign Bond Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedName, ValueQuery>;

    /// Token symbol (e.g., "SBT")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedSymbol, ValueQuery>;

    /// Token decimals (e.g., 6 for USDC-style, 18 for ETH-style)
    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, Balance, ValueQuery>;

    /// Account balances. Zero balances are not stored.
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    /// Number of accounts holding a non-zero balance.
    #[pallet::storage]
    #[pallet::getter(fn holder_count)]
    pub type HolderCount<T> = StorageValue<_, u32, ValueQuery>;

    /// Global halt of mint, transfer, burn and redeem.
    #[pallet::storage]
    #[pallet::getter(fn is_paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    /// Custodial freeze state per account.
    #[pallet::storage]
    #[pallet::getter(fn freeze_record)]
    pub type Freezes<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, FreezeRecord, OptionQuery>;

    /// Ordered compliance registry.
    #[pallet::storage]
    #[pallet::getter(fn compliance_modules)]
    pub type ComplianceModules<T: Config> =
        StorageValue<_, BoundedVec<ModuleEntry, T::MaxComplianceModules>, ValueQuery>;

    /// Identity checks applied before the compliance modules.
    #[pallet::storage]
    #[pallet::getter(fn verification_settings)]
    pub type Verification<T> = StorageValue<_, VerificationSettings, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(crate) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: Balance },
        /// New tokens minted
        Minted { to: T::AccountId, amount: Balance },
        /// Tokens burned by an administrator
        Burned { from: T::AccountId, amount: Balance },
        /// Holder burned their own tokens
        Redeemed { owner: T::AccountId, amount: Balance },
        /// Token paused
        Paused { sender: T::AccountId },
        /// Token unpaused
        Unpaused { sender: T::AccountId },
        /// Account fully frozen or unfrozen
        AddressFrozen { account: T::AccountId, is_frozen: bool },
        /// Part of an account's balance frozen
        TokensFrozen { account: T::AccountId, amount: Balance },
        /// Part of an account's frozen balance released
        TokensUnfrozen { account: T::AccountId, amount: Balance },
        /// Balance and freeze state migrated from a lost account
        RecoverySuccess { lost_account: T::AccountId, new_account: T::AccountId },
        /// Compliance module appended to the registry
        ComplianceModuleAdded { module: ModuleKind },
        /// Compliance module removed from the registry
        ComplianceModuleRemoved { module: ModuleKind },
        /// Compliance module replaced in place
        ComplianceModuleReplaced { old: ModuleKind, new: ModuleKind },
        /// Token name, symbol or decimals changed
        TokenMetadataUpdated { name: BoundedName, symbol: BoundedSymbol, decimals: u8 },
        /// Identity verification requirements changed
        VerificationSettingsUpdated { settings: VerificationSettings },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller lacks the permission for this action.
        Unauthorized,
        /// A compliance module vetoed the transfer.
        ComplianceRejected { module: ModuleKind },
        /// Value-mutating operations are halted.
        TokenPaused,
        InsufficientBalance,
        /// Amount exceeds balance minus frozen tokens.
        InsufficientAvailableBalance,
        /// Unfreezing more than is frozen.
        InsufficientFrozenBalance,
        /// Freezing more than the account holds.
        InsufficientFreeBalance,
        DuplicateModule,
        ModuleNotFound,
        InvalidModuleConfig,
        TooManyModules,
        AlreadyPaused,
        NotPaused,
        /// Lost account holds no balance.
        NothingToRecover,
        /// Zero redemption is disabled.
        NothingToRedeem,
        /// Recovery target equals the lost account.
        InvalidRecoveryTarget,
        SenderNotVerified,
        RecipientNotVerified,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(
                T::MaxComplianceModules::get() > 0,
                "MaxComplianceModules must allow at least one module"
            );
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: Balance) -> DispatchResult {
            Self::authorize_mint(origin)?;
            Self::do_mint(to, amount)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: Balance) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(sender, to, amount)
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, from: T::AccountId, amount: Balance) -> DispatchResult {
            Self::authorize_burn(origin)?;
            Self::do_burn(from, amount)
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::redeem())]
        pub fn redeem(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::do_redeem(owner, amount)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::redeem_all())]
        pub fn redeem_all(origin: OriginFor<T>) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::do_redeem_all(owner)
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let sender = Self::authorize_pause(origin)?;
            Self::do_pause(sender)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let sender = Self::authorize_pause(origin)?;
            Self::do_unpause(sender)
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::freeze_address())]
        pub fn freeze_address(
            origin: OriginFor<T>,
            account: T::AccountId,
            frozen: bool,
        ) -> DispatchResult {
            Self::authorize_freeze(origin)?;
            Self::do_freeze_address(account, frozen)
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::freeze_partial_tokens())]
        pub fn freeze_partial_tokens(
            origin: OriginFor<T>,
            account: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            Self::authorize_freeze(origin)?;
            Self::do_freeze_partial_tokens(account, amount)
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::unfreeze_partial_tokens())]
        pub fn unfreeze_partial_tokens(
            origin: OriginFor<T>,
            account: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            Self::authorize_freeze(origin)?;
            Self::do_unfreeze_partial_tokens(account, amount)
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::forced_recovery())]
        pub fn forced_recovery(
            origin: OriginFor<T>,
            lost_account: T::AccountId,
            new_account: T::AccountId,
        ) -> DispatchResult {
            Self::authorize_recovery(origin)?;
            Self::do_forced_recovery(lost_account, new_account)
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::add_compliance_module())]
        pub fn add_compliance_module(
            origin: OriginFor<T>,
            module: ModuleKind,
            params: ModuleParams,
        ) -> DispatchResult {
            Self::authorize_update_compliance_settings(origin)?;
            Self::do_add_compliance_module(module, params)
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::remove_compliance_module())]
        pub fn remove_compliance_module(origin: OriginFor<T>, module: ModuleKind) -> DispatchResult {
            Self::authorize_update_compliance_settings(origin)?;
            Self::do_remove_compliance_module(module)
        }

        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::replace_compliance_module())]
        pub fn replace_compliance_module(
            origin: OriginFor<T>,
            old: ModuleKind,
            new: ModuleKind,
            params: ModuleParams,
        ) -> DispatchResult {
            Self::authorize_update_compliance_settings(origin)?;
            Self::do_replace_compliance_module(old, new, params)
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::set_token_metadata())]
        pub fn set_token_metadata(
            origin: OriginFor<T>,
            name: BoundedName,
            symbol: BoundedSymbol,
            decimals: u8,
        ) -> DispatchResult {
            Self::authorize_update_token_settings(origin)?;
            TokenName::<T>::put(&name);
            TokenSymbol::<T>::put(&symbol);
            Decimals::<T>::put(decimals);
            Self::deposit_event(Event::TokenMetadataUpdated { name, symbol, decimals });
            Ok(())
        }

        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::set_verification_settings())]
        pub fn set_verification_settings(
            origin: OriginFor<T>,
            settings: VerificationSettings,
        ) -> DispatchResult {
            Self::authorize_update_verification_settings(origin)?;
            Verification::<T>::put(settings);
            Self::deposit_event(Event::VerificationSettingsUpdated { settings });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Initial token mints (account, amount)
        pub initial_balances: Vec<(T::AccountId, Balance)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedName =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedSymbol =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            // Genesis balances bypass the lifecycle hooks: no module is registered yet.
            for (account, amount) in &self.initial_balances {
                ledger::Ledger::<T>::mint(account, *amount).expect("Genesis supply overflow");
            }
        }
    }
}
