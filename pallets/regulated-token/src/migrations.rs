//! Storage migrations for pallet-regulated-token.
//!
//! Each migration is versioned, checks the on-chain storage version first and
//! runs exactly once. Wire them into the runtime's `Executive`, oldest first:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     pallet_regulated_token::migrations::v2::MigrateToV2<Runtime>,
//! >;
//! ```
//!
//! # v1 → v2
//!
//! Version 1 gated transfers with a boolean `Frozen` flag and a `Whitelist`
//! map. Version 2 replaces them with per-account [`FreezeRecord`]s, identity
//! verification settings and the compliance registry, and starts tracking the
//! number of holders:
//!
//! - `Frozen(account) = true` becomes a fully frozen [`FreezeRecord`] with no
//!   partial freeze. `false` entries are dropped.
//! - `Whitelist` is cleared. Verification settings stay off; the runtime's
//!   identity registry takes over and must be populated before they are
//!   enabled.
//! - Zero balances left behind by v1 are removed and `HolderCount` is
//!   computed from the remaining entries.

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::{marker::PhantomData, vec::Vec};

use crate::{Balances, Config, FreezeRecord, Freezes, HolderCount, Pallet, LOG_TARGET};

/// Storage layout of version 1, kept only to read it during migration.
pub mod v1 {
    use super::*;

    /// Fully frozen accounts (cannot send transfers)
    #[frame_support::storage_alias]
    pub type Frozen<T: Config> = StorageMap<
        Pallet<T>,
        Blake2_128Concat,
        <T as frame_system::Config>::AccountId,
        bool,
        ValueQuery,
    >;

    /// Accounts allowed to send and receive transfers
    #[frame_support::storage_alias]
    pub type Whitelist<T: Config> = StorageMap<
        Pallet<T>,
        Blake2_128Concat,
        <T as frame_system::Config>::AccountId,
        bool,
        ValueQuery,
    >;
}

pub mod v2 {
    use super::*;

    /// Upgrade storage from version 1 to version 2.
    pub struct MigrateToV2<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV2<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            if on_chain_version >= 2 {
                log::info!(
                    target: LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v2 migration"
                );
                return T::DbWeight::get().reads(1);
            }

            let mut reads: u64 = 1;
            let mut writes: u64 = 0;

            let mut frozen = 0u32;
            for (account, is_frozen) in v1::Frozen::<T>::drain() {
                reads += 1;
                writes += 1;
                if is_frozen {
                    let record = Freezes::<T>::get(&account).unwrap_or_default();
                    Freezes::<T>::insert(
                        &account,
                        FreezeRecord { is_fully_frozen: true, ..record },
                    );
                    reads += 1;
                    writes += 1;
                    frozen += 1;
                }
            }

            let cleared = v1::Whitelist::<T>::clear(u32::MAX, None);
            reads += u64::from(cleared.loops);
            writes += u64::from(cleared.unique);
            if cleared.unique > 0 {
                log::warn!(
                    target: LOG_TARGET,
                    "Dropped {} whitelist entries; identity verification is off until enabled",
                    cleared.unique
                );
            }

            let mut holders = 0u32;
            let mut empty = Vec::new();
            for (account, balance) in Balances::<T>::iter() {
                reads += 1;
                if balance == 0 {
                    empty.push(account);
                } else {
                    holders = holders.saturating_add(1);
                }
            }
            writes += empty.len() as u64;
            for account in empty {
                Balances::<T>::remove(account);
            }
            HolderCount::<T>::put(holders);

            StorageVersion::new(2).put::<Pallet<T>>();
            writes += 2;

            log::info!(
                target: LOG_TARGET,
                "Migrated storage v{on_chain_version:?} → v2: {frozen} frozen accounts, {holders} holders"
            );

            T::DbWeight::get().reads_writes(reads, writes)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            let frozen = v1::Frozen::<T>::iter_values().filter(|frozen| *frozen).count() as u32;
            log::info!(
                target: LOG_TARGET,
                "Pre-upgrade: storage v{on_chain_version:?}, {frozen} frozen accounts"
            );
            Ok((on_chain_version, frozen, crate::TotalSupply::<T>::get()).encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let (pre_version, frozen, supply): (StorageVersion, u32, crate::Balance) =
                Decode::decode(&mut &state[..])
                    .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;

            frame_support::ensure!(
                Pallet::<T>::on_chain_storage_version() >= 2,
                sp_runtime::TryRuntimeError::Other("Migration to v2 did not complete")
            );
            frame_support::ensure!(
                crate::TotalSupply::<T>::get() == supply,
                sp_runtime::TryRuntimeError::Other("Total supply changed during migration")
            );
            frame_support::ensure!(
                v1::Frozen::<T>::iter().next().is_none() &&
                    v1::Whitelist::<T>::iter().next().is_none(),
                sp_runtime::TryRuntimeError::Other("Legacy gating storage left behind")
            );
            let holders = Balances::<T>::iter_values().filter(|balance| *balance > 0).count();
            frame_support::ensure!(
                HolderCount::<T>::get() as usize == holders,
                sp_runtime::TryRuntimeError::Other("Holder count does not match balances")
            );
            if pre_version < 2 {
                let fully_frozen =
                    Freezes::<T>::iter_values().filter(|r| r.is_fully_frozen).count() as u32;
                frame_support::ensure!(
                    fully_frozen >= frozen,
                    sp_runtime::TryRuntimeError::Other("Frozen accounts lost during migration")
                );
            }
            Ok(())
        }
    }
}
