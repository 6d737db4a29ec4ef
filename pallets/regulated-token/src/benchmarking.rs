//! Benchmarking setup for pallet-regulated-token

use super::*;

#[allow(unused)]
use crate::Pallet as RegulatedToken;
use codec::Encode;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use sp_std::vec;

fn privileged<T: Config>(permission: Permission) -> Result<T::AccountId, BenchmarkError> {
    T::AccessControl::privileged_account(permission)
        .ok_or(BenchmarkError::Stop("no account holds the permission"))
}

fn params<P: Encode>(value: P) -> ModuleParams {
    ModuleParams::truncate_from(value.encode())
}

/// Register every built-in module that lets any transfer through, so the
/// engine walks as much of the registry as the runtime allows.
fn register_passing_modules<T: Config>() -> Result<(), BenchmarkError> {
    let modules = [
        (ModuleKind::CountryBlockList, params(vec![CountryCode::MAX])),
        (ModuleKind::MaxHolders, params(u32::MAX)),
        (ModuleKind::MaxBalance, params(Balance::MAX)),
        (ModuleKind::SupplyLimit, params(Balance::MAX)),
    ];
    for (module, value) in modules {
        // The registry may be smaller than the set of built-ins.
        if ComplianceModules::<T>::get().len() as u32 >= T::MaxComplianceModules::get() {
            break;
        }
        Pallet::<T>::do_add_compliance_module(module, value)?;
    }
    Ok(())
}

/// Fill the registry up to one below capacity with placeholder entries.
fn fill_registry<T: Config>() {
    let capacity = T::MaxComplianceModules::get().saturating_sub(1).min(u8::MAX as u32 + 1);
    ComplianceModules::<T>::mutate(|modules| {
        for id in 0..capacity {
            let entry = ModuleEntry { module: ModuleKind::Custom(id as u8), params: params(id) };
            if modules.try_push(entry).is_err() {
                break;
            }
        }
    });
}

fn fund<T: Config>(who: &T::AccountId, amount: Balance) -> Result<(), BenchmarkError> {
    ledger::Ledger::<T>::mint(who, amount)?;
    Ok(())
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn mint() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::Mint)?;
        let recipient: T::AccountId = account("recipient", 0, 0);
        register_passing_modules::<T>()?;

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(&recipient), 1_000_000);
        Ok(())
    }

    #[benchmark]
    fn transfer() -> Result<(), BenchmarkError> {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        fund::<T>(&caller, 10_000_000)?;
        Freezes::<T>::insert(&caller, FreezeRecord { is_fully_frozen: false, frozen_amount: 1 });
        register_passing_modules::<T>()?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(&recipient), 1_000_000);
        Ok(())
    }

    #[benchmark]
    fn burn() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::Burn)?;
        let holder: T::AccountId = account("holder", 0, 0);
        fund::<T>(&holder, 1_000_000)?;
        // The custodian check reads the freeze record before burning.
        Freezes::<T>::insert(
            &holder,
            FreezeRecord { is_fully_frozen: false, frozen_amount: 400_000 },
        );

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), holder.clone(), 600_000);

        assert_eq!(Balances::<T>::get(&holder), 400_000);
        assert_eq!(Pallet::<T>::freeze_record_of(&holder).frozen_amount, 400_000);
        Ok(())
    }

    #[benchmark]
    fn redeem() -> Result<(), BenchmarkError> {
        let caller: T::AccountId = whitelisted_caller();
        fund::<T>(&caller, 1_000_000)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), 400_000);

        assert_eq!(Balances::<T>::get(&caller), 600_000);
        Ok(())
    }

    #[benchmark]
    fn redeem_all() -> Result<(), BenchmarkError> {
        let caller: T::AccountId = whitelisted_caller();
        fund::<T>(&caller, 1_000_000)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()));

        assert!(!Balances::<T>::contains_key(&caller));
        Ok(())
    }

    #[benchmark]
    fn pause() -> Result<(), BenchmarkError> {
        let pauser = privileged::<T>(Permission::Pause)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(pauser));

        assert!(Paused::<T>::get());
        Ok(())
    }

    #[benchmark]
    fn unpause() -> Result<(), BenchmarkError> {
        let pauser = privileged::<T>(Permission::Pause)?;
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(pauser));

        assert!(!Paused::<T>::get());
        Ok(())
    }

    #[benchmark]
    fn freeze_address() -> Result<(), BenchmarkError> {
        let custodian = privileged::<T>(Permission::Freeze)?;
        let holder: T::AccountId = account("holder", 0, 0);
        fund::<T>(&holder, 1_000)?;
        // Unfreezing reads the balance to resync the frozen amount.
        Freezes::<T>::insert(&holder, FreezeRecord { is_fully_frozen: true, frozen_amount: 500 });

        #[extrinsic_call]
        _(RawOrigin::Signed(custodian), holder.clone(), false);

        assert!(!Pallet::<T>::freeze_record_of(&holder).is_fully_frozen);
        Ok(())
    }

    #[benchmark]
    fn freeze_partial_tokens() -> Result<(), BenchmarkError> {
        let custodian = privileged::<T>(Permission::Freeze)?;
        let holder: T::AccountId = account("holder", 0, 0);
        fund::<T>(&holder, 1_000)?;

        #[extrinsic_call]
        _(RawOrigin::Signed(custodian), holder.clone(), 400);

        assert_eq!(Pallet::<T>::freeze_record_of(&holder).frozen_amount, 400);
        Ok(())
    }

    #[benchmark]
    fn unfreeze_partial_tokens() -> Result<(), BenchmarkError> {
        let custodian = privileged::<T>(Permission::Freeze)?;
        let holder: T::AccountId = account("holder", 0, 0);
        fund::<T>(&holder, 1_000)?;
        Freezes::<T>::insert(&holder, FreezeRecord { is_fully_frozen: false, frozen_amount: 400 });

        #[extrinsic_call]
        _(RawOrigin::Signed(custodian), holder.clone(), 100);

        assert_eq!(Pallet::<T>::freeze_record_of(&holder).frozen_amount, 300);
        Ok(())
    }

    #[benchmark]
    fn forced_recovery() -> Result<(), BenchmarkError> {
        let custodian = privileged::<T>(Permission::Recovery)?;
        let lost: T::AccountId = account("lost", 0, 0);
        let new: T::AccountId = account("new", 0, 0);
        fund::<T>(&lost, 1_000_000)?;
        fund::<T>(&new, 1_000)?;
        Freezes::<T>::insert(&lost, FreezeRecord { is_fully_frozen: true, frozen_amount: 500 });
        Freezes::<T>::insert(&new, FreezeRecord { is_fully_frozen: false, frozen_amount: 100 });

        #[extrinsic_call]
        _(RawOrigin::Signed(custodian), lost.clone(), new.clone());

        assert!(!Balances::<T>::contains_key(&lost));
        assert_eq!(Balances::<T>::get(&new), 1_001_000);
        Ok(())
    }

    #[benchmark]
    fn add_compliance_module() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::UpdateComplianceSettings)?;
        fill_registry::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), ModuleKind::SupplyLimit, params(Balance::MAX));

        assert!(ComplianceModules::<T>::get()
            .iter()
            .any(|entry| entry.module == ModuleKind::SupplyLimit));
        Ok(())
    }

    #[benchmark]
    fn remove_compliance_module() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::UpdateComplianceSettings)?;
        fill_registry::<T>();
        Pallet::<T>::do_add_compliance_module(ModuleKind::SupplyLimit, params(Balance::MAX))?;

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), ModuleKind::SupplyLimit);

        assert!(!ComplianceModules::<T>::get()
            .iter()
            .any(|entry| entry.module == ModuleKind::SupplyLimit));
        Ok(())
    }

    #[benchmark]
    fn replace_compliance_module() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::UpdateComplianceSettings)?;
        fill_registry::<T>();
        Pallet::<T>::do_add_compliance_module(ModuleKind::SupplyLimit, params(Balance::MAX))?;

        #[extrinsic_call]
        _(
            RawOrigin::Signed(admin),
            ModuleKind::SupplyLimit,
            ModuleKind::MaxBalance,
            params(Balance::MAX),
        );

        assert!(ComplianceModules::<T>::get()
            .iter()
            .any(|entry| entry.module == ModuleKind::MaxBalance));
        Ok(())
    }

    #[benchmark]
    fn set_token_metadata() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::UpdateTokenSettings)?;
        let name = BoundedName::truncate_from(vec![b'n'; 64]);
        let symbol = BoundedSymbol::truncate_from(vec![b's'; 16]);

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), name.clone(), symbol, 18);

        assert_eq!(TokenName::<T>::get(), name);
        Ok(())
    }

    #[benchmark]
    fn set_verification_settings() -> Result<(), BenchmarkError> {
        let admin = privileged::<T>(Permission::UpdateVerificationSettings)?;
        let settings = VerificationSettings { verify_sender: true, verify_recipient: true };

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), settings);

        assert_eq!(Verification::<T>::get(), settings);
        Ok(())
    }

    impl_benchmark_test_suite!(
        RegulatedToken,
        crate::mock::new_test_ext(),
        crate::mock::Test
    );
}
