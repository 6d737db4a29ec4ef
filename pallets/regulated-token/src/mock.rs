use crate as pallet_regulated_token;
use crate::{
    AccessControl, Balance, ComplianceGate, CountryCode, Custodian, CustomComplianceModules,
    IdentityRegistry, Pausable, Permission, TokenHooks, TransferContext,
};
use codec::{Decode, DecodeAll};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage, DispatchError, DispatchResult,
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        RegulatedToken: pallet_regulated_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const PAUSER: u64 = 4;
pub const CHARLIE: u64 = 5;
pub const DAVE: u64 = 6;
pub const UNVERIFIED: u64 = 7;

pub const US: CountryCode = 840;
pub const DE: CountryCode = 276;
pub const FR: CountryCode = 250;

parameter_types! {
    pub const AdminAccount: u64 = ADMIN;
    pub storage ZeroRedemption: bool = true;
}

thread_local! {
    static GRANTS: RefCell<BTreeSet<(u64, Permission)>> = RefCell::new(BTreeSet::new());
    static IDENTITIES: RefCell<BTreeMap<u64, CountryCode>> = RefCell::new(BTreeMap::new());
    static FAIL_AFTER_TRANSFER: Cell<bool> = const { Cell::new(false) };
}

/// Make every later `after_transfer` fail until switched off again.
pub fn fail_after_transfer(fail: bool) {
    FAIL_AFTER_TRANSFER.with(|flag| flag.set(fail));
}

/// Grant `permission` to `who` on top of the admin's blanket access.
pub fn grant(who: u64, permission: Permission) {
    GRANTS.with(|grants| grants.borrow_mut().insert((who, permission)));
}

pub fn revoke(who: u64, permission: Permission) {
    GRANTS.with(|grants| grants.borrow_mut().remove(&(who, permission)));
}

/// Register a verified identity for `who` in `country`.
pub fn verify(who: u64, country: CountryCode) {
    IDENTITIES.with(|ids| ids.borrow_mut().insert(who, country));
}

/// Role table: the admin holds everything, other accounts hold explicit grants.
pub struct MockAccessControl;

impl AccessControl<u64> for MockAccessControl {
    fn has_permission(who: &u64, permission: Permission) -> bool {
        *who == AdminAccount::get() ||
            GRANTS.with(|grants| grants.borrow().contains(&(*who, permission)))
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn privileged_account(_permission: Permission) -> Option<u64> {
        Some(AdminAccount::get())
    }
}

pub struct MockIdentity;

impl IdentityRegistry<u64> for MockIdentity {
    fn is_verified(who: &u64) -> bool {
        IDENTITIES.with(|ids| ids.borrow().contains_key(who))
    }

    fn country_of(who: &u64) -> Option<CountryCode> {
        IDENTITIES.with(|ids| ids.borrow().get(who).copied())
    }
}

/// Last extension in the chain: bookkeeping that can be told to fail after
/// the ledger has already moved.
pub struct AfterTransferFault;

impl TokenHooks<Test> for AfterTransferFault {
    fn after_transfer(_from: &u64, _to: &u64, _amount: Balance) -> DispatchResult {
        if FAIL_AFTER_TRANSFER.with(Cell::get) {
            return Err(DispatchError::Other("after_transfer bookkeeping failed"));
        }
        Ok(())
    }
}

pub const TRANSFER_CAP: u8 = 0;

/// `Custom(TRANSFER_CAP)`: a single transfer may not exceed the encoded cap.
pub struct MockCustomModules;

impl CustomComplianceModules<u64> for MockCustomModules {
    fn validate_config(id: u8, params: &[u8]) -> bool {
        id == TRANSFER_CAP && Balance::decode_all(&mut &params[..]).is_ok()
    }

    fn check(id: u8, ctx: &TransferContext<u64>, params: &[u8]) -> bool {
        id == TRANSFER_CAP &&
            Balance::decode(&mut &params[..]).is_ok_and(|cap| ctx.amount <= cap)
    }
}

impl pallet_regulated_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type AccessControl = MockAccessControl;
    type Identity = MockIdentity;
    type CustomModules = MockCustomModules;
    type Extensions =
        (Pausable<Test>, Custodian<Test>, ComplianceGate<Test>, AfterTransferFault);
    type MaxComplianceModules = ConstU32<8>;
    type AllowZeroRedemption = ZeroRedemption;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    GRANTS.with(|grants| grants.borrow_mut().clear());
    IDENTITIES.with(|ids| ids.borrow_mut().clear());
    fail_after_transfer(false);
    grant(PAUSER, Permission::Pause);
    verify(ADMIN, US);
    verify(ALICE, US);
    verify(BOB, US);
    verify(CHARLIE, DE);
    verify(DAVE, FR);

    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_regulated_token::GenesisConfig::<Test> {
        token_name: b"Test Token".to_vec(),
        token_symbol: b"TST".to_vec(),
        decimals: 6,
        initial_balances: vec![(ALICE, 1_000_000), (BOB, 500_000)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
