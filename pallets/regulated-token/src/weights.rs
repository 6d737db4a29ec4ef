//! Weights for pallet-regulated-token.
//!
//! Conservative placeholders until the benchmarks in `benchmarking.rs` are run
//! against reference hardware.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn mint() -> Weight;
    fn transfer() -> Weight;
    fn burn() -> Weight;
    fn redeem() -> Weight;
    fn redeem_all() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn freeze_address() -> Weight;
    fn freeze_partial_tokens() -> Weight;
    fn unfreeze_partial_tokens() -> Weight;
    fn forced_recovery() -> Weight;
    fn add_compliance_module() -> Weight;
    fn remove_compliance_module() -> Weight;
    fn replace_compliance_module() -> Weight;
    fn set_token_metadata() -> Weight;
    fn set_verification_settings() -> Weight;
}

// Transfers and mints read the registry, both balances, supply, holder count
// and the freeze record before any write.
impl WeightInfo for () {
    fn mint() -> Weight {
        Weight::from_parts(30_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(6, 3))
    }
    fn transfer() -> Weight {
        Weight::from_parts(35_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(8, 3))
    }
    fn burn() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(4, 4))
    }
    fn redeem() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(4, 3))
    }
    fn redeem_all() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(4, 3))
    }
    fn pause() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn freeze_address() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn freeze_partial_tokens() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn unfreeze_partial_tokens() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn forced_recovery() -> Weight {
        Weight::from_parts(30_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(5, 5))
    }
    fn add_compliance_module() -> Weight {
        Weight::from_parts(15_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn remove_compliance_module() -> Weight {
        Weight::from_parts(15_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn replace_compliance_module() -> Weight {
        Weight::from_parts(15_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_token_metadata() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().writes(3))
    }
    fn set_verification_settings() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().writes(1))
    }
}
