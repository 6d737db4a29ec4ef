//! Plain data types shared by the pallet and its extensions.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{traits::ConstU32, BoundedVec};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Exact token amount.
pub type Balance = u128;

/// ISO-3166 numeric country code, as reported by the identity registry.
pub type CountryCode = u16;

/// Token name (e.g., "Sovereign Bond Token"), at most 64 bytes.
pub type BoundedName = BoundedVec<u8, ConstU32<64>>;

/// Token symbol (e.g., "SBT"), at most 16 bytes.
pub type BoundedSymbol = BoundedVec<u8, ConstU32<16>>;

/// Per-account custodial state.
///
/// `frozen_amount` never exceeds the account's ledger balance. An account
/// without a record is neither fully frozen nor partially frozen.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub struct FreezeRecord {
    pub is_fully_frozen: bool,
    pub frozen_amount: Balance,
}

impl FreezeRecord {
    /// Amount of `balance` the holder may still move.
    pub fn available(&self, balance: Balance) -> Balance {
        if self.is_fully_frozen {
            0
        } else {
            balance.saturating_sub(self.frozen_amount)
        }
    }

    /// A default record carries no information and is not kept in storage.
    pub fn is_empty(&self) -> bool {
        !self.is_fully_frozen && self.frozen_amount == 0
    }
}

/// Identity checks applied by the compliance gate before any module runs.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub struct VerificationSettings {
    /// Sender of a transfer must be verified by the identity registry.
    pub verify_sender: bool,
    /// Recipient of a transfer or mint must be verified by the identity registry.
    pub verify_recipient: bool,
}
