//! Identity collaborator.
//!
//! Claim storage and KYC workflows live elsewhere; the token only needs to
//! know whether an account is verified and which jurisdiction it belongs to.

use crate::types::CountryCode;

pub trait IdentityRegistry<AccountId> {
    /// Whether `who` has a valid, verified identity.
    fn is_verified(who: &AccountId) -> bool;

    /// Jurisdiction of `who`, if the registry knows it.
    fn country_of(who: &AccountId) -> Option<CountryCode>;
}

/// Registry that knows nobody.
impl<AccountId> IdentityRegistry<AccountId> for () {
    fn is_verified(_who: &AccountId) -> bool {
        false
    }

    fn country_of(_who: &AccountId) -> Option<CountryCode> {
        None
    }
}
