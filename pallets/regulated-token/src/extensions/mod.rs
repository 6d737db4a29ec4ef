//! Token extensions built on the lifecycle hooks and authorization hooks.

pub mod custodian;
pub mod pausable;
pub mod redeemable;

pub use custodian::Custodian;
pub use pausable::Pausable;
