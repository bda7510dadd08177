//! Domain models for the savings ledger.

pub mod account;
pub mod currency;
pub mod money;

pub use account::AccountId;
pub use currency::CurrencyCode;
pub use money::{Money, NANOS_PER_UNIT};
