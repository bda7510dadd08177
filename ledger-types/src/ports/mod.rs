//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! Accounts depend on these traits, not on concrete rate tables.

mod account;
mod exchange;

pub use account::Account;
pub use exchange::ExchangeRateProvider;
