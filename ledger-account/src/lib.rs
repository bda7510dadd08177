//! # Ledger Account
//!
//! Concurrency-safe savings account built on the ledger types.
//!
//! ## Architecture
//!
//! - `account/` - `SavingsAccount`, the lock-guarded `Account` implementation
//!
//! The account is generic over `P: ExchangeRateProvider`, allowing
//! different rate tables to be injected.

pub mod account;


pub use account::SavingsAccount;
pub use ledger_types::Account;
