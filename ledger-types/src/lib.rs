//! # Ledger Types
//!
//! Domain types and port traits for the savings ledger.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the ledger:
//! - `domain/` - Pure domain types (AccountId, CurrencyCode, Money)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain and exchange error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{AccountId, CurrencyCode, Money, NANOS_PER_UNIT};
pub use error::{DomainError, ExchangeError};
pub use ports::{Account, ExchangeRateProvider};
