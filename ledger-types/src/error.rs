//! Error types for the savings ledger.

use crate::domain::{CurrencyCode, Money};

/// Domain-level errors (business rule violations).
///
/// Every operation that returns one of these leaves all state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Nanos out of range: {0} (magnitude must be at most 999999999)")]
    NanosOutOfRange(i32),

    #[error("Sign mismatch: units {units} and nanos {nanos} must share a sign")]
    SignMismatch { units: i64, nanos: i32 },

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error(
        "Currency mismatch: expected {expected}, got {got}; convert to a common currency first"
    )]
    CurrencyMismatch {
        expected: CurrencyCode,
        got: CurrencyCode,
    },

    #[error("Withdrawal of {requested} would overdraw from balance of {available}")]
    Overdraft { requested: Money, available: Money },

    #[error("Arithmetic overflow")]
    Overflow,
}

impl DomainError {
    /// Returns true for errors raised while constructing a value from bad input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::NanosOutOfRange(_)
                | DomainError::SignMismatch { .. }
                | DomainError::InvalidCurrencyCode(_)
        )
    }
}

/// Error type for exchange rate lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("Rate not available for {0} -> {1}")]
    RateNotAvailable(CurrencyCode, CurrencyCode),
}
