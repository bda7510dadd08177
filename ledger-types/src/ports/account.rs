//! Account port trait.

use crate::domain::{CurrencyCode, Money};
use crate::error::{DomainError, ExchangeError};

/// A single-balance account.
///
/// Deposits and withdrawals MUST be atomic: either the whole amount is
/// applied or the balance is left exactly as it was.
pub trait Account: Send + Sync {
    /// Returns a consistent snapshot of the current balance.
    fn balance(&self) -> Money;

    /// Returns the balance converted into `currency_code` at the configured rate.
    fn balance_as_currency(&self, currency_code: CurrencyCode) -> Result<Money, ExchangeError>;

    /// Adds `amount` to the balance.
    fn deposit(&self, amount: Money) -> Result<(), DomainError>;

    /// Removes `amount` from the balance unless that would leave it negative.
    fn withdraw(&self, amount: Money) -> Result<(), DomainError>;
}
