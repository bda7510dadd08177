//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate lookups.
//! Implementations can be static tables, test doubles, etc.

use std::sync::Arc;

use crate::domain::{CurrencyCode, Money};
use crate::error::ExchangeError;

/// Port trait for exchange rate providers.
pub trait ExchangeRateProvider: Send + Sync {
    /// Get the rate for converting `from` into `to`.
    ///
    /// The rate is a `Money` in the target currency: the amount of `to`
    /// paid for one unit of `from`. Only the ordered pair is consulted;
    /// a stored `to -> from` entry never answers a `from -> to` query.
    fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Money, ExchangeError>;
}

impl<T: ExchangeRateProvider + ?Sized> ExchangeRateProvider for &T {
    fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Money, ExchangeError> {
        (**self).rate(from, to)
    }
}

impl<T: ExchangeRateProvider + ?Sized> ExchangeRateProvider for Arc<T> {
    fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Money, ExchangeError> {
        (**self).rate(from, to)
    }
}
