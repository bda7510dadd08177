//! Static Exchange Rate Table
//!
//! Read-only lookup from an ordered currency pair to a conversion rate.
//! A rate is stored as a `Money` in the target currency: the amount of the
//! target paid for one unit of the source.
//!
//! The process-wide table is seeded once, before first use, and never
//! changes afterwards:
//! ```
//! use exchange_rates::{ExchangeRateTable, current_rates};
//! use ledger_types::{CurrencyCode, Money};
//!
//! let table = ExchangeRateTable::new()
//!     .with_rate(CurrencyCode::EUR, CurrencyCode::USD, Money::from_nanos(CurrencyCode::USD, 1_080_000_000));
//! let _ = exchange_rates::install(table);
//!
//! let rate = current_rates().lookup(CurrencyCode::EUR, CurrencyCode::USD).unwrap();
//! assert_eq!((rate.units(), rate.nanos()), (1, 80_000_000));
//! ```

mod config;

pub use config::RatesConfig;

use std::collections::HashMap;
use std::sync::OnceLock;

use ledger_types::{CurrencyCode, ExchangeError, ExchangeRateProvider, Money};

// ─────────────────────────────────────────────────────────────────────────────
// Process-wide Table
// ─────────────────────────────────────────────────────────────────────────────

static CURRENT_RATES: OnceLock<ExchangeRateTable> = OnceLock::new();

/// Rates seeded when nothing else is installed, as nanos of the target.
const DEFAULT_RATES: [(CurrencyCode, CurrencyCode, i128); 3] = [
    (CurrencyCode::CAD, CurrencyCode::USD, 800_000_000),
    (CurrencyCode::CNY, CurrencyCode::USD, 160_000_000),
    (CurrencyCode::EUR, CurrencyCode::USD, 1_080_000_000),
];

/// Seeds the process-wide table.
///
/// Succeeds only for the first call, and only if `current_rates` has not
/// already fallen back to the defaults; otherwise the table is handed back.
pub fn install(table: ExchangeRateTable) -> Result<(), ExchangeRateTable> {
    let entries = table.len();
    CURRENT_RATES.set(table)?;
    tracing::info!(entries, "Installed exchange rate table");
    Ok(())
}

/// Returns the process-wide table, seeding it with `default_rates` on first
/// use when nothing was installed.
pub fn current_rates() -> &'static ExchangeRateTable {
    CURRENT_RATES.get_or_init(|| {
        tracing::info!("No exchange rate table installed, using defaults");
        default_rates()
    })
}

/// The built-in table: CAD, CNY and EUR into USD.
pub fn default_rates() -> ExchangeRateTable {
    DEFAULT_RATES
        .iter()
        .map(|&(from, to, nanos)| ((from, to), Money::from_nanos(to, nanos)))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate Table
// ─────────────────────────────────────────────────────────────────────────────

/// Mapping from `(source, target)` to the rate for that direction.
///
/// There is no inverse derivation: a stored `(A, B)` entry says nothing
/// about `(B, A)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeRateTable {
    rates: HashMap<(CurrencyCode, CurrencyCode), Money>,
}

impl ExchangeRateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rate for `from -> to`.
    pub fn with_rate(mut self, from: CurrencyCode, to: CurrencyCode, rate: Money) -> Self {
        self.rates.insert((from, to), rate);
        self
    }

    /// Looks up the rate for the ordered pair.
    pub fn lookup(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Money, ExchangeError> {
        self.rates.get(&(from, to)).copied().ok_or_else(|| {
            tracing::debug!(%from, %to, "No exchange rate configured");
            ExchangeError::RateNotAvailable(from, to)
        })
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<((CurrencyCode, CurrencyCode), Money)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = ((CurrencyCode, CurrencyCode), Money)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

impl ExchangeRateProvider for ExchangeRateTable {
    fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Money, ExchangeError> {
        self.lookup(from, to)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn usd(units: i64, nanos: i32) -> Money {
        Money::new(CurrencyCode::USD, units, nanos).unwrap()
    }

    #[rstest]
    #[case(CurrencyCode::CAD, usd(0, 800_000_000))]
    #[case(CurrencyCode::CNY, usd(0, 160_000_000))]
    #[case(CurrencyCode::EUR, usd(1, 80_000_000))]
    fn test_default_rates(#[case] from: CurrencyCode, #[case] expected: Money) {
        let rates = default_rates();
        assert_eq!(rates.lookup(from, CurrencyCode::USD), Ok(expected));
    }

    #[test]
    fn test_default_rates_size() {
        assert_eq!(default_rates().len(), 3);
    }

    #[test]
    fn test_missing_pair_is_not_found() {
        let rates = default_rates();
        assert_eq!(
            rates.lookup(CurrencyCode::USD, CurrencyCode::CNY),
            Err(ExchangeError::RateNotAvailable(
                CurrencyCode::USD,
                CurrencyCode::CNY
            ))
        );
    }

    #[test]
    fn test_no_inverse_derivation() {
        let rates = ExchangeRateTable::new().with_rate(
            CurrencyCode::EUR,
            CurrencyCode::USD,
            usd(1, 80_000_000),
        );
        assert!(rates.lookup(CurrencyCode::EUR, CurrencyCode::USD).is_ok());
        assert!(rates.lookup(CurrencyCode::USD, CurrencyCode::EUR).is_err());
    }

    #[test]
    fn test_with_rate_replaces() {
        let rates = ExchangeRateTable::new()
            .with_rate(CurrencyCode::CAD, CurrencyCode::USD, usd(0, 700_000_000))
            .with_rate(CurrencyCode::CAD, CurrencyCode::USD, usd(0, 750_000_000));
        assert_eq!(rates.len(), 1);
        assert_eq!(
            rates.rate(CurrencyCode::CAD, CurrencyCode::USD),
            Ok(usd(0, 750_000_000))
        );
    }

    #[test]
    fn test_empty_table() {
        let rates = ExchangeRateTable::new();
        assert!(rates.is_empty());
        assert!(rates.rate(CurrencyCode::CAD, CurrencyCode::USD).is_err());
    }
}
