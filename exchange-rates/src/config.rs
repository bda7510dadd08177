//! Rate table configuration loading from environment.

use std::env;

use anyhow::{Context, bail, ensure};
use ledger_types::{CurrencyCode, Money, NANOS_PER_UNIT};

use crate::{DEFAULT_RATES, ExchangeRateTable};

/// Environment variable holding the seed rates.
pub const EXCHANGE_RATES_VAR: &str = "EXCHANGE_RATES";

/// Seed entries for the exchange rate table.
///
/// Text form is a comma-separated list of `FROM/TO=DECIMAL` entries, for
/// example `CAD/USD=0.80,EUR/USD=1.08`. Each rate is stored in the target
/// currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesConfig {
    pub rates: Vec<(CurrencyCode, CurrencyCode, Money)>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES
                .iter()
                .map(|&(from, to, nanos)| (from, to, Money::from_nanos(to, nanos)))
                .collect(),
        }
    }
}

impl RatesConfig {
    /// Loads configuration from environment variables (and `.env`).
    ///
    /// Falls back to the built-in rates when `EXCHANGE_RATES` is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        match env::var(EXCHANGE_RATES_VAR) {
            Ok(spec) => Self::parse(&spec),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("{EXCHANGE_RATES_VAR} is not valid unicode")),
        }
    }

    /// Parses the `FROM/TO=DECIMAL,...` text form.
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let rates = spec
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| parse_entry(entry).with_context(|| format!("invalid rate entry {entry:?}")))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { rates })
    }

    /// Builds the table; later entries for the same pair win.
    pub fn into_table(self) -> ExchangeRateTable {
        self.rates
            .into_iter()
            .map(|(from, to, rate)| ((from, to), rate))
            .collect()
    }
}

fn parse_entry(entry: &str) -> anyhow::Result<(CurrencyCode, CurrencyCode, Money)> {
    let Some((pair, rate)) = entry.split_once('=') else {
        bail!("expected FROM/TO=RATE");
    };
    let Some((from, to)) = pair.split_once('/') else {
        bail!("expected FROM/TO before '='");
    };
    let from = CurrencyCode::new(from.trim())?;
    let to = CurrencyCode::new(to.trim())?;
    let (units, nanos) = parse_decimal(rate.trim())?;

    Ok((from, to, Money::new(to, units, nanos)?))
}

/// Splits a non-negative decimal into whole units and nanos without
/// going through floating point.
fn parse_decimal(text: &str) -> anyhow::Result<(i64, i32)> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    ensure!(
        !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()),
        "rate must be a non-negative decimal, got {text:?}"
    );
    ensure!(
        fraction.len() <= 9 && fraction.bytes().all(|b| b.is_ascii_digit()),
        "rate allows at most 9 fractional digits, got {text:?}"
    );

    let units: i64 = whole.parse().context("rate is too large")?;
    let mut nanos = fraction
        .bytes()
        .fold(0i32, |acc, digit| acc * 10 + i32::from(digit - b'0'));
    for _ in fraction.len()..9 {
        nanos *= 10;
    }
    debug_assert!(nanos < NANOS_PER_UNIT);

    Ok((units, nanos))
}
