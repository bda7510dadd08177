//! Fixed-point monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Number of nanos in one whole unit.
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

const NANOS_PER_UNIT_WIDE: i128 = NANOS_PER_UNIT as i128;

/// Decimal money split into whole `units` and billionths (`nanos`).
///
/// Keeping both parts as integers makes every addition exact; there is no
/// floating-point amount anywhere. `nanos` is zero or carries the sign of
/// `units`, and when `units` is zero it may carry either sign.
///
/// Equality (`==`) requires the same currency code, units and nanos.
/// Values in different currencies never compare equal and never combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    currency_code: CurrencyCode,
    units: i64,
    nanos: i32,
}

#[derive(Deserialize)]
struct RawMoney {
    currency_code: CurrencyCode,
    units: i64,
    nanos: i32,
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.currency_code, raw.units, raw.nanos)
    }
}

impl Money {
    /// Creates a new Money value.
    ///
    /// # Validation
    /// - `|nanos|` must be at most 999,999,999
    /// - non-zero `units` and non-zero `nanos` must share a sign
    pub fn new(currency_code: CurrencyCode, units: i64, nanos: i32) -> Result<Self, DomainError> {
        if nanos.unsigned_abs() >= NANOS_PER_UNIT as u32 {
            return Err(DomainError::NanosOutOfRange(nanos));
        }
        if (units > 0 && nanos < 0) || (units < 0 && nanos > 0) {
            return Err(DomainError::SignMismatch { units, nanos });
        }
        Ok(Self {
            currency_code,
            units,
            nanos,
        })
    }

    /// Creates a zero-value Money for the given currency.
    pub fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            units: 0,
            nanos: 0,
        }
    }

    /// Returns the currency code.
    pub fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Returns the whole-unit part.
    pub fn units(&self) -> i64 {
        self.units
    }

    /// Returns the fractional part in billionths of a unit.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Returns the exact value as a count of nanos.
    pub fn to_nanos(&self) -> i128 {
        self.units as i128 * NANOS_PER_UNIT_WIDE + self.nanos as i128
    }

    /// Returns the same amount labelled with another currency code.
    ///
    /// No conversion happens here; callers apply a rate first.
    pub fn with_currency(self, currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            ..self
        }
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    /// True iff the represented value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.units < 0 || (self.units == 0 && self.nanos < 0)
    }

    /// Returns the additive inverse, failing only for `i64::MIN` units.
    pub fn negate(&self) -> Result<Money, DomainError> {
        let units = self.units.checked_neg().ok_or(DomainError::Overflow)?;
        Ok(Self {
            units,
            nanos: -self.nanos,
            ..*self
        })
    }

    /// Checked addition - returns error if currencies don't match.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(&other)?;
        self.offset(other.units as i128, other.nanos)
    }

    /// Checked subtraction - returns error if currencies don't match.
    ///
    /// The result may be negative; overdraft rules belong to the account.
    pub fn checked_sub(&self, other: Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(&other)?;
        self.offset(-(other.units as i128), -other.nanos)
    }

    /// Scales the value by `mantissa * 10^exponent`.
    ///
    /// The product is computed exactly in nanos and the discarded fraction
    /// is rounded half away from zero, so `0.000000001 * 0.5` gives
    /// `0.000000001` and `-0.000000001 * 0.5` gives `-0.000000001`.
    /// The currency code is kept; a result too large to represent saturates.
    pub fn multiply(&self, mantissa: i128, exponent: i32) -> Money {
        let total = self.to_nanos();
        let scaled = scale(total, mantissa, exponent).unwrap_or({
            if total.signum() * mantissa.signum() < 0 {
                i128::MIN
            } else {
                i128::MAX
            }
        });
        Self::from_nanos(self.currency_code, scaled)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency_code != other.currency_code {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency_code,
                got: other.currency_code,
            });
        }
        Ok(())
    }

    fn offset(&self, units: i128, nanos: i32) -> Result<Money, DomainError> {
        let (units, nanos) = normalize(self.units as i128 + units, self.nanos + nanos)?;
        Ok(Self {
            currency_code: self.currency_code,
            units,
            nanos,
        })
    }

    /// Builds the value closest to `total` nanos.
    ///
    /// Totals beyond the `i64` unit range saturate to the largest
    /// representable magnitude with the same sign.
    pub fn from_nanos(currency_code: CurrencyCode, total: i128) -> Money {
        let nanos = (total % NANOS_PER_UNIT_WIDE) as i32;
        let (units, nanos) = match i64::try_from(total / NANOS_PER_UNIT_WIDE) {
            Ok(units) => (units, nanos),
            Err(_) if total < 0 => (i64::MIN, -(NANOS_PER_UNIT - 1)),
            Err(_) => (i64::MAX, NANOS_PER_UNIT - 1),
        };
        Self {
            currency_code,
            units,
            nanos,
        }
    }
}

/// Restores the carry and sign invariants after a field-wise sum.
///
/// `nanos` is the sum of two legal nanos fields, so its magnitude is below
/// two whole units. The represented value never changes.
pub(crate) fn normalize(mut units: i128, mut nanos: i32) -> Result<(i64, i32), DomainError> {
    if nanos >= NANOS_PER_UNIT {
        units += 1;
        nanos -= NANOS_PER_UNIT;
    } else if nanos <= -NANOS_PER_UNIT {
        units -= 1;
        nanos += NANOS_PER_UNIT;
    }

    if units > 0 && nanos < 0 {
        units -= 1;
        nanos += NANOS_PER_UNIT;
    } else if units < 0 && nanos > 0 {
        units += 1;
        nanos -= NANOS_PER_UNIT;
    }

    let units = i64::try_from(units).map_err(|_| DomainError::Overflow)?;
    Ok((units, nanos))
}

/// Computes `total * mantissa * 10^exponent` rounded half away from zero.
///
/// Returns `None` when the result does not fit in an `i128`.
fn scale(total: i128, mantissa: i128, exponent: i32) -> Option<i128> {
    let product = total.checked_mul(mantissa)?;
    if product == 0 {
        return Some(0);
    }
    if exponent >= 0 {
        return 10i128
            .checked_pow(exponent.unsigned_abs())
            .and_then(|factor| product.checked_mul(factor));
    }

    // A divisor beyond i128 dwarfs any product, which then rounds to zero.
    let Some(divisor) = 10i128.checked_pow(exponent.unsigned_abs()) else {
        return Some(0);
    };
    let quotient = product / divisor;
    let remainder = (product % divisor).abs();
    if remainder >= divisor - remainder {
        Some(quotient + product.signum())
    } else {
        Some(quotient)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:09} {}",
            sign,
            self.units.unsigned_abs(),
            self.nanos.unsigned_abs(),
            self.currency_code
        )
    }
}
