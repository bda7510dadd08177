//! Savings Account
//!
//! A single balance behind one lock. Every deposit and withdrawal holds the
//! lock for its whole read-compute-validate-store sequence, so concurrent
//! callers are applied in some serial order and a rejected operation leaves
//! the balance untouched.

use exchange_rates::{ExchangeRateTable, current_rates};
use ledger_types::{
    Account, AccountId, CurrencyCode, DomainError, ExchangeError, ExchangeRateProvider, Money,
};
use parking_lot::Mutex;

/// Exponent applied to a rate's nanos-scaled mantissa.
const RATE_EXPONENT: i32 = -9;

/// Account holding one balance in one currency.
///
/// Generic over `P: ExchangeRateProvider` - the rate table is injected so
/// tests and callers can supply their own.
pub struct SavingsAccount<P: ExchangeRateProvider> {
    id: AccountId,
    rates: P,
    balance: Mutex<Money>,
}

impl<P: ExchangeRateProvider> SavingsAccount<P> {
    /// Creates an account with a zero USD balance.
    pub fn new(rates: P) -> Self {
        Self::with_balance(rates, Money::zero(CurrencyCode::USD))
    }

    /// Creates an account with an explicit opening balance.
    ///
    /// The account's currency is the currency of this balance.
    pub fn with_balance(rates: P, balance: Money) -> Self {
        let id = AccountId::new();
        tracing::debug!(account = %id, %balance, "Opened savings account");
        Self {
            id,
            rates,
            balance: Mutex::new(balance),
        }
    }

    /// Returns the account id.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the account currency.
    pub fn currency_code(&self) -> CurrencyCode {
        self.balance().currency_code()
    }
}

impl Default for SavingsAccount<&'static ExchangeRateTable> {
    /// Zero USD balance against the process-wide rate table.
    fn default() -> Self {
        Self::new(current_rates())
    }
}

impl<P: ExchangeRateProvider> Account for SavingsAccount<P> {
    fn balance(&self) -> Money {
        *self.balance.lock()
    }

    fn balance_as_currency(&self, currency_code: CurrencyCode) -> Result<Money, ExchangeError> {
        let balance = self.balance();
        let rate = self.rates.rate(balance.currency_code(), currency_code)?;
        Ok(convert(balance, rate, currency_code))
    }

    fn deposit(&self, amount: Money) -> Result<(), DomainError> {
        let mut balance = self.balance.lock();
        let updated = balance.checked_add(amount).inspect_err(|e| {
            tracing::warn!(account = %self.id, %amount, error = %e, "Deposit rejected");
        })?;

        *balance = updated;
        tracing::debug!(account = %self.id, %amount, balance = %updated, "Deposit applied");
        Ok(())
    }

    fn withdraw(&self, amount: Money) -> Result<(), DomainError> {
        let mut balance = self.balance.lock();
        let updated = balance.checked_sub(amount).inspect_err(|e| {
            tracing::warn!(account = %self.id, %amount, error = %e, "Withdrawal rejected");
        })?;

        if updated.is_negative() {
            let available = *balance;
            tracing::warn!(account = %self.id, %amount, %available, "Withdrawal rejected: overdraft");
            return Err(DomainError::Overdraft {
                requested: amount,
                available,
            });
        }

        *balance = updated;
        tracing::debug!(account = %self.id, %amount, balance = %updated, "Withdrawal applied");
        Ok(())
    }
}

/// Applies `rate` to `balance` and relabels the result as `currency_code`.
///
/// The rate is read as a nine-decimal fraction: its whole value in nanos
/// is the mantissa and the exponent is fixed at -9.
fn convert(balance: Money, rate: Money, currency_code: CurrencyCode) -> Money {
    balance
        .multiply(rate.to_nanos(), RATE_EXPONENT)
        .with_currency(currency_code)
}
