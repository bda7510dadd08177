//! Concurrent deposit/withdraw tests.
//!
//! Each test is repeated to give races a chance to show up.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use exchange_rates::default_rates;
use ledger_account::{Account, SavingsAccount};
use ledger_types::{CurrencyCode, DomainError, Money};

const ROUNDS: usize = 20;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn usd(units: i64, nanos: i32) -> Money {
    Money::new(CurrencyCode::USD, units, nanos).unwrap()
}

#[test]
fn test_concurrent_deposits_conserve_total() {
    init_tracing();
    let rates = default_rates();

    for n in [100i64, 250, 500] {
        for _ in 0..ROUNDS {
            let account = SavingsAccount::new(&rates);

            thread::scope(|s| {
                for _ in 0..n {
                    s.spawn(|| account.deposit(usd(1, 0)).unwrap());
                }
            });

            assert_eq!(account.balance(), usd(n, 0));
        }
    }
}

#[test]
fn test_concurrent_fractional_deposits_carry_exactly() {
    let rates = default_rates();

    for _ in 0..ROUNDS {
        let account = SavingsAccount::new(&rates);

        thread::scope(|s| {
            for _ in 0..300 {
                s.spawn(|| account.deposit(usd(0, 10_000_000)).unwrap());
            }
        });

        assert_eq!(account.balance(), usd(3, 0));
    }
}

#[test]
fn test_concurrent_withdrawals_never_overdraw() {
    init_tracing();
    let rates = default_rates();

    for _ in 0..ROUNDS {
        let account = SavingsAccount::with_balance(&rates, usd(100, 0));
        let applied = AtomicUsize::new(0);
        let rejected = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..200 {
                s.spawn(|| match account.withdraw(usd(1, 0)) {
                    Ok(()) => {
                        applied.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(DomainError::Overdraft { .. }) => {
                        rejected.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => panic!("unexpected error: {e}"),
                });
            }
        });

        assert_eq!(applied.load(Ordering::SeqCst), 100);
        assert_eq!(rejected.load(Ordering::SeqCst), 100);
        assert!(account.balance().is_zero());
    }
}

#[test]
fn test_mixed_transactions_settle() {
    // Withdrawals total 60, matching the opening balance, so no interleaving
    // can overdraw and every transaction applies.
    let rates = default_rates();
    let transactions: Vec<(bool, i64)> = std::iter::repeat_n((false, 1), 100)
        .chain(std::iter::repeat_n((true, 1), 50))
        .chain([(true, 10)])
        .collect();

    for _ in 0..ROUNDS {
        let account = SavingsAccount::with_balance(&rates, usd(60, 0));

        thread::scope(|s| {
            for &(is_withdrawal, units) in &transactions {
                let account = &account;
                s.spawn(move || {
                    if is_withdrawal {
                        account.withdraw(usd(units, 0)).unwrap();
                    } else {
                        account.deposit(usd(units, 0)).unwrap();
                    }
                });
            }
        });

        assert_eq!(account.balance(), usd(100, 0));
    }
}

#[test]
fn test_snapshot_reads_during_writes_are_consistent() {
    let rates = default_rates();
    let account = SavingsAccount::new(&rates);

    thread::scope(|s| {
        for _ in 0..100 {
            s.spawn(|| account.deposit(usd(0, 500_000_000)).unwrap());
        }
        s.spawn(|| {
            for _ in 0..1_000 {
                let snapshot = account.balance();
                assert_eq!(snapshot.currency_code(), CurrencyCode::USD);
                assert!(snapshot.nanos() == 0 || snapshot.nanos() == 500_000_000);
            }
        });
    });

    assert_eq!(account.balance(), usd(50, 0));
}
