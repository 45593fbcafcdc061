//! Property-based tests for `TransactionEngine`.
//!
//! - Deposit raises the receiver balance by exactly the amount
//! - A rejected movement leaves balances and history untouched
//! - Transfer conserves the sum of both balances
//! - Spending exactly `balance + special_limit` succeeds

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bankapi_shared::types::{AccountId, Amount, TransactionId};
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::TransactionEngine;
use super::error::TransactionError;
use super::types::{PendingTransaction, Transaction};
use super::validation::{AvailableAccountValidator, AvailableBalanceValidator};
use crate::account::Account;
use crate::store::{AccountFinder, StoreError, TransactionStore};

/// In-memory bank keyed by account number.
#[derive(Clone, Default)]
struct FakeBank {
    accounts: Arc<Mutex<HashMap<i64, Account>>>,
    history: Arc<Mutex<Vec<Transaction>>>,
}

impl FakeBank {
    fn with_accounts(accounts: Vec<Account>) -> Self {
        let bank = Self::default();
        {
            let mut map = bank.accounts.lock().unwrap();
            for account in accounts {
                map.insert(account.number, account);
            }
        }
        bank
    }

    fn balance(&self, number: i64) -> Decimal {
        self.accounts.lock().unwrap()[&number].balance
    }

    fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountFinder for FakeBank {
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.lock().unwrap().get(&number).cloned())
    }
}

#[async_trait]
impl TransactionStore for FakeBank {
    async fn record(&self, pending: PendingTransaction) -> Result<Transaction, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        for account in [&pending.source_account, &pending.receiver_account]
            .into_iter()
            .flatten()
        {
            accounts.insert(account.number, account.clone());
        }

        let mut history = self.history.lock().unwrap();
        let id = TransactionId(i64::try_from(history.len()).unwrap() + 1);
        let tx = Transaction::from_pending(id, pending, Utc::now());
        history.push(tx.clone());
        Ok(tx)
    }
}

type FakeEngine =
    TransactionEngine<AvailableAccountValidator<FakeBank>, AvailableBalanceValidator, FakeBank>;

fn engine(bank: &FakeBank) -> FakeEngine {
    TransactionEngine::new(
        AvailableAccountValidator::new(bank.clone()),
        AvailableBalanceValidator,
        bank.clone(),
    )
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn account(id: i64, number: i64, balance: Decimal, special_limit: Decimal) -> Account {
    Account {
        id: AccountId(id),
        name: format!("Holder {id}"),
        number,
        balance,
        special_limit,
    }
}

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate balances, negative ones included (-5,000.00 to 10,000.00).
fn any_balance() -> impl Strategy<Value = Decimal> {
    (-500_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate special limits (0.00 to 5,000.00).
fn special_limit() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_deposit_adds_amount(
        balance in any_balance(),
        limit in special_limit(),
        amount in positive_amount(),
    ) {
        let bank = FakeBank::with_accounts(vec![account(1, 100, balance, limit)]);

        let tx = run(engine(&bank).deposit(100, Amount::new(amount).unwrap())).unwrap();

        prop_assert_eq!(bank.balance(100), balance + amount);
        prop_assert_eq!(tx.receiver_account.unwrap().balance, balance + amount);
        prop_assert_eq!(bank.history_len(), 1);
    }

    #[test]
    fn prop_rejected_withdraw_changes_nothing(
        balance in any_balance(),
        limit in special_limit(),
        excess in positive_amount(),
    ) {
        let amount = balance + limit + excess;
        prop_assume!(amount > Decimal::ZERO);

        let bank = FakeBank::with_accounts(vec![account(1, 100, balance, limit)]);
        let result = run(engine(&bank).withdraw(100, Amount::new(amount).unwrap()));

        let is_insufficient = matches!(result, Err(TransactionError::InsufficientFunds { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(bank.balance(100), balance);
        prop_assert_eq!(bank.history_len(), 0);
    }

    #[test]
    fn prop_transfer_conserves_total(
        source_balance in any_balance(),
        receiver_balance in any_balance(),
        limit in special_limit(),
        amount in positive_amount(),
    ) {
        let bank = FakeBank::with_accounts(vec![
            account(1, 100, source_balance, limit),
            account(2, 200, receiver_balance, Decimal::ZERO),
        ]);
        let total = source_balance + receiver_balance;

        let result = run(engine(&bank).transfer(100, 200, Amount::new(amount).unwrap()));

        prop_assert_eq!(bank.balance(100) + bank.balance(200), total);
        if amount <= source_balance + limit {
            prop_assert!(result.is_ok());
            prop_assert_eq!(bank.balance(100), source_balance - amount);
            prop_assert_eq!(bank.balance(200), receiver_balance + amount);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(bank.history_len(), 0);
        }
    }

    #[test]
    fn prop_exact_capacity_withdraw_succeeds(
        balance in any_balance(),
        limit in special_limit(),
    ) {
        let capacity = balance + limit;
        prop_assume!(capacity > Decimal::ZERO);

        let bank = FakeBank::with_accounts(vec![account(1, 100, balance, limit)]);
        let tx = run(engine(&bank).withdraw(100, Amount::new(capacity).unwrap())).unwrap();

        prop_assert_eq!(bank.balance(100), -limit);
        prop_assert_eq!(tx.source_account.unwrap().balance, -limit);
    }
}
