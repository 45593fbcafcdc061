//! Transaction engine orchestrating deposit, withdraw and transfer.
//!
//! Each operation runs the same pipeline:
//! 1. Resolve accounts (a transfer resolves both in account-number order)
//! 2. Build the candidate
//! 3. Check the source balance (withdraw and transfer only)
//! 4. Apply the balance mutation
//! 5. Hand the mutated candidate to the store
//!
//! The engine itself is not atomic. Callers run it against a store bound
//! to one database transaction and commit only on `Ok`.

use bankapi_shared::types::Amount;

use super::error::TransactionError;
use super::types::{PendingTransaction, Transaction};
use super::validation::{AccountLookup, BalanceValidation};
use crate::store::TransactionStore;

/// Runs money movements over an account lookup, a balance check and a store.
#[derive(Debug, Clone)]
pub struct TransactionEngine<L, B, S> {
    accounts: L,
    balance: B,
    store: S,
}

impl<L, B, S> TransactionEngine<L, B, S>
where
    L: AccountLookup,
    B: BalanceValidation,
    S: TransactionStore,
{
    /// Creates a new engine.
    #[must_use]
    pub const fn new(accounts: L, balance: B, store: S) -> Self {
        Self {
            accounts,
            balance,
            store,
        }
    }

    /// Credits `amount` to the account with `receiver_number`.
    ///
    /// Deposits never check the balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown receiver, `BalanceOutOfRange`
    /// if the new balance would not fit a money column, or a store error.
    pub async fn deposit(
        &self,
        receiver_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let receiver = self.accounts.validate(receiver_number).await?;

        let mut pending = PendingTransaction::deposit(receiver, amount);
        pending.apply()?;

        Ok(self.store.record(pending).await?)
    }

    /// Debits `amount` from the account with `source_number`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown source, `InsufficientFunds`
    /// if the amount exceeds balance plus special limit, or a store error.
    pub async fn withdraw(
        &self,
        source_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let source = self.accounts.validate(source_number).await?;

        let mut pending = PendingTransaction::withdraw(source, amount);
        self.balance.validate(&pending)?;
        pending.apply()?;

        Ok(self.store.record(pending).await?)
    }

    /// Moves `amount` from `source_number` to `receiver_number`.
    ///
    /// Both accounts are resolved in ascending number order, so two opposite
    /// transfers between the same pair lock their rows in the same order.
    /// Errors still name the source first when both numbers are unknown.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `SameAccountTransfer`, `InsufficientFunds`,
    /// `BalanceOutOfRange`, or a store error.
    pub async fn transfer(
        &self,
        source_number: i64,
        receiver_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let (source, receiver) = if source_number <= receiver_number {
            let source = self.accounts.validate(source_number).await;
            let receiver = self.accounts.validate(receiver_number).await;
            (source, receiver)
        } else {
            let receiver = self.accounts.validate(receiver_number).await;
            let source = self.accounts.validate(source_number).await;
            (source, receiver)
        };
        let (source, receiver) = (source?, receiver?);

        if source.id == receiver.id {
            return Err(TransactionError::SameAccountTransfer(source.number));
        }

        let mut pending = PendingTransaction::transfer(source, receiver, amount);
        self.balance.validate(&pending)?;
        pending.apply()?;

        Ok(self.store.record(pending).await?)
    }
}
