//! Persistence seams.
//!
//! The core crate never talks to a database. These traits are implemented by
//! the database crate (and by mocks in tests). Implementations used by the
//! transaction engine must run inside a single unit of work so that balance
//! updates and the transaction record commit or roll back together.

use async_trait::async_trait;
use bankapi_shared::types::AccountId;
use thiserror::Error;

use crate::account::{Account, AccountInput};
use crate::transaction::{PendingTransaction, Transaction};

/// Errors raised by store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another account already uses this number.
    #[error("Account number {0} already exists")]
    DuplicateNumber(i64),

    /// Any other storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Looks up accounts by their business key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountFinder: Send + Sync {
    /// Returns the account with `number`, if any.
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError>;
}

/// CRUD access to account records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns every account ordered by id.
    async fn find_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Returns the account with surrogate key `id`, if any.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Returns the account with `number`, if any.
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError>;

    /// Inserts a new account and returns it with its assigned id.
    async fn insert(&self, input: AccountInput) -> Result<Account, StoreError>;

    /// Overwrites an existing account.
    async fn update(&self, account: &Account) -> Result<Account, StoreError>;
}

/// Persists the outcome of a money movement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Saves the (already mutated) account balances and inserts the
    /// transaction record, returning it with its assigned id.
    async fn record(&self, pending: PendingTransaction) -> Result<Transaction, StoreError>;
}
