//! Transaction repository for atomic money movements.
//!
//! Every movement runs the core engine inside one database transaction:
//! account rows are read with a row lock, balances are written back and the
//! transaction row is inserted before commit. Any error drops the database
//! transaction, which rolls everything back.

use async_trait::async_trait;
use bankapi_core::account::Account;
use bankapi_core::store::{AccountFinder, StoreError, TransactionStore};
use bankapi_core::transaction::{
    AvailableAccountValidator, AvailableBalanceValidator, PendingTransaction, Transaction,
    TransactionEngine, TransactionError,
};
use bankapi_shared::types::{Amount, TransactionId};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait, Unchanged,
};

use super::account::{into_domain, store_error};
use crate::entities::{accounts, transactions};

/// Store bound to one open database transaction.
///
/// Account reads take a row lock (`FOR UPDATE` on `PostgreSQL`), so two
/// movements touching the same account serialize.
#[derive(Clone, Copy)]
pub struct LedgerSession<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> LedgerSession<'a> {
    /// Binds a session to `txn`.
    #[must_use]
    pub const fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    async fn save_balance(&self, account: &Account) -> Result<(), StoreError> {
        accounts::ActiveModel {
            id: Unchanged(account.id.into_inner()),
            balance: Set(account.balance),
            ..Default::default()
        }
        .update(self.txn)
        .await
        .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl AccountFinder for LedgerSession<'_> {
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Number.eq(number))
            .lock_exclusive()
            .one(self.txn)
            .await
            .map_err(store_error)?;

        Ok(account.map(into_domain))
    }
}

#[async_trait]
impl TransactionStore for LedgerSession<'_> {
    async fn record(&self, pending: PendingTransaction) -> Result<Transaction, StoreError> {
        if let Some(source) = &pending.source_account {
            self.save_balance(source).await?;
        }
        if let Some(receiver) = &pending.receiver_account {
            self.save_balance(receiver).await?;
        }

        let row = transactions::ActiveModel {
            source_account_id: Set(pending.source_account.as_ref().map(|a| a.id.into_inner())),
            receiver_account_id: Set(pending.receiver_account.as_ref().map(|a| a.id.into_inner())),
            amount: Set(pending.amount.value()),
            transaction_type: Set(pending.transaction_type.into()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(store_error)?;

        Ok(Transaction::from_pending(
            TransactionId::from_raw(row.id),
            pending,
            row.created_at.with_timezone(&Utc),
        ))
    }
}

type SessionEngine<'a> = TransactionEngine<
    AvailableAccountValidator<LedgerSession<'a>>,
    AvailableBalanceValidator,
    LedgerSession<'a>,
>;

fn engine(txn: &DatabaseTransaction) -> SessionEngine<'_> {
    let session = LedgerSession::new(txn);
    TransactionEngine::new(
        AvailableAccountValidator::new(session),
        AvailableBalanceValidator,
        session,
    )
}

/// Transaction repository running each movement in its own unit of work.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deposits `amount` into the account with `receiver_number`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown receiver, or `Database`.
    pub async fn deposit(
        &self,
        receiver_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = engine(&txn).deposit(receiver_number, amount).await;
        finish(txn, result).await
    }

    /// Withdraws `amount` from the account with `source_number`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `InsufficientFunds`, or `Database`.
    pub async fn withdraw(
        &self,
        source_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = engine(&txn).withdraw(source_number, amount).await;
        finish(txn, result).await
    }

    /// Transfers `amount` between two accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `SameAccountTransfer`, `InsufficientFunds`,
    /// or `Database`.
    pub async fn transfer(
        &self,
        source_number: i64,
        receiver_number: i64,
        amount: Amount,
    ) -> Result<Transaction, TransactionError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = engine(&txn)
            .transfer(source_number, receiver_number, amount)
            .await;
        finish(txn, result).await
    }
}

/// Commits on success, rolls back on failure.
async fn finish(
    txn: DatabaseTransaction,
    result: Result<Transaction, TransactionError>,
) -> Result<Transaction, TransactionError> {
    match result {
        Ok(transaction) => {
            txn.commit().await.map_err(store_error)?;
            tracing::info!(
                transaction_id = %transaction.id,
                transaction_type = %transaction.transaction_type,
                amount = %transaction.amount,
                "Transaction committed"
            );
            Ok(transaction)
        }
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::error!(error = %rollback, "Rollback failed");
            }
            tracing::warn!(error_code = err.error_code(), error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}
