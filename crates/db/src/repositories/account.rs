//! Account repository for account record database operations.

use async_trait::async_trait;
use bankapi_core::account::{Account, AccountInput};
use bankapi_core::store::{AccountFinder, AccountStore, StoreError};
use bankapi_shared::types::AccountId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, Unchanged,
};

use crate::entities::accounts;

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(accounts.into_iter().map(into_domain).collect())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let account = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(account.map(into_domain))
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        find_by_number(&self.db, number).await
    }

    async fn insert(&self, input: AccountInput) -> Result<Account, StoreError> {
        if find_by_number(&self.db, input.number).await?.is_some() {
            return Err(StoreError::DuplicateNumber(input.number));
        }

        let number = input.number;
        let account = accounts::ActiveModel {
            name: Set(input.name),
            number: Set(input.number),
            balance: Set(input.balance),
            special_limit: Set(input.special_limit),
            ..Default::default()
        };

        let account = account
            .insert(&self.db)
            .await
            .map_err(|e| number_conflict(e, number))?;

        tracing::info!(account_id = account.id, number, "Account created");
        Ok(into_domain(account))
    }

    async fn update(&self, account: &Account) -> Result<Account, StoreError> {
        let model = accounts::ActiveModel {
            id: Unchanged(account.id.into_inner()),
            name: Set(account.name.clone()),
            number: Set(account.number),
            balance: Set(account.balance),
            special_limit: Set(account.special_limit),
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| number_conflict(e, account.number))?;

        tracing::info!(account_id = updated.id, "Account overwritten");
        Ok(into_domain(updated))
    }
}

#[async_trait]
impl AccountFinder for AccountRepository {
    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        find_by_number(&self.db, number).await
    }
}

/// Looks up an account by number on any connection or transaction.
pub(crate) async fn find_by_number<C: ConnectionTrait>(
    conn: &C,
    number: i64,
) -> Result<Option<Account>, StoreError> {
    let account = accounts::Entity::find()
        .filter(accounts::Column::Number.eq(number))
        .one(conn)
        .await
        .map_err(store_error)?;

    Ok(account.map(into_domain))
}

/// Converts a row into the domain account.
pub(crate) fn into_domain(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_raw(model.id),
        name: model.name,
        number: model.number,
        balance: model.balance,
        special_limit: model.special_limit,
    }
}

/// Maps any database error to a store error.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Maps a unique violation on `number` to `DuplicateNumber`.
fn number_conflict(err: DbErr, number: i64) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateNumber(number),
        _ => store_error(err),
    }
}
