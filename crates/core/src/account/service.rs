//! Account service for CRUD over account records.
//!
//! Balances change here only through a direct overwrite (`update`); money
//! movements go through the transaction engine.

use bankapi_shared::types::{AccountId, check_money};
use rust_decimal::Decimal;

use super::error::AccountError;
use super::types::{Account, AccountInput};
use crate::store::AccountStore;

/// Account service over any `AccountStore`.
#[derive(Debug, Clone)]
pub struct AccountService<S> {
    store: S,
}

impl<S: AccountStore> AccountService<S> {
    /// Creates a new account service.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists all accounts.
    pub async fn get_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.store.find_all().await?)
    }

    /// Finds an account by its number.
    pub async fn get_by_number(&self, number: i64) -> Result<Option<Account>, AccountError> {
        Ok(self.store.find_by_number(number).await?)
    }

    /// Creates an account with the given opening balance and special limit.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a blank name, a negative limit or money that
    /// does not fit two decimal places, and `DuplicateNumber` if the number
    /// is taken.
    pub async fn save(&self, input: AccountInput) -> Result<Account, AccountError> {
        validate_input(&input)?;
        Ok(self.store.insert(input).await?)
    }

    /// Overwrites the account with surrogate key `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this id; nothing is saved in that case.
    pub async fn update(&self, id: AccountId, input: AccountInput) -> Result<Account, AccountError> {
        validate_input(&input)?;

        let mut account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        account.apply_input(input);
        Ok(self.store.update(&account).await?)
    }
}

/// Checks the domain rules every account input must satisfy.
fn validate_input(input: &AccountInput) -> Result<(), AccountError> {
    if input.name.trim().is_empty() {
        return Err(AccountError::Invalid("name must not be blank".to_string()));
    }
    if input.special_limit < Decimal::ZERO {
        return Err(AccountError::Invalid(
            "special limit must not be negative".to_string(),
        ));
    }
    for value in [input.balance, input.special_limit] {
        check_money(value).map_err(|e| AccountError::Invalid(e.to_string()))?;
    }
    Ok(())
}
