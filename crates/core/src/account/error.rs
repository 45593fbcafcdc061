//! Account error types.

use bankapi_shared::{AppError, types::AccountId};
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during account CRUD.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Account number already used by another account.
    #[error("Account number {0} already exists")]
    DuplicateNumber(i64),

    /// Input failed a domain rule.
    #[error("Invalid account: {0}")]
    Invalid(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateNumber(_) => "DUPLICATE_ACCOUNT_NUMBER",
            Self::Invalid(_) => "INVALID_ACCOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateNumber(number) => Self::DuplicateNumber(number),
            StoreError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => Self::NotFound(err.to_string()),
            AccountError::DuplicateNumber(_) => Self::Conflict(err.to_string()),
            AccountError::Invalid(msg) => Self::Validation(msg),
            AccountError::Database(msg) => Self::Database(msg),
        }
    }
}
