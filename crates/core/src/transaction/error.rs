//! Transaction error types.
//!
//! Every variant surfaces to the caller unchanged; money movements are
//! never retried automatically.

use bankapi_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during deposit, withdraw or transfer.
#[derive(Debug, Error)]
pub enum TransactionError {
    // ========== Validation Errors ==========
    /// No account has this number.
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    /// Requested amount exceeds balance + special limit.
    #[error("Insufficient funds in account {account_number}: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Source account number.
        account_number: i64,
        /// Amount requested.
        requested: Decimal,
        /// Balance plus special limit.
        available: Decimal,
    },

    /// Source and receiver are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(i64),

    /// The movement would push a balance past the storable range.
    #[error("Balance of account {0} would exceed the supported range")]
    BalanceOutOfRange(i64),

    // ========== Engine Errors ==========
    /// Balance check was run on a candidate without a source account.
    #[error("Balance check requires a source account")]
    MissingSourceAccount,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl TransactionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::SameAccountTransfer(_) => "SAME_ACCOUNT_TRANSFER",
            Self::BalanceOutOfRange(_) => "BALANCE_OUT_OF_RANGE",
            Self::MissingSourceAccount => "MISSING_SOURCE_ACCOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error on transaction endpoints.
    ///
    /// A missing account is a bad request here, not a 404: the account is
    /// referenced from the body, not the path.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_)
            | Self::InsufficientFunds { .. }
            | Self::SameAccountTransfer(_)
            | Self::BalanceOutOfRange(_) => 400,

            Self::MissingSourceAccount | Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for TransactionError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::AccountNotFound(_)
            | TransactionError::InsufficientFunds { .. }
            | TransactionError::SameAccountTransfer(_)
            | TransactionError::BalanceOutOfRange(_) => Self::BusinessRule(err.to_string()),
            TransactionError::MissingSourceAccount => Self::Internal(err.to_string()),
            TransactionError::Database(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransactionError::AccountNotFound(1).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        assert_eq!(
            TransactionError::MissingSourceAccount.error_code(),
            "MISSING_SOURCE_ACCOUNT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(TransactionError::AccountNotFound(1).http_status_code(), 400);
        assert_eq!(TransactionError::SameAccountTransfer(1).http_status_code(), 400);
        assert_eq!(TransactionError::BalanceOutOfRange(1).http_status_code(), 400);
        assert_eq!(TransactionError::MissingSourceAccount.http_status_code(), 500);
        assert_eq!(
            TransactionError::Database("test".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_status_matches_app_error() {
        let errors = [
            TransactionError::AccountNotFound(9832),
            TransactionError::InsufficientFunds {
                account_number: 1,
                requested: dec!(1501),
                available: dec!(1300),
            },
            TransactionError::SameAccountTransfer(1),
            TransactionError::BalanceOutOfRange(1),
            TransactionError::MissingSourceAccount,
            TransactionError::Database("x".to_string()),
        ];
        for err in errors {
            let status = err.http_status_code();
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_error_display() {
        let err = TransactionError::InsufficientFunds {
            account_number: 99988,
            requested: dec!(1501),
            available: dec!(1300),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 99988: requested 1501, available 1300"
        );
    }
}
