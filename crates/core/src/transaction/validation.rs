//! Business rule validation for money movements.
//!
//! Both validators sit behind traits so the engine can be driven with
//! substitutes in tests.

use async_trait::async_trait;

use super::error::TransactionError;
use super::types::PendingTransaction;
use crate::account::Account;
use crate::store::AccountFinder;

/// Resolves an account number to an existing account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Returns the account with `number`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this number.
    async fn validate(&self, number: i64) -> Result<Account, TransactionError>;
}

/// Checks that a candidate's source account can cover its amount.
#[cfg_attr(test, mockall::automock)]
pub trait BalanceValidation: Send + Sync {
    /// Validates `transaction` without mutating it.
    ///
    /// # Errors
    ///
    /// Returns `MissingSourceAccount` if the candidate has no source and
    /// `InsufficientFunds` if `amount > balance + special_limit`.
    fn validate(&self, transaction: &PendingTransaction) -> Result<(), TransactionError>;
}

/// Account lookup backed by an `AccountFinder`.
#[derive(Debug, Clone)]
pub struct AvailableAccountValidator<F> {
    finder: F,
}

impl<F> AvailableAccountValidator<F> {
    /// Creates a validator over `finder`.
    #[must_use]
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }
}

#[async_trait]
impl<F: AccountFinder> AccountLookup for AvailableAccountValidator<F> {
    async fn validate(&self, number: i64) -> Result<Account, TransactionError> {
        self.finder
            .find_by_number(number)
            .await?
            .ok_or(TransactionError::AccountNotFound(number))
    }
}

/// Balance check against `balance + special_limit`.
///
/// Equality is allowed: an account may be drained down to exactly
/// `-special_limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableBalanceValidator;

impl BalanceValidation for AvailableBalanceValidator {
    fn validate(&self, transaction: &PendingTransaction) -> Result<(), TransactionError> {
        let source = transaction
            .source_account
            .as_ref()
            .ok_or(TransactionError::MissingSourceAccount)?;

        if !source.can_cover(transaction.amount) {
            return Err(TransactionError::InsufficientFunds {
                account_number: source.number,
                requested: transaction.amount.value(),
                available: source.available_capacity(),
            });
        }

        Ok(())
    }
}
