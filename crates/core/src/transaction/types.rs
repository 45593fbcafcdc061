//! Transaction domain types.

use bankapi_shared::types::{Amount, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::account::Account;

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money enters the receiver account.
    Deposit,
    /// Money leaves the source account.
    Withdraw,
    /// Money moves from the source to the receiver account.
    Transfer,
}

impl TransactionType {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction candidate that has not been persisted yet.
///
/// Built from resolved accounts, checked by the balance validator, then
/// mutated with [`PendingTransaction::apply`] and handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// Account money leaves (absent for deposits).
    pub source_account: Option<Account>,
    /// Account money enters (absent for withdrawals).
    pub receiver_account: Option<Account>,
    /// Amount moved.
    pub amount: Amount,
    /// Kind of movement.
    pub transaction_type: TransactionType,
}

impl PendingTransaction {
    /// Candidate for a deposit into `receiver`.
    #[must_use]
    pub fn deposit(receiver: Account, amount: Amount) -> Self {
        Self {
            source_account: None,
            receiver_account: Some(receiver),
            amount,
            transaction_type: TransactionType::Deposit,
        }
    }

    /// Candidate for a withdrawal from `source`.
    #[must_use]
    pub fn withdraw(source: Account, amount: Amount) -> Self {
        Self {
            source_account: Some(source),
            receiver_account: None,
            amount,
            transaction_type: TransactionType::Withdraw,
        }
    }

    /// Candidate for a transfer from `source` to `receiver`.
    #[must_use]
    pub fn transfer(source: Account, receiver: Account, amount: Amount) -> Self {
        Self {
            source_account: Some(source),
            receiver_account: Some(receiver),
            amount,
            transaction_type: TransactionType::Transfer,
        }
    }

    /// Applies the balance mutation: debit the source, credit the receiver.
    ///
    /// Both sides move by the same amount (no fees). Either both balances
    /// change or neither does.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOutOfRange` if a new balance would not fit a money
    /// column.
    pub fn apply(&mut self) -> Result<(), TransactionError> {
        let mut source = self.source_account.clone();
        let mut receiver = self.receiver_account.clone();

        if let Some(account) = source.as_mut() {
            account
                .debit(self.amount)
                .map_err(|_| TransactionError::BalanceOutOfRange(account.number))?;
        }
        if let Some(account) = receiver.as_mut() {
            account
                .credit(self.amount)
                .map_err(|_| TransactionError::BalanceOutOfRange(account.number))?;
        }

        self.source_account = source;
        self.receiver_account = receiver;
        Ok(())
    }
}

/// A persisted, immutable transaction record.
///
/// Account snapshots reflect the balances after the movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier.
    pub id: TransactionId,
    /// Source account after the movement.
    pub source_account: Option<Account>,
    /// Receiver account after the movement.
    pub receiver_account: Option<Account>,
    /// Amount moved.
    pub amount: Amount,
    /// Kind of movement.
    pub transaction_type: TransactionType,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds the persisted record from a candidate.
    #[must_use]
    pub fn from_pending(
        id: TransactionId,
        pending: PendingTransaction,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_account: pending.source_account,
            receiver_account: pending.receiver_account,
            amount: pending.amount,
            transaction_type: pending.transaction_type,
            created_at,
        }
    }
}
