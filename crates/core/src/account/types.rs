//! Account domain types.

use bankapi_shared::types::{AccountId, Amount, AmountError, money_add, money_sub};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bank account.
///
/// `balance + special_limit` is the spendable capacity, so the balance may
/// drop as low as `-special_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned surrogate key.
    pub id: AccountId,
    /// Holder name.
    pub name: String,
    /// Unique business key used by every money movement.
    pub number: i64,
    /// Current balance.
    pub balance: Decimal,
    /// Overdraft allowance, never negative.
    pub special_limit: Decimal,
}

impl Account {
    /// Returns the available capacity (`balance + special_limit`).
    ///
    /// Saturates at `Decimal::MAX` instead of panicking.
    #[must_use]
    pub fn available_capacity(&self) -> Decimal {
        self.balance.saturating_add(self.special_limit)
    }

    /// Returns true if `amount` can be taken out without exceeding the capacity.
    #[must_use]
    pub fn can_cover(&self, amount: Amount) -> bool {
        amount.value() <= self.available_capacity()
    }

    /// Adds `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the new balance would not fit a money column;
    /// the balance is left unchanged.
    pub fn credit(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.balance = money_add(self.balance, amount.value())?;
        Ok(())
    }

    /// Subtracts `amount` from the balance. Callers check `can_cover` first.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the new balance would not fit a money column;
    /// the balance is left unchanged.
    pub fn debit(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.balance = money_sub(self.balance, amount.value())?;
        Ok(())
    }

    /// Overwrites every user-editable field with `input`.
    pub fn apply_input(&mut self, input: AccountInput) {
        self.name = input.name;
        self.number = input.number;
        self.balance = input.balance;
        self.special_limit = input.special_limit;
    }
}

/// Input for creating or overwriting an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInput {
    /// Holder name (must not be blank).
    pub name: String,
    /// Unique account number.
    pub number: i64,
    /// Initial (or replacement) balance.
    pub balance: Decimal,
    /// Overdraft allowance (must be >= 0).
    pub special_limit: Decimal,
}
