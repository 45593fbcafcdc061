//! Money movements.
//!
//! This module implements the core transaction functionality:
//! - Transaction records and candidates (`PendingTransaction`)
//! - Account lookup and available-balance validators
//! - The transaction engine orchestrating deposit, withdraw and transfer
//! - Error types for transaction operations

pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod engine_props;

pub use engine::TransactionEngine;
pub use error::TransactionError;
pub use types::{PendingTransaction, Transaction, TransactionType};
pub use validation::{
    AccountLookup, AvailableAccountValidator, AvailableBalanceValidator, BalanceValidation,
};
