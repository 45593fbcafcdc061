//! Enums stored as strings.

use bankapi_core::transaction::TransactionType as DomainTransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionType {
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    #[sea_orm(string_value = "WITHDRAW")]
    Withdraw,
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
}

impl From<DomainTransactionType> for TransactionType {
    fn from(value: DomainTransactionType) -> Self {
        match value {
            DomainTransactionType::Deposit => Self::Deposit,
            DomainTransactionType::Withdraw => Self::Withdraw,
            DomainTransactionType::Transfer => Self::Transfer,
        }
    }
}

impl From<TransactionType> for DomainTransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Deposit => Self::Deposit,
            TransactionType::Withdraw => Self::Withdraw,
            TransactionType::Transfer => Self::Transfer,
        }
    }
}
