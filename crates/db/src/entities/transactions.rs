//! `SeaORM` Entity for transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub source_account_id: Option<i64>,
    pub receiver_account_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SourceAccountId",
        to = "super::accounts::Column::Id"
    )]
    SourceAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ReceiverAccountId",
        to = "super::accounts::Column::Id"
    )]
    ReceiverAccount,
}

impl ActiveModelBehavior for ActiveModel {}
