//! `SeaORM` entities.

pub mod prelude;

pub mod accounts;
pub mod sea_orm_active_enums;
pub mod transactions;
