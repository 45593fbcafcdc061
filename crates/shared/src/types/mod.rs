//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{Amount, AmountError, MAX_MONEY, MONEY_SCALE, check_money, money_add, money_sub};
