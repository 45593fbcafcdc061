//! Entity prelude.

pub use super::accounts::Entity as Accounts;
pub use super::transactions::Entity as Transactions;
