//! Core business logic for the bank API.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and balance mutations live here; the
//! database crate plugs in through the traits in [`store`].
//!
//! # Modules
//!
//! - `account` - Account domain type and CRUD service
//! - `transaction` - Account/balance validators and the transaction engine
//! - `store` - Persistence seams implemented by the database layer

pub mod account;
pub mod store;
pub mod transaction;
