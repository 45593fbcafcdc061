//! Account domain.
//!
//! - `Account` records and the input used to create or overwrite them
//! - Error types for account operations
//! - `AccountService` for CRUD over any `AccountStore`

pub mod error;
pub mod service;
pub mod types;

pub use error::AccountError;
pub use service::AccountService;
pub use types::{Account, AccountInput};
