//! Shared types, errors, and configuration for the bank API.
//!
//! This crate provides common types used across all other crates:
//! - Strictly positive `Amount` backed by `Decimal`
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
