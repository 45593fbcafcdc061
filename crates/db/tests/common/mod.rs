//! Shared setup for database integration tests.

#![allow(dead_code)]

use bankapi_core::account::{Account, AccountInput};
use bankapi_core::store::AccountStore;
use bankapi_db::AccountRepository;
use bankapi_db::migration::{Migrator, MigratorTrait};
use bankapi_shared::config::DatabaseConfig;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Connects to a fresh in-memory `SQLite` database with the schema applied.
///
/// One connection only, so every query sees the same in-memory database.
pub async fn setup() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        migrate_on_start: false,
    };
    let db = bankapi_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Connects to a migrated file-backed `SQLite` database with a pool of
/// `max_connections`, so transactions really run side by side.
///
/// Keep the returned `TempDir` alive for as long as the database is used.
pub async fn setup_shared(max_connections: u32) -> (DatabaseConnection, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("bank.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections,
        min_connections: 1,
        migrate_on_start: false,
    };
    let db = bankapi_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    (db, temp_dir)
}

/// Inserts an account and returns it.
pub async fn create_account(
    db: &DatabaseConnection,
    number: i64,
    balance: Decimal,
    special_limit: Decimal,
) -> Account {
    AccountRepository::new(db.clone())
        .insert(AccountInput {
            name: format!("Holder {number}"),
            number,
            balance,
            special_limit,
        })
        .await
        .expect("Failed to create account")
}

/// Reads the current balance of the account with `number`.
pub async fn balance_of(db: &DatabaseConnection, number: i64) -> Decimal {
    AccountRepository::new(db.clone())
        .find_by_number(number)
        .await
        .expect("Failed to read account")
        .expect("Account missing")
        .balance
}
