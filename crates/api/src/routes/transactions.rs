//! Money movement routes.
//!
//! Unknown accounts and insufficient funds are 400s here: the accounts are
//! named in the body, not the path.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use bankapi_core::transaction::{Transaction, TransactionType};
use bankapi_db::TransactionRepository;
use bankapi_shared::types::{Amount, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::accounts::AccountResponse;
use crate::{AppState, error::ApiError, extractors::ValidatedJson};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transaction/deposit", post(deposit))
        .route("/transaction/withdraw", post(withdraw))
        .route("/transaction/transfer", post(transfer))
}

/// Request body for a deposit.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Account receiving the money.
    pub receiver_account_number: i64,
    /// Amount, strictly positive.
    pub amount: Amount,
}

/// Request body for a withdrawal.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    /// Account the money leaves.
    pub source_account_number: i64,
    /// Amount, strictly positive.
    pub amount: Amount,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Account the money leaves.
    pub source_account_number: i64,
    /// Account receiving the money.
    pub receiver_account_number: i64,
    /// Amount, strictly positive.
    pub amount: Amount,
}

/// Response for a committed transaction.
///
/// Account snapshots carry the balances after the movement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction id.
    pub id: TransactionId,
    /// `DEPOSIT`, `WITHDRAW` or `TRANSFER`.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount moved.
    pub amount: Amount,
    /// Source account, absent for deposits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account: Option<AccountResponse>,
    /// Receiver account, absent for withdrawals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_account: Option<AccountResponse>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            source_account: tx.source_account.map(AccountResponse::from),
            receiver_account: tx.receiver_account.map(AccountResponse::from),
            created_at: tx.created_at,
        }
    }
}

fn repository(state: &AppState) -> TransactionRepository {
    TransactionRepository::new((*state.db).clone())
}

/// POST `/transaction/deposit` - Credit an account.
async fn deposit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DepositRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    info!(
        receiver = payload.receiver_account_number,
        amount = %payload.amount,
        "Deposit requested"
    );

    let tx = repository(&state)
        .deposit(payload.receiver_account_number, payload.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(tx.into())))
}

/// POST `/transaction/withdraw` - Debit an account within its special limit.
async fn withdraw(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WithdrawRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    info!(
        source = payload.source_account_number,
        amount = %payload.amount,
        "Withdraw requested"
    );

    let tx = repository(&state)
        .withdraw(payload.source_account_number, payload.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(tx.into())))
}

/// POST `/transaction/transfer` - Move money between two accounts.
async fn transfer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TransferRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    info!(
        source = payload.source_account_number,
        receiver = payload.receiver_account_number,
        amount = %payload.amount,
        "Transfer requested"
    );

    let tx = repository(&state)
        .transfer(
            payload.source_account_number,
            payload.receiver_account_number,
            payload.amount,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tx.into())))
}
