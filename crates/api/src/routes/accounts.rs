//! Account management routes.
//!
//! `GET /account/{key}` looks the account up by its number; `PUT
//! /account/{key}` addresses it by surrogate id.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bankapi_core::account::{Account, AccountError, AccountInput, AccountService};
use bankapi_db::AccountRepository;
use bankapi_shared::types::{AccountId, check_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{AppState, error::ApiError, extractors::ValidatedJson};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(list_accounts).post(create_account))
        .route("/account/{key}", get(get_account).put(update_account))
}

/// Request body for creating or overwriting an account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// Holder name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Account number.
    pub number: i64,
    /// Balance.
    #[validate(custom(function = "money"))]
    pub balance: Decimal,
    /// Overdraft allowance.
    #[validate(custom(function = "special_limit"))]
    pub special_limit: Decimal,
}

impl From<AccountRequest> for AccountInput {
    fn from(request: AccountRequest) -> Self {
        Self {
            name: request.name,
            number: request.number,
            balance: request.balance,
            special_limit: request.special_limit,
        }
    }
}

fn money(value: &Decimal) -> Result<(), ValidationError> {
    check_money(*value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("money").with_message(e.to_string().into()))
}

fn special_limit(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("non_negative")
            .with_message("special limit must not be negative".into()));
    }
    money(value)
}

/// Response for an account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Surrogate id.
    pub id: AccountId,
    /// Holder name.
    pub name: String,
    /// Account number.
    pub number: i64,
    /// Current balance.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
    /// Overdraft allowance.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub special_limit: Decimal,
    /// `balance + specialLimit`.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance_with_limit: Decimal,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            balance_with_limit: account.available_capacity(),
            id: account.id,
            name: account.name,
            number: account.number,
            balance: account.balance,
            special_limit: account.special_limit,
        }
    }
}

fn service(state: &AppState) -> AccountService<AccountRepository> {
    AccountService::new(AccountRepository::new((*state.db).clone()))
}

/// GET `/account` - List all accounts.
async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = service(&state).get_all().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// GET `/account/{number}` - Get one account; 404 with an empty body if unknown.
async fn get_account(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> Result<Response, ApiError> {
    match service(&state).get_by_number(number).await? {
        Some(account) => Ok(Json(AccountResponse::from(account)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// POST `/account` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = service(&state).save(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// PUT `/account/{id}` - Overwrite an account; 404 `Not found` if unknown.
async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> Result<Response, ApiError> {
    match service(&state)
        .update(AccountId::from_raw(id), payload.into())
        .await
    {
        Ok(account) => Ok(Json(AccountResponse::from(account)).into_response()),
        Err(AccountError::NotFound(_)) => Ok((StatusCode::NOT_FOUND, "Not found").into_response()),
        Err(e) => Err(e.into()),
    }
}
