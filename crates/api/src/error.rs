//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bankapi_core::account::AccountError;
use bankapi_core::transaction::TransactionError;
use bankapi_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Handler error rendered as `{ "error": CODE, "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self(err.into())
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_client_error() {
            warn!(error = %self.0, status = status.as_u16(), "Request rejected");
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_app_error() {
        let response = ApiError(AppError::Conflict("taken".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::from(TransactionError::AccountNotFound(9832)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(TransactionError::Database("gone".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
