//! Error taxonomy shared by the ledger, order book, and valuator, plus the
//! HTTP mapping: Validation/State/InsufficientFunds -> 400, NotFound -> 404,
//! Conflict -> 409, everything unexpected -> 500 with a generic body (the
//! detail goes to the log, not to the caller).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    State(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Insufficient funds. Available balance: ${0}")]
    InsufficientFunds(Decimal),
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::State(_) | ApiError::InsufficientFunds(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Internal detail stays out of the response body.
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
