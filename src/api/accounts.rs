//! Account endpoints: create, deposit, withdraw, list.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::routes::{AppState, ok};
use crate::error::ApiError;
use crate::ledger::CashMutation;
use crate::persistence;
use crate::types::account::AccountType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_id: Option<Uuid>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;
    let account_name = req
        .account_name
        .ok_or_else(|| ApiError::Validation("accountName is required".to_string()))?;
    let account_type = req
        .account_type
        .as_deref()
        .and_then(AccountType::parse)
        .ok_or_else(|| {
            ApiError::Validation(
                "accountType must be one of: checking, savings, brokerage".to_string(),
            )
        })?;

    let account = {
        let mut ledger = state.ledger.write().await;
        ledger.create_account(user_id, &account_name, account_type)?
    };
    if let Some(pool) = &state.db {
        persistence::insert_account(pool, &account).await?;
    }
    tracing::info!(account_id = %account.account_id, %user_id, "account created");
    Ok((StatusCode::CREATED, ok(&account)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRequest {
    pub account_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl CashRequest {
    fn parts(&self) -> Result<(Uuid, Decimal), ApiError> {
        let account_id = self
            .account_id
            .ok_or_else(|| ApiError::Validation("accountId is required".to_string()))?;
        let amount = self
            .amount
            .ok_or_else(|| ApiError::Validation("amount is required".to_string()))?;
        Ok((account_id, amount))
    }
}

fn mutation_body(label: &str, m: &CashMutation) -> Value {
    let mut body = json!({
        "accountId": m.account_id,
        "previousBalance": m.previous_balance,
        "newBalance": m.new_balance,
        "transactionId": m.record.trans_id,
        "timestamp": m.record.date,
    });
    if let Value::Object(map) = &mut body {
        map.insert(label.to_string(), json!(m.amount));
    }
    body
}

pub async fn deposit(
    State(state): State<AppState>,
    Json(req): Json<CashRequest>,
) -> Result<Json<Value>, ApiError> {
    let (account_id, amount) = req.parts()?;
    let mutation = {
        let mut ledger = state.ledger.write().await;
        ledger.deposit(account_id, amount, req.description.as_deref())?
    };
    if let Some(pool) = &state.db {
        persistence::record_cash_mutation(pool, &mutation).await?;
    }
    Ok(ok(mutation_body("depositAmount", &mutation)))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Json(req): Json<CashRequest>,
) -> Result<Json<Value>, ApiError> {
    let (account_id, amount) = req.parts()?;
    let mutation = {
        let mut ledger = state.ledger.write().await;
        ledger.withdraw(account_id, amount, req.description.as_deref())?
    };
    if let Some(pool) = &state.db {
        persistence::record_cash_mutation(pool, &mutation).await?;
    }
    Ok(ok(mutation_body("withdrawAmount", &mutation)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<Uuid>,
}

impl UserQuery {
    pub fn require(&self) -> Result<Uuid, ApiError> {
        self.user_id
            .ok_or_else(|| ApiError::Validation("userId is required".to_string()))
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query.require()?;
    let ledger = state.ledger.read().await;
    let accounts = ledger.accounts_for_user(user_id);
    let total_cash = ledger.total_cash(user_id);
    Ok(ok(json!({ "accounts": accounts, "totalCash": total_cash })))
}
