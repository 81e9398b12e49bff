//! Order endpoints: place, cancel, reject, history.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::accounts::UserQuery;
use crate::api::routes::{AppState, ok};
use crate::error::ApiError;
use crate::persistence;
use crate::types::order::{BuySell, OrderType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: Option<Uuid>,
    pub asset_id: Option<Uuid>,
    pub symbol: Option<String>,
    pub buy_sell: Option<BuySell>,
    #[serde(default)]
    pub order_type: OrderType,
    pub unit_price: Option<Decimal>,
    pub limit_price: Option<Decimal>,
    pub qty: Option<Decimal>,
    pub settlement_date: Option<NaiveDate>,
}

pub async fn place(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;
    let asset_id = req
        .asset_id
        .ok_or_else(|| ApiError::Validation("assetId is required".to_string()))?;
    let symbol = req
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("symbol is required".to_string()))?;
    let buy_sell = req
        .buy_sell
        .ok_or_else(|| ApiError::Validation("buySell is required".to_string()))?;
    let unit_price = req
        .unit_price
        .ok_or_else(|| ApiError::Validation("unitPrice is required".to_string()))?;
    let qty = req
        .qty
        .ok_or_else(|| ApiError::Validation("qty is required".to_string()))?;

    let order = {
        let mut orders = state.orders.write().await;
        orders.place_order(
            user_id,
            asset_id,
            &symbol,
            buy_sell,
            req.order_type,
            unit_price,
            req.limit_price,
            qty,
            req.settlement_date,
        )?
    };
    if let Some(pool) = &state.db {
        persistence::insert_order(pool, &order).await?;
    }
    tracing::info!(order_id = %order.order_id, %user_id, "order placed");
    Ok((StatusCode::CREATED, ok(&order)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub user_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
}

pub async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;
    let order_id = req
        .order_id
        .ok_or_else(|| ApiError::Validation("orderId is required".to_string()))?;

    let order = {
        let mut orders = state.orders.write().await;
        orders.cancel_order(user_id, order_id)?
    };
    if let Some(pool) = &state.db {
        persistence::update_order_status(
            pool,
            order.order_id,
            order.order_status,
            order.confirmation_status,
        )
        .await?;
    }
    Ok(ok(json!({
        "message": "Order cancelled",
        "orderId": order.order_id,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectOrderRequest {
    pub order_id: Option<Uuid>,
}

pub async fn reject(
    State(state): State<AppState>,
    Json(req): Json<RejectOrderRequest>,
) -> Result<Json<Value>, ApiError> {
    let order_id = req
        .order_id
        .ok_or_else(|| ApiError::Validation("orderId is required".to_string()))?;

    let order = {
        let mut orders = state.orders.write().await;
        orders.reject_order(order_id)?
    };
    if let Some(pool) = &state.db {
        persistence::update_order_status(
            pool,
            order.order_id,
            order.order_status,
            order.confirmation_status,
        )
        .await?;
    }
    Ok(ok(json!({
        "message": "Order rejected",
        "orderId": order.order_id,
    })))
}

/// Order history newest-first, each row joined with asset metadata.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query.require()?;
    let orders = state.orders.read().await.history_for_user(user_id);
    let assets = state.assets.read().await;
    let rows: Vec<Value> = orders
        .iter()
        .map(|order| {
            let mut row = serde_json::to_value(order).unwrap_or(Value::Null);
            if let (Value::Object(map), Some(asset)) = (&mut row, assets.get(order.asset_id)) {
                map.insert("assetName".to_string(), json!(asset.name));
                map.insert("assetClass".to_string(), json!(asset.asset_class));
            }
            row
        })
        .collect();
    Ok(ok(json!({ "orders": rows })))
}
