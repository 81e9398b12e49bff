//! Portfolio endpoints: holdings valuation, cash balance, price refresh.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::accounts::UserQuery;
use crate::api::routes::{AppState, ok};
use crate::error::ApiError;
use crate::persistence;
use crate::valuation;

pub async fn holdings(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query.require()?;
    let holdings = state.holdings.read().await;
    let assets = state.assets.read().await;
    let prices = state.prices.read().await;
    let summary = valuation::value_holdings(user_id, &holdings, &assets, &prices);
    Ok(ok(&summary))
}

pub async fn cash_balance(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query.require()?;
    let total_cash = state.ledger.read().await.total_cash(user_id);
    let holdings = state.holdings.read().await;
    let assets = state.assets.read().await;
    let prices = state.prices.read().await;
    let view = valuation::cash_balance(user_id, total_cash, &holdings, &assets, &prices);
    Ok(ok(&view))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub user_id: Option<Uuid>,
}

/// Pull fresh closes from the upstream price source for every asset the user
/// holds. Failed symbols are skipped; the response reports how many rows were
/// actually updated.
pub async fn refresh_prices(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = req
        .user_id
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;

    let targets: Vec<(Uuid, String)> = {
        let holdings = state.holdings.read().await;
        let assets = state.assets.read().await;
        let mut asset_ids: Vec<Uuid> = holdings
            .iter()
            .filter(|h| h.user_id == user_id)
            .map(|h| h.asset_id)
            .collect();
        asset_ids.sort();
        asset_ids.dedup();
        asset_ids
            .into_iter()
            .filter_map(|id| assets.get(id).map(|a| (id, a.symbol.clone())))
            .collect()
    };

    let fetched = state.price_client.fetch_many(&targets).await;
    let updated = fetched.len();
    {
        let mut prices = state.prices.write().await;
        for point in &fetched {
            prices.append(point.clone());
        }
    }
    if let Some(pool) = &state.db {
        for point in &fetched {
            persistence::insert_price(pool, point).await?;
        }
    }
    tracing::info!(%user_id, updated, "price refresh complete");
    Ok(ok(json!({
        "message": "Prices refreshed",
        "updatedCount": updated,
    })))
}
