//! Router and shared application state.

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::auth::UserStore;
use crate::ledger::SharedLedger;
use crate::orders::SharedOrderBook;
use crate::persistence::PgPool;
use crate::prices::PriceClient;
use crate::valuation::{SharedAssets, SharedHoldings, SharedPrices};

#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub orders: SharedOrderBook,
    pub holdings: SharedHoldings,
    pub assets: SharedAssets,
    pub prices: SharedPrices,
    pub users: UserStore,
    pub price_client: PriceClient,
    /// Write-through target; `None` runs fully in memory (tests).
    pub db: Option<PgPool>,
}

/// Success envelope: `{ "success": true, "data": ... }`.
pub fn ok(data: impl Serialize) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

async fn health() -> &'static str {
    "healthy"
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(crate::api::auth::register))
        .route("/auth/login", get(crate::api::auth::login))
        .route("/accounts/create", post(crate::api::accounts::create))
        .route("/accounts/deposit", post(crate::api::accounts::deposit))
        .route("/accounts/withdraw", post(crate::api::accounts::withdraw))
        .route("/accounts/list", get(crate::api::accounts::list))
        .route("/orders/place", post(crate::api::orders::place))
        .route("/orders/cancel", post(crate::api::orders::cancel))
        .route("/orders/reject", post(crate::api::orders::reject))
        .route("/orders/history", get(crate::api::orders::history))
        .route("/portfolio/holdings", get(crate::api::portfolio::holdings))
        .route(
            "/portfolio/refresh-prices",
            post(crate::api::portfolio::refresh_prices),
        )
        .route("/user/cash-balance", get(crate::api::portfolio::cash_balance))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
