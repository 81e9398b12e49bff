use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_portfolio::api::auth::{StoredUser, UserStore};
use rust_portfolio::api::routes::{AppState, app_router};
use rust_portfolio::config::Config;
use rust_portfolio::ledger::{Ledger, SharedLedger};
use rust_portfolio::orders::{OrderBook, SharedOrderBook};
use rust_portfolio::persistence;
use rust_portfolio::prices::PriceClient;
use rust_portfolio::valuation::{AssetCatalog, PriceHistory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let ledger: SharedLedger = Arc::new(RwLock::new(Ledger::new()));
    let orders: SharedOrderBook = Arc::new(RwLock::new(OrderBook::new()));
    let holdings = Arc::new(RwLock::new(Vec::new()));
    let assets = Arc::new(RwLock::new(AssetCatalog::new()));
    let prices = Arc::new(RwLock::new(PriceHistory::new()));
    let users: UserStore = Arc::new(RwLock::new(HashMap::new()));

    let db = match &config.database_url {
        Some(url) => {
            let pool =
                persistence::create_pool_and_migrate(url, config.db_max_connections).await?;
            info!("connected to database, hydrating stores");
            hydrate(&pool, &ledger, &orders, &holdings, &assets, &prices, &users).await?;
            Some(pool)
        }
        None => {
            info!("no DATABASE_URL set, running in memory only");
            None
        }
    };

    let price_client = PriceClient::new(&config.price_base_url, config.price_timeout)?;

    let state = AppState {
        ledger,
        orders,
        holdings,
        assets,
        prices,
        users,
        price_client,
        db,
    };

    let app = app_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Load every store from the database. Rows with unknown enum text are
/// skipped rather than aborting startup.
async fn hydrate(
    pool: &persistence::PgPool,
    ledger: &SharedLedger,
    orders: &SharedOrderBook,
    holdings: &Arc<RwLock<Vec<rust_portfolio::types::holding::Holding>>>,
    assets: &Arc<RwLock<AssetCatalog>>,
    prices: &Arc<RwLock<PriceHistory>>,
    users: &UserStore,
) -> anyhow::Result<()> {
    {
        let mut guard = ledger.write().await;
        for row in persistence::list_accounts(pool).await? {
            if let Some(account) = persistence::account_row_to_account(&row) {
                guard.insert_account(account);
            }
        }
    }
    {
        let mut guard = orders.write().await;
        for row in persistence::list_orders(pool).await? {
            if let Some(order) = persistence::order_row_to_order(&row) {
                guard.insert_order(order);
            }
        }
    }
    {
        let mut guard = holdings.write().await;
        for row in persistence::list_holdings(pool).await? {
            guard.push(persistence::holding_row_to_holding(&row));
        }
    }
    {
        let mut guard = assets.write().await;
        for row in persistence::list_assets(pool).await? {
            guard.insert(persistence::asset_row_to_asset(&row));
        }
    }
    {
        let mut guard = prices.write().await;
        for row in persistence::list_prices(pool).await? {
            guard.append(persistence::price_row_to_price_point(&row));
        }
    }
    {
        let mut guard = users.write().await;
        for row in persistence::list_users(pool).await? {
            guard.insert(
                row.username.clone(),
                StoredUser {
                    user_id: row.id,
                    username: row.username,
                    password: row.password,
                },
            );
        }
    }
    Ok(())
}
