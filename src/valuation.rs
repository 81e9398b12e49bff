//! Holdings valuator: joins holdings to asset metadata and the latest known
//! close price, computing per-holding and aggregate gain/loss. Read-only; one
//! price lookup per holding, sequentially.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::holding::{Asset, Holding, PricePoint};

pub type SharedHoldings = Arc<RwLock<Vec<Holding>>>;
pub type SharedAssets = Arc<RwLock<AssetCatalog>>;
pub type SharedPrices = Arc<RwLock<PriceHistory>>;

const CASH_ASSET_CLASS: &str = "cash";

/// Reference data, keyed by asset id.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    assets: HashMap<Uuid, Asset>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: Asset) {
        self.assets.insert(asset.asset_id, asset);
    }

    pub fn get(&self, asset_id: Uuid) -> Option<&Asset> {
        self.assets.get(&asset_id)
    }
}

/// Price rows per asset. "Latest" is purely the max-date row; staleness is
/// not validated here.
#[derive(Debug, Default)]
pub struct PriceHistory {
    by_asset: HashMap<Uuid, Vec<PricePoint>>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: PricePoint) {
        self.by_asset.entry(point.asset_id).or_default().push(point);
    }

    pub fn latest_close(&self, asset_id: Uuid) -> Option<Decimal> {
        self.by_asset
            .get(&asset_id)?
            .iter()
            .max_by_key(|p| p.date)
            .map(|p| p.close_price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedHolding {
    pub user_port_id: Uuid,
    pub asset_id: Uuid,
    pub symbol: String,
    pub name: String,
    pub asset_total_units: Decimal,
    pub investment_amount: Decimal,
    pub latest_close_price: Decimal,
    pub current_amount: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub holdings: Vec<ValuedHolding>,
    pub total_value: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
}

/// gain / invested * 100, zero when nothing was invested.
fn percent_gain(gain: Decimal, invested: Decimal) -> Decimal {
    if invested.is_zero() {
        Decimal::ZERO
    } else {
        gain / invested * Decimal::from(100)
    }
}

fn value_one(holding: &Holding, assets: &AssetCatalog, prices: &PriceHistory) -> ValuedHolding {
    let Some(asset) = assets.get(holding.asset_id) else {
        // Missing reference data degrades to a zero-valued row, never an error.
        return ValuedHolding {
            user_port_id: holding.user_port_id,
            asset_id: holding.asset_id,
            symbol: String::new(),
            name: String::new(),
            asset_total_units: holding.asset_total_units,
            investment_amount: holding.investment_amount,
            latest_close_price: Decimal::ZERO,
            current_amount: Decimal::ZERO,
            gain_loss: Decimal::ZERO,
            gain_loss_percent: Decimal::ZERO,
        };
    };

    let latest_close = prices.latest_close(holding.asset_id).unwrap_or(Decimal::ZERO);
    let current_amount = holding.asset_total_units * latest_close;
    let gain_loss = current_amount - holding.investment_amount;
    ValuedHolding {
        user_port_id: holding.user_port_id,
        asset_id: holding.asset_id,
        symbol: asset.symbol.clone(),
        name: asset.name.clone(),
        asset_total_units: holding.asset_total_units,
        investment_amount: holding.investment_amount,
        latest_close_price: latest_close,
        current_amount,
        gain_loss,
        gain_loss_percent: percent_gain(gain_loss, holding.investment_amount),
    }
}

/// Value every holding of a user and aggregate. An empty portfolio yields all
/// zeros (no division by zero).
pub fn value_holdings(
    user_id: Uuid,
    holdings: &[Holding],
    assets: &AssetCatalog,
    prices: &PriceHistory,
) -> PortfolioSummary {
    let valued: Vec<ValuedHolding> = holdings
        .iter()
        .filter(|h| h.user_id == user_id)
        .map(|h| value_one(h, assets, prices))
        .collect();

    let total_value: Decimal = valued.iter().map(|v| v.current_amount).sum();
    let total_invested: Decimal = valued.iter().map(|v| v.investment_amount).sum();
    // Summing per-row gain keeps zero-valued (missing-metadata) rows at zero
    // contribution instead of dragging the aggregate down.
    let total_gain_loss: Decimal = valued.iter().map(|v| v.gain_loss).sum();
    PortfolioSummary {
        holdings: valued,
        total_value,
        total_gain_loss,
        total_gain_loss_percent: percent_gain(total_gain_loss, total_invested),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBalanceView {
    pub user_id: Uuid,
    pub cash_balance: Decimal,
    pub total_portfolio_value: Decimal,
    pub total_invested: Decimal,
}

/// Cash is summed from accounts (the canonical figure); the portfolio value
/// adds non-cash holdings on top. Cash-class assets are skipped so cash is
/// never counted twice.
pub fn cash_balance(
    user_id: Uuid,
    total_cash: Decimal,
    holdings: &[Holding],
    assets: &AssetCatalog,
    prices: &PriceHistory,
) -> CashBalanceView {
    let mut securities_value = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;
    for holding in holdings.iter().filter(|h| h.user_id == user_id) {
        if assets
            .get(holding.asset_id)
            .is_some_and(|a| a.asset_class.eq_ignore_ascii_case(CASH_ASSET_CLASS))
        {
            continue;
        }
        let valued = value_one(holding, assets, prices);
        securities_value += valued.current_amount;
        total_invested += holding.investment_amount;
    }
    CashBalanceView {
        user_id,
        cash_balance: total_cash,
        total_portfolio_value: total_cash + securities_value,
        total_invested,
    }
}
