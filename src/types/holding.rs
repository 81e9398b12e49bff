use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference data for a tradable asset. `asset_class` "cash" is excluded from
/// portfolio valuation (cash lives solely in accounts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: Uuid,
    pub symbol: String,
    pub name: String,
    pub asset_class: String,
}

/// A user's position in one asset: units owned plus cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub user_port_id: Uuid,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub asset_total_units: Decimal,
    pub investment_amount: Decimal,
}

/// One row of price history. "Latest" is purely max `date`; no freshness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub asset_id: Uuid,
    pub close_price: Decimal,
    pub date: DateTime<Utc>,
}
