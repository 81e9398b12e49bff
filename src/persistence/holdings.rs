//! Holding and asset persistence: list for hydration.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::types::holding::{Asset, Holding};

#[derive(Debug, FromRow)]
pub struct HoldingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub asset_total_units: Decimal,
    pub investment_amount: Decimal,
}

pub fn holding_row_to_holding(row: &HoldingRow) -> Holding {
    Holding {
        user_port_id: row.id,
        user_id: row.user_id,
        asset_id: row.asset_id,
        asset_total_units: row.asset_total_units,
        investment_amount: row.investment_amount,
    }
}

/// List all holdings, for hydration.
pub async fn list_holdings(pool: &PgPool) -> Result<Vec<HoldingRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HoldingRow>(
        "SELECT id, user_id, asset_id, asset_total_units, investment_amount FROM holdings",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, FromRow)]
pub struct AssetRow {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub asset_class: String,
}

pub fn asset_row_to_asset(row: &AssetRow) -> Asset {
    Asset {
        asset_id: row.id,
        symbol: row.symbol.clone(),
        name: row.name.clone(),
        asset_class: row.asset_class.clone(),
    }
}

/// List all assets, for hydration.
pub async fn list_assets(pool: &PgPool) -> Result<Vec<AssetRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AssetRow>("SELECT id, symbol, name, asset_class FROM assets")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
