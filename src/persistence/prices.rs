//! Price history persistence: insert on refresh, list for hydration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::types::holding::PricePoint;

#[derive(Debug, FromRow)]
pub struct PriceRow {
    pub asset_id: Uuid,
    pub close_price: Decimal,
    pub date: DateTime<Utc>,
}

pub fn price_row_to_price_point(row: &PriceRow) -> PricePoint {
    PricePoint {
        asset_id: row.asset_id,
        close_price: row.close_price,
        date: row.date,
    }
}

/// Insert one price row (call per refreshed quote).
pub async fn insert_price(pool: &PgPool, point: &PricePoint) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO prices (id, asset_id, close_price, date) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(point.asset_id)
        .bind(point.close_price)
        .bind(point.date)
        .execute(pool)
        .await?;
    Ok(())
}

/// List all price rows, for hydration.
pub async fn list_prices(pool: &PgPool) -> Result<Vec<PriceRow>, sqlx::Error> {
    let rows =
        sqlx::query_as::<_, PriceRow>("SELECT asset_id, close_price, date FROM prices ORDER BY date")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}
