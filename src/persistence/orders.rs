//! Order persistence: insert, update status, list for hydration.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::types::order::{BuySell, ConfirmationStatus, Order, OrderStatus, OrderType};

fn buy_sell_to_str(s: BuySell) -> &'static str {
    match s {
        BuySell::Buy => "Buy",
        BuySell::Sell => "Sell",
    }
}

fn order_type_to_str(t: OrderType) -> &'static str {
    match t {
        OrderType::Market => "Market",
        OrderType::Limit => "Limit",
    }
}

fn status_to_str(s: OrderStatus) -> &'static str {
    match s {
        OrderStatus::Placed => "Placed",
        OrderStatus::UnderReview => "Under Review",
        OrderStatus::Cancelled => "Cancelled",
        OrderStatus::Executed => "Executed",
    }
}

fn confirmation_to_str(c: ConfirmationStatus) -> &'static str {
    match c {
        ConfirmationStatus::PendingConfirmation => "pending_confirmation",
        ConfirmationStatus::Confirmed => "confirmed",
        ConfirmationStatus::Rejected => "rejected",
    }
}

fn str_to_buy_sell(s: &str) -> Option<BuySell> {
    match s {
        "Buy" => Some(BuySell::Buy),
        "Sell" => Some(BuySell::Sell),
        _ => None,
    }
}

fn str_to_order_type(s: &str) -> Option<OrderType> {
    match s {
        "Market" => Some(OrderType::Market),
        "Limit" => Some(OrderType::Limit),
        _ => None,
    }
}

fn str_to_status(s: &str) -> Option<OrderStatus> {
    match s {
        "Placed" => Some(OrderStatus::Placed),
        "Under Review" => Some(OrderStatus::UnderReview),
        "Cancelled" => Some(OrderStatus::Cancelled),
        "Executed" => Some(OrderStatus::Executed),
        _ => None,
    }
}

fn str_to_confirmation(s: &str) -> Option<ConfirmationStatus> {
    match s {
        "pending_confirmation" => Some(ConfirmationStatus::PendingConfirmation),
        "confirmed" => Some(ConfirmationStatus::Confirmed),
        "rejected" => Some(ConfirmationStatus::Rejected),
        _ => None,
    }
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub order_type: String,
    pub symbol: String,
    pub buy_sell: String,
    pub unit_price: Decimal,
    pub limit_price: Option<Decimal>,
    pub qty: Decimal,
    pub amount: Decimal,
    pub settlement_date: Option<NaiveDate>,
    pub order_status: String,
    pub confirmation_status: String,
    pub order_date: DateTime<Utc>,
}

/// Convert a row to an Order for hydration. Skips rows with unknown enum text.
pub fn order_row_to_order(row: &OrderRow) -> Option<Order> {
    Some(Order {
        order_id: row.id,
        user_id: row.user_id,
        asset_id: row.asset_id,
        order_type: str_to_order_type(&row.order_type)?,
        symbol: row.symbol.clone(),
        buy_sell: str_to_buy_sell(&row.buy_sell)?,
        unit_price: row.unit_price,
        limit_price: row.limit_price,
        qty: row.qty,
        amount: row.amount,
        settlement_date: row.settlement_date,
        order_status: str_to_status(&row.order_status)?,
        confirmation_status: str_to_confirmation(&row.confirmation_status)?,
        order_date: row.order_date,
    })
}

/// Insert an order (after place).
pub async fn insert_order(pool: &PgPool, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO orders (id, user_id, asset_id, order_type, symbol, buy_sell, unit_price, limit_price, \
         qty, amount, settlement_date, order_status, confirmation_status, order_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(order.order_id)
    .bind(order.user_id)
    .bind(order.asset_id)
    .bind(order_type_to_str(order.order_type))
    .bind(&order.symbol)
    .bind(buy_sell_to_str(order.buy_sell))
    .bind(order.unit_price)
    .bind(order.limit_price)
    .bind(order.qty)
    .bind(order.amount)
    .bind(order.settlement_date)
    .bind(status_to_str(order.order_status))
    .bind(confirmation_to_str(order.confirmation_status))
    .bind(order.order_date)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update both lifecycle fields together (cancel and reject touch them as one
/// write).
pub async fn update_order_status(
    pool: &PgPool,
    id: Uuid,
    status: OrderStatus,
    confirmation: ConfirmationStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET order_status = $1, confirmation_status = $2 WHERE id = $3")
        .bind(status_to_str(status))
        .bind(confirmation_to_str(confirmation))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// List all orders, for hydration.
pub async fn list_orders(pool: &PgPool) -> Result<Vec<OrderRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, user_id, asset_id, order_type, symbol, buy_sell, unit_price, limit_price, \
         qty, amount, settlement_date, order_status, confirmation_status, order_date \
         FROM orders ORDER BY order_date",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
