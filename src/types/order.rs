use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrderId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuySell {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    #[serde(rename = "Under Review")]
    UnderReview,
    Cancelled,
    Executed,
}

impl OrderStatus {
    /// Cancelled and Executed admit no further status transition here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Executed)
    }
}

/// Secondary lifecycle field, distinct from `OrderStatus`: gates whether an
/// order may still be rejected before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    PendingConfirmation,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub order_type: OrderType,
    pub symbol: String,
    pub buy_sell: BuySell,
    pub unit_price: Decimal,
    pub limit_price: Option<Decimal>,
    pub qty: Decimal,
    pub amount: Decimal,
    pub settlement_date: Option<NaiveDate>,
    pub order_status: OrderStatus,
    pub confirmation_status: ConfirmationStatus,
    pub order_date: DateTime<Utc>,
}
