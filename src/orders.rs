//! Order book: order records with their status lifecycle.
//!
//! Lifecycle: created Placed/pending_confirmation; cancel moves the status to
//! Cancelled unless the order is already terminal; reject additionally flips
//! the confirmation status and is only legal from pending_confirmation.
//! Executed is reached by the (out-of-scope) execution path.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::order::{
    BuySell, ConfirmationStatus, Order, OrderId, OrderStatus, OrderType,
};

pub type SharedOrderBook = Arc<RwLock<OrderBook>>;

#[derive(Debug, Default)]
pub struct OrderBook {
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an order as-is (hydration from the database at startup).
    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.order_id, order);
    }

    /// Create a new order in Placed/pending_confirmation.
    #[allow(clippy::too_many_arguments)]
    pub fn place_order(
        &mut self,
        user_id: Uuid,
        asset_id: Uuid,
        symbol: &str,
        buy_sell: BuySell,
        order_type: OrderType,
        unit_price: Decimal,
        limit_price: Option<Decimal>,
        qty: Decimal,
        settlement_date: Option<NaiveDate>,
    ) -> Result<Order, ApiError> {
        if qty <= Decimal::ZERO {
            return Err(ApiError::Validation("qty must be a positive number".to_string()));
        }
        if unit_price <= Decimal::ZERO {
            return Err(ApiError::Validation(
                "unitPrice must be a positive number".to_string(),
            ));
        }
        let order = Order {
            order_id: Uuid::new_v4(),
            user_id,
            asset_id,
            order_type,
            symbol: symbol.to_uppercase(),
            buy_sell,
            unit_price,
            limit_price,
            qty,
            amount: unit_price * qty,
            settlement_date,
            order_status: OrderStatus::Placed,
            confirmation_status: ConfirmationStatus::PendingConfirmation,
            order_date: Utc::now(),
        };
        self.orders.insert(order.order_id, order.clone());
        Ok(order)
    }

    /// Cancel a user's order. Terminal orders (Cancelled, Executed) stay
    /// untouched and report a state error.
    pub fn cancel_order(&mut self, user_id: Uuid, order_id: OrderId) -> Result<Order, ApiError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .filter(|o| o.user_id == user_id)
            .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

        if order.order_status.is_terminal() {
            return Err(ApiError::State(format!(
                "Order cannot be cancelled in status {:?}",
                order.order_status
            )));
        }
        order.order_status = OrderStatus::Cancelled;
        Ok(order.clone())
    }

    /// Reject an order awaiting confirmation: status and confirmation status
    /// change together or not at all.
    pub fn reject_order(&mut self, order_id: OrderId) -> Result<Order, ApiError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

        if order.confirmation_status != ConfirmationStatus::PendingConfirmation {
            return Err(ApiError::State(format!(
                "Order cannot be rejected with confirmation status {:?}",
                order.confirmation_status
            )));
        }
        order.order_status = OrderStatus::Cancelled;
        order.confirmation_status = ConfirmationStatus::Rejected;
        Ok(order.clone())
    }

    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// All orders for a user, newest first.
    pub fn history_for_user(&self, user_id: Uuid) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        orders
    }
}
