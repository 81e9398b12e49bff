//! Order book tests: placement, cancel/reject transitions, history ordering.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use rust_portfolio::error::ApiError;
use rust_portfolio::orders::OrderBook;
use rust_portfolio::types::order::{
    BuySell, ConfirmationStatus, Order, OrderStatus, OrderType,
};
use uuid::Uuid;

fn place(book: &mut OrderBook, user_id: Uuid) -> Order {
    book.place_order(
        user_id,
        Uuid::new_v4(),
        "vti",
        BuySell::Buy,
        OrderType::Market,
        dec!(250),
        None,
        dec!(4),
        None,
    )
    .unwrap()
}

#[test]
fn place_order_starts_placed_pending_confirmation() {
    let mut book = OrderBook::new();
    let order = place(&mut book, Uuid::new_v4());

    assert_eq!(order.order_status, OrderStatus::Placed);
    assert_eq!(
        order.confirmation_status,
        ConfirmationStatus::PendingConfirmation
    );
    assert_eq!(order.symbol, "VTI");
    assert_eq!(order.amount, dec!(1000));
}

#[test]
fn place_order_rejects_non_positive_qty_and_price() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();

    let err = book
        .place_order(
            user_id,
            Uuid::new_v4(),
            "VTI",
            BuySell::Buy,
            OrderType::Market,
            dec!(250),
            None,
            dec!(0),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = book
        .place_order(
            user_id,
            Uuid::new_v4(),
            "VTI",
            BuySell::Sell,
            OrderType::Market,
            dec!(-1),
            None,
            dec!(4),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn cancel_order_sets_cancelled() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();
    let order = place(&mut book, user_id);

    let cancelled = book.cancel_order(user_id, order.order_id).unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
}

#[test]
fn cancel_twice_yields_state_error_second_time() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();
    let order = place(&mut book, user_id);

    book.cancel_order(user_id, order.order_id).unwrap();
    let err = book.cancel_order(user_id, order.order_id).unwrap_err();
    assert!(matches!(err, ApiError::State(_)));
}

#[test]
fn cancel_other_users_order_is_not_found() {
    let mut book = OrderBook::new();
    let order = place(&mut book, Uuid::new_v4());

    let err = book.cancel_order(Uuid::new_v4(), order.order_id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    // The order itself stays untouched.
    assert_eq!(
        book.get_order(order.order_id).unwrap().order_status,
        OrderStatus::Placed
    );
}

#[test]
fn cancel_executed_order_is_state_error() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();
    let mut order = place(&mut book, user_id);
    order.order_status = OrderStatus::Executed;
    book.insert_order(order.clone());

    let err = book.cancel_order(user_id, order.order_id).unwrap_err();
    assert!(matches!(err, ApiError::State(_)));
    assert_eq!(
        book.get_order(order.order_id).unwrap().order_status,
        OrderStatus::Executed
    );
}

#[test]
fn reject_pending_order_cancels_and_marks_rejected() {
    let mut book = OrderBook::new();
    let order = place(&mut book, Uuid::new_v4());

    let rejected = book.reject_order(order.order_id).unwrap();
    assert_eq!(rejected.order_status, OrderStatus::Cancelled);
    assert_eq!(rejected.confirmation_status, ConfirmationStatus::Rejected);
}

#[test]
fn reject_outside_pending_confirmation_is_state_error_without_mutation() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();
    let mut order = place(&mut book, user_id);
    order.confirmation_status = ConfirmationStatus::Confirmed;
    book.insert_order(order.clone());

    let err = book.reject_order(order.order_id).unwrap_err();
    assert!(matches!(err, ApiError::State(_)));

    let stored = book.get_order(order.order_id).unwrap();
    assert_eq!(stored.order_status, OrderStatus::Placed);
    assert_eq!(stored.confirmation_status, ConfirmationStatus::Confirmed);
}

#[test]
fn reject_twice_fails_the_second_time() {
    let mut book = OrderBook::new();
    let order = place(&mut book, Uuid::new_v4());

    book.reject_order(order.order_id).unwrap();
    let err = book.reject_order(order.order_id).unwrap_err();
    assert!(matches!(err, ApiError::State(_)));
}

#[test]
fn reject_unknown_order_is_not_found() {
    let mut book = OrderBook::new();
    let err = book.reject_order(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn history_is_newest_first_per_user() {
    let mut book = OrderBook::new();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let mut older = place(&mut book, user_id);
    older.order_date = now - Duration::days(2);
    book.insert_order(older.clone());
    let mut newer = place(&mut book, user_id);
    newer.order_date = now - Duration::hours(1);
    book.insert_order(newer.clone());
    place(&mut book, Uuid::new_v4());

    let history = book.history_for_user(user_id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order_id, newer.order_id);
    assert_eq!(history[1].order_id, older.order_id);
}
