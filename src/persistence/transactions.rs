//! Transaction persistence: append-only audit inserts.

use sqlx::Postgres;

use crate::types::account::{TransType, Transaction};

fn trans_type_to_str(t: TransType) -> &'static str {
    match t {
        TransType::Deposit => "DEPOSIT",
        TransType::Withdraw => "WITHDRAW",
        TransType::Buy => "BUY",
        TransType::Sell => "SELL",
    }
}

/// Insert an audit record inside an open transaction (paired with the balance
/// update in `record_cash_mutation`).
pub(super) async fn insert_transaction_tx(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    record: &Transaction,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO transactions (id, user_id, account_id, asset_id, trans_type, date, units, price_per_unit, cost, description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(record.trans_id)
    .bind(record.user_id)
    .bind(record.account_id)
    .bind(record.asset_id)
    .bind(trans_type_to_str(record.trans_type))
    .bind(record.date)
    .bind(record.units)
    .bind(record.price_per_unit)
    .bind(record.cost)
    .bind(&record.description)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
