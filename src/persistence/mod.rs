//! Database layer: pool, migrations, and access for accounts, transactions,
//! orders, holdings, prices, and users. In-memory stores are hydrated from
//! here at startup; mutations are written through when a pool is configured.

mod accounts;
mod holdings;
mod orders;
mod pool;
mod prices;
mod transactions;
mod users;

pub use accounts::{account_row_to_account, insert_account, list_accounts, AccountRow};
pub use holdings::{
    asset_row_to_asset, holding_row_to_holding, list_assets, list_holdings, AssetRow, HoldingRow,
};
pub use orders::{insert_order, list_orders, order_row_to_order, update_order_status, OrderRow};
pub use pool::create_pool_and_migrate;
pub use prices::{insert_price, list_prices, price_row_to_price_point, PriceRow};
pub use sqlx::PgPool;
pub use users::{insert_user, list_users, UserRow};

use crate::ledger::CashMutation;

/// Persist one ledger mutation atomically: the balance update and the audit
/// insert commit together or not at all. The balance moves by a signed delta,
/// so write-throughs that land out of order still converge on the ledger's
/// balance instead of freezing a stale absolute value.
pub async fn record_cash_mutation(
    pool: &PgPool,
    mutation: &CashMutation,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE accounts SET cash_balance = cash_balance + $1 WHERE id = $2")
        .bind(mutation.signed_delta())
        .bind(mutation.account_id)
        .execute(&mut *tx)
        .await?;
    transactions::insert_transaction_tx(&mut tx, &mutation.record).await?;
    tx.commit().await?;
    Ok(())
}
