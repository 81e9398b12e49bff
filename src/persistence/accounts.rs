//! Account persistence: insert and list for hydration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::types::account::{Account, AccountType};

fn account_type_to_str(t: AccountType) -> &'static str {
    t.as_str()
}

#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_name: String,
    pub account_type: String,
    pub cash_balance: Decimal,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Convert a row to an Account for hydration. Skips rows with an unknown
/// account type.
pub fn account_row_to_account(row: &AccountRow) -> Option<Account> {
    let account_type = AccountType::parse(&row.account_type)?;
    Some(Account {
        account_id: row.id,
        user_id: row.user_id,
        account_name: row.account_name.clone(),
        account_type,
        cash_balance: row.cash_balance,
        is_default: row.is_default,
        created_at: row.created_at,
    })
}

/// Insert an account (after create).
pub async fn insert_account(pool: &PgPool, account: &Account) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO accounts (id, user_id, account_name, account_type, cash_balance, is_default, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(account.account_id)
    .bind(account.user_id)
    .bind(&account.account_name)
    .bind(account_type_to_str(account.account_type))
    .bind(account.cash_balance)
    .bind(account.is_default)
    .bind(account.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// List all accounts, for hydration.
pub async fn list_accounts(pool: &PgPool) -> Result<Vec<AccountRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AccountRow>(
        "SELECT id, user_id, account_name, account_type, cash_balance, is_default, created_at \
         FROM accounts",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
