use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Brokerage,
}

impl AccountType {
    /// Parse the wire form ("checking" | "savings" | "brokerage").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checking" => Some(AccountType::Checking),
            "savings" => Some(AccountType::Savings),
            "brokerage" => Some(AccountType::Brokerage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Brokerage => "brokerage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransType {
    Deposit,
    Withdraw,
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: Uuid,
    pub user_id: Uuid,
    pub account_name: String,
    pub account_type: AccountType,
    pub cash_balance: Decimal,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Append-only audit record. One per deposit/withdraw/trade; never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub trans_id: Uuid,
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub asset_id: Option<Uuid>,
    pub trans_type: TransType,
    pub date: DateTime<Utc>,
    pub units: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub cost: Decimal,
    pub description: String,
}
